//! Saving restored images to disk.
//!
//! A restored reference is either a `data:` URL, an `http(s)://` URL or a
//! `file://` URL. Each result is written as `restored_<original name>` in the
//! output directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tokio::time::Instant;
use tracing::{debug, info};

use pastperfect::{download_file_name, download_plan, ProcessedResult};

use crate::error::{ClientError, ClientResult};
use crate::files::path_from_file_url;

/// Decode the payload of a `data:` URL.
pub fn decode_data_url(url: &str) -> ClientResult<Vec<u8>> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| ClientError::Download("not a data: URL".to_string()))?;
    let (meta, data) = rest
        .split_once(',')
        .ok_or_else(|| ClientError::Download("malformed data: URL".to_string()))?;

    if meta.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
        STANDARD
            .decode(data.trim())
            .map_err(|e| ClientError::Download(format!("invalid base64 payload: {}", e)))
    } else {
        Ok(urlencoding::decode_binary(data.as_bytes()).into_owned())
    }
}

/// Writes restored images into one directory.
#[derive(Clone, Debug)]
pub struct Downloader {
    client: reqwest::Client,
    output_dir: PathBuf,
}

impl Downloader {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Fetch the bytes behind a restored reference.
    pub async fn fetch(&self, reference: &str) -> ClientResult<Vec<u8>> {
        if reference.starts_with("data:") {
            return decode_data_url(reference);
        }

        if reference.starts_with("http://") || reference.starts_with("https://") {
            let response = self.client.get(reference).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ClientError::Download(format!("HTTP {} for {}", status, reference)));
            }
            return Ok(response.bytes().await?.to_vec());
        }

        if let Some(path) = path_from_file_url(reference) {
            return Ok(tokio::fs::read(path).await?);
        }

        Err(ClientError::Download(format!("unsupported reference: {}", reference)))
    }

    /// Save one result; returns the written path.
    pub async fn save(&self, result: &ProcessedResult) -> ClientResult<PathBuf> {
        self.save_as(result, &download_file_name(result)).await
    }

    async fn save_as(&self, result: &ProcessedResult, file_name: &str) -> ClientResult<PathBuf> {
        let bytes = self.fetch(&result.restored_reference).await?;
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let path = self.output_dir.join(file_name);
        tokio::fs::write(&path, &bytes).await?;
        debug!(path = %path.display(), bytes = bytes.len(), "Restored image saved");
        Ok(path)
    }

    /// Save every result, `stagger` apart, in result order.
    ///
    /// A failed download does not stop the others; each entry of the
    /// returned list matches the result at the same index.
    pub async fn save_all(&self, results: &[ProcessedResult], stagger: Duration) -> Vec<ClientResult<PathBuf>> {
        let start = Instant::now();
        let mut saved = Vec::with_capacity(results.len());

        let mut taken = HashSet::new();

        for scheduled in download_plan(results, stagger) {
            tokio::time::sleep_until(start + scheduled.offset).await;
            let file_name = unique_file_name(&scheduled.file_name, &mut taken);
            saved.push(self.save_as(scheduled.result, &file_name).await);
        }

        let ok = saved.iter().filter(|r| r.is_ok()).count();
        info!(saved = ok, total = results.len(), dir = %self.output_dir.display(), "Downloads finished");
        saved
    }
}

/// `name`, or `stem (n).ext` when `name` was already handed out.
fn unique_file_name(name: &str, taken: &mut HashSet<String>) -> String {
    if taken.insert(name.to_string()) {
        return name.to_string();
    }

    let (stem, ext) = match name.rfind('.') {
        Some(dot) if dot > 0 => name.split_at(dot),
        _ => (name, ""),
    };
    let mut n = 1;
    loop {
        let candidate = format!("{} ({}){}", stem, n, ext);
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::file_url;
    use pastperfect::ItemId;
    use std::fs;
    use tempfile::TempDir;

    fn result(name: &str, restored: &str) -> ProcessedResult {
        ProcessedResult {
            id: ItemId::new(),
            original_reference: format!("file:///photos/{}", name),
            restored_reference: restored.to_string(),
            original_name: name.to_string(),
            elapsed_seconds: 1.0,
            applied_improvements: vec![],
        }
    }

    #[test]
    fn test_decode_data_url() {
        let bytes = decode_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(bytes, b"hello");

        let plain = decode_data_url("data:text/plain,hi%20there").unwrap();
        assert_eq!(plain, b"hi there");

        assert!(decode_data_url("data:image/png;base64").is_err());
        assert!(decode_data_url("data:image/png;base64,@@@").is_err());
        assert!(decode_data_url("https://x").is_err());
    }

    #[tokio::test]
    async fn test_save_data_url_result() {
        let dir = TempDir::new().unwrap();
        let downloader = Downloader::new(dir.path().join("out"));

        let path = downloader
            .save(&result("grandpa.jpg", "data:image/jpeg;base64,aGVsbG8="))
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("out").join("restored_grandpa.jpg"));
        assert_eq!(fs::read(path).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_save_file_reference() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("restored-on-disk.png");
        fs::write(&source, b"png bytes").unwrap();

        let downloader = Downloader::new(dir.path());
        let path = downloader
            .save(&result("scan.png", &file_url(&source)))
            .await
            .unwrap();
        assert_eq!(fs::read(path).unwrap(), b"png bytes");
    }

    #[tokio::test]
    async fn test_save_all_continues_after_failure() {
        let dir = TempDir::new().unwrap();
        let downloader = Downloader::new(dir.path());
        let results = vec![
            result("a.jpg", "data:image/jpeg;base64,YQ=="),
            result("b.jpg", "ftp://nowhere/b.jpg"),
            result("c.jpg", "data:image/jpeg;base64,Yw=="),
        ];

        let started = Instant::now();
        let saved = downloader.save_all(&results, Duration::from_millis(20)).await;

        assert!(started.elapsed() >= Duration::from_millis(40));
        assert_eq!(saved.len(), 3);
        assert!(saved[0].is_ok());
        assert!(matches!(saved[1], Err(ClientError::Download(_))));
        assert_eq!(fs::read(dir.path().join("restored_c.jpg")).unwrap(), b"c");
    }

    #[tokio::test]
    async fn test_save_all_keeps_same_named_results_apart() {
        let dir = TempDir::new().unwrap();
        let downloader = Downloader::new(dir.path());
        let results = vec![
            result("photo.jpg", "data:image/jpeg;base64,YQ=="),
            result("photo.jpg", "data:image/jpeg;base64,Yg=="),
            result("photo.jpg", "data:image/jpeg;base64,Yw=="),
        ];

        let saved: Vec<PathBuf> = downloader
            .save_all(&results, Duration::ZERO)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(saved[0], dir.path().join("restored_photo.jpg"));
        assert_eq!(saved[1], dir.path().join("restored_photo (1).jpg"));
        assert_eq!(saved[2], dir.path().join("restored_photo (2).jpg"));
        assert_eq!(fs::read(&saved[0]).unwrap(), b"a");
        assert_eq!(fs::read(&saved[1]).unwrap(), b"b");
        assert_eq!(fs::read(&saved[2]).unwrap(), b"c");
    }

    #[test]
    fn test_unique_file_name() {
        let mut taken = HashSet::new();
        assert_eq!(unique_file_name("restored_a.png", &mut taken), "restored_a.png");
        assert_eq!(unique_file_name("restored_a.png", &mut taken), "restored_a (1).png");
        assert_eq!(unique_file_name("restored_noext", &mut taken), "restored_noext");
        assert_eq!(unique_file_name("restored_noext", &mut taken), "restored_noext (1)");
    }
}
