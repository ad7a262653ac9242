//! Local files as collector input.
//!
//! Paths stand in for browser `File` handles: the candidate payload is the
//! path itself and the preview reference is a `file://` URL.

use std::path::{Path, PathBuf};

use pastperfect::{FileCandidate, PreviewAllocator};

use crate::error::ClientResult;

/// MIME type guessed from the file extension; empty when unknown.
pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        Some("webp") => "image/webp",
        Some("mp4") => "video/mp4",
        Some("avi") => "video/x-msvideo",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        _ => "",
    }
}

/// Build a collector candidate from a path on disk.
pub fn candidate_from_path(path: &Path) -> ClientResult<FileCandidate<PathBuf>> {
    let metadata = std::fs::metadata(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(FileCandidate::new(
        path.to_path_buf(),
        name,
        metadata.len(),
        guess_mime(path),
    ))
}

/// `file://` URL of a path, absolute when it can be resolved.
pub fn file_url(path: &Path) -> String {
    let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let raw = absolute.to_string_lossy().replace('\\', "/");
    let encoded = raw
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");

    if encoded.starts_with('/') {
        format!("file://{}", encoded)
    } else {
        format!("file:///{}", encoded)
    }
}

/// Path behind a `file://` URL.
pub fn path_from_file_url(url: &str) -> Option<PathBuf> {
    let raw = url.strip_prefix("file://")?;
    let decoded = urlencoding::decode(raw).ok()?;
    Some(PathBuf::from(decoded.into_owned()))
}

/// Previews for local files. Nothing to release: the file stays on disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct FilePreviews;

impl PreviewAllocator<PathBuf> for FilePreviews {
    fn allocate(&self, payload: &PathBuf) -> String {
        file_url(payload)
    }

    fn release(&self, preview_url: &str) {
        tracing::trace!(preview = preview_url, "Preview released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime(Path::new("a/photo.JPG")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("scan.tif")), "image/tiff");
        assert_eq!(guess_mime(Path::new("clip.mov")), "video/quicktime");
        assert_eq!(guess_mime(Path::new("notes.txt")), "");
        assert_eq!(guess_mime(Path::new("README")), "");
    }

    #[test]
    fn test_candidate_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grandma.png");
        fs::write(&path, b"\x89PNG fake").unwrap();

        let candidate = candidate_from_path(&path).unwrap();
        assert_eq!(candidate.name, "grandma.png");
        assert_eq!(candidate.size_bytes, 9);
        assert_eq!(candidate.mime_type, "image/png");
        assert_eq!(candidate.payload, path);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(candidate_from_path(&dir.path().join("nope.jpg")).is_err());
    }

    #[test]
    fn test_file_url_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("old photo #1.jpg");
        fs::write(&path, b"jpeg").unwrap();

        let url = file_url(&path);
        assert!(url.starts_with("file://"));
        assert!(url.contains("old%20photo%20%231.jpg"));

        let back = path_from_file_url(&url).unwrap();
        assert_eq!(fs::read(back).unwrap(), b"jpeg");
    }

    #[test]
    fn test_path_from_other_scheme() {
        assert!(path_from_file_url("https://cdn.example.com/x.jpg").is_none());
    }
}
