//! Upload collector: accepts dropped or picked files and holds them until
//! handoff.
//!
//! Every accepted file gets a local preview reference from a
//! [`PreviewAllocator`]; removing the file releases that reference exactly
//! once. Files outside the [`AcceptPolicy`] are returned as [`Rejection`]s
//! with a reason the UI can show.

use serde::{Deserialize, Serialize};

use crate::error::{CollectError, CollectResult, RejectReason};
use crate::types::{FileCandidate, ItemId, PendingItem};

/// Average backend time per photo, used for the estimate shown before submit.
pub const ESTIMATED_SECONDS_PER_ITEM: u64 = 30;

// =============================================================================
// Preview Resources
// =============================================================================

/// Allocates and releases local preview references for collected files.
///
/// In the browser this wraps `URL.createObjectURL` / `URL.revokeObjectURL`.
pub trait PreviewAllocator<P> {
    fn allocate(&self, payload: &P) -> String;
    fn release(&self, preview_url: &str);
}

// =============================================================================
// Accept Policy
// =============================================================================

/// Which files the collector takes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptPolicy {
    /// Accepted MIME prefixes, e.g. `image/`.
    pub mime_prefixes: Vec<String>,
    /// Accepted extensions (lowercase, no dot) when the MIME type is unknown.
    pub extensions: Vec<String>,
    pub max_file_bytes: u64,
    pub max_files: usize,
}

impl AcceptPolicy {
    /// Photos only: JPEG, PNG, GIF, BMP, TIFF; 10 MB each; at most 10.
    pub fn photos() -> Self {
        Self {
            mime_prefixes: vec!["image/".to_string()],
            extensions: ["jpeg", "jpg", "png", "gif", "bmp", "tiff", "tif", "webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_file_bytes: 10 * 1024 * 1024,
            max_files: 10,
        }
    }

    /// Photos and videos, as on the upscaler page: 100 MB each.
    pub fn photos_and_videos() -> Self {
        let mut policy = Self::photos();
        policy.mime_prefixes.push("video/".to_string());
        policy
            .extensions
            .extend(["mp4", "avi", "mov", "mkv"].iter().map(|s| s.to_string()));
        policy.max_file_bytes = 100 * 1024 * 1024;
        policy
    }

    /// `accept` attribute for an `<input type="file">`.
    pub fn accept_attribute(&self) -> String {
        self.mime_prefixes
            .iter()
            .map(|p| format!("{}*", p))
            .chain(self.extensions.iter().map(|e| format!(".{}", e)))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Check one candidate against the policy, given how many files are
    /// already collected.
    pub fn check<P>(&self, candidate: &FileCandidate<P>, collected: usize) -> Result<(), RejectReason> {
        if candidate.size_bytes == 0 {
            return Err(RejectReason::Empty);
        }

        let mime = candidate.mime_type.to_ascii_lowercase();
        let mime_ok = !mime.is_empty() && self.mime_prefixes.iter().any(|p| mime.starts_with(p.as_str()));
        let ext_ok = candidate
            .extension()
            .is_some_and(|ext| self.extensions.iter().any(|e| *e == ext));
        if !mime_ok && !ext_ok {
            return Err(RejectReason::UnsupportedType { mime_type: candidate.mime_type.clone() });
        }

        if candidate.size_bytes > self.max_file_bytes {
            return Err(RejectReason::TooLarge {
                size_bytes: candidate.size_bytes,
                max_bytes: self.max_file_bytes,
            });
        }

        if collected >= self.max_files {
            return Err(RejectReason::LimitReached { max_files: self.max_files });
        }

        Ok(())
    }
}

impl Default for AcceptPolicy {
    fn default() -> Self {
        Self::photos()
    }
}

// =============================================================================
// Credits
// =============================================================================

/// Restoration credits of the current user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credits {
    pub remaining: u32,
    pub total: u32,
}

impl Credits {
    pub fn new(remaining: u32, total: u32) -> Self {
        Self { remaining: remaining.min(total), total }
    }

    /// Effectively unlimited (paid tier, CLI use).
    pub fn unlimited() -> Self {
        Self { remaining: u32::MAX, total: u32::MAX }
    }

    pub fn covers(&self, count: usize) -> bool {
        count as u64 <= self.remaining as u64
    }

    /// Fraction of credits already used, for the credits bar.
    pub fn used_fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.total.saturating_sub(self.remaining)) / f64::from(self.total)
    }
}

impl Default for Credits {
    /// Free tier.
    fn default() -> Self {
        Self::new(3, 5)
    }
}

// =============================================================================
// Collector
// =============================================================================

/// A candidate the collector refused.
#[derive(Clone, Debug, PartialEq)]
pub struct Rejection {
    pub name: String,
    pub reason: RejectReason,
}

impl From<Rejection> for CollectError {
    fn from(r: Rejection) -> Self {
        CollectError::Rejected { name: r.name, reason: r.reason }
    }
}

/// Outcome of one drop / pick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DropOutcome {
    pub accepted: Vec<ItemId>,
    pub rejected: Vec<Rejection>,
}

/// Holds accepted files until they are handed off.
#[derive(Clone, Debug)]
pub struct UploadCollector<P, A> {
    policy: AcceptPolicy,
    previews: A,
    items: Vec<PendingItem<P>>,
}

impl<P, A: PreviewAllocator<P>> UploadCollector<P, A> {
    pub fn new(policy: AcceptPolicy, previews: A) -> Self {
        Self {
            policy,
            previews,
            items: Vec::new(),
        }
    }

    pub fn policy(&self) -> &AcceptPolicy {
        &self.policy
    }

    /// Offer dropped or picked files. Accepted ones are appended in order.
    pub fn offer(&mut self, candidates: impl IntoIterator<Item = FileCandidate<P>>) -> DropOutcome {
        let mut outcome = DropOutcome::default();

        for candidate in candidates {
            if let Err(reason) = self.policy.check(&candidate, self.items.len()) {
                log::warn!("Rejected '{}': {}", candidate.name, reason);
                outcome.rejected.push(Rejection { name: candidate.name, reason });
                continue;
            }

            let preview_url = self.previews.allocate(&candidate.payload);
            let item = PendingItem {
                id: ItemId::new(),
                payload: candidate.payload,
                preview_url,
                original_name: candidate.name,
                size_bytes: candidate.size_bytes,
                mime_type: candidate.mime_type,
            };
            log::debug!("Accepted '{}' as {}", item.original_name, item.id);
            outcome.accepted.push(item.id.clone());
            self.items.push(item);
        }

        outcome
    }

    /// Offer exactly one file, failing with the rejection reason.
    pub fn offer_one(&mut self, candidate: FileCandidate<P>) -> CollectResult<ItemId> {
        let mut outcome = self.offer([candidate]);
        match outcome.rejected.pop() {
            Some(rejection) => Err(rejection.into()),
            None => outcome.accepted.pop().ok_or(CollectError::NothingToSubmit),
        }
    }

    /// Remove a collected file and release its preview.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let Some(pos) = self.items.iter().position(|item| &item.id == id) else {
            return false;
        };
        let item = self.items.remove(pos);
        self.previews.release(&item.preview_url);
        true
    }

    /// Remove everything, releasing every preview.
    pub fn clear(&mut self) {
        for item in self.items.drain(..) {
            self.previews.release(&item.preview_url);
        }
    }

    pub fn items(&self) -> &[PendingItem<P>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.items.iter().map(|item| item.size_bytes).sum()
    }

    /// Estimated processing time, in whole minutes (rounded up).
    pub fn estimated_minutes(&self) -> u64 {
        (self.items.len() as u64 * ESTIMATED_SECONDS_PER_ITEM).div_ceil(60)
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self, credits: &Credits) -> bool {
        self.check_submit(credits).is_ok()
    }

    pub fn check_submit(&self, credits: &Credits) -> CollectResult<()> {
        if self.items.is_empty() {
            return Err(CollectError::NothingToSubmit);
        }
        if !credits.covers(self.items.len()) {
            return Err(CollectError::InsufficientCredits {
                needed: self.items.len(),
                remaining: credits.remaining,
            });
        }
        Ok(())
    }

    /// Hand the collected files over. Previews stay allocated: the processing
    /// view still shows them.
    pub fn into_items(self) -> Vec<PendingItem<P>> {
        self.items
    }

    /// Take the collected files out, leaving the collector empty and reusable.
    pub fn take_items(&mut self) -> Vec<PendingItem<P>> {
        std::mem::take(&mut self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every allocation and release.
    #[derive(Clone, Default)]
    struct RecordingPreviews {
        next: Rc<RefCell<u32>>,
        released: Rc<RefCell<Vec<String>>>,
    }

    impl PreviewAllocator<&'static str> for RecordingPreviews {
        fn allocate(&self, payload: &&'static str) -> String {
            let mut next = self.next.borrow_mut();
            *next += 1;
            format!("blob:{}-{}", payload, next)
        }

        fn release(&self, preview_url: &str) {
            self.released.borrow_mut().push(preview_url.to_string());
        }
    }

    fn photo(name: &'static str, size: u64) -> FileCandidate<&'static str> {
        FileCandidate::new(name, name, size, "image/jpeg")
    }

    fn collector() -> (UploadCollector<&'static str, RecordingPreviews>, RecordingPreviews) {
        let previews = RecordingPreviews::default();
        (UploadCollector::new(AcceptPolicy::photos(), previews.clone()), previews)
    }

    #[test]
    fn test_empty_drop_is_noop() {
        let (mut c, _) = collector();
        let outcome = c.offer(Vec::new());
        assert!(outcome.accepted.is_empty());
        assert!(outcome.rejected.is_empty());
        assert!(c.is_empty());
    }

    #[test]
    fn test_accepts_photos_in_order() {
        let (mut c, _) = collector();
        let outcome = c.offer([photo("a.jpg", 100), photo("b.jpg", 200)]);
        assert_eq!(outcome.accepted.len(), 2);
        assert_eq!(c.items()[0].original_name, "a.jpg");
        assert_eq!(c.items()[1].original_name, "b.jpg");
        assert_eq!(c.total_bytes(), 300);
        assert_ne!(c.items()[0].preview_url, c.items()[1].preview_url);
    }

    #[test]
    fn test_rejections_carry_reasons() {
        let (mut c, _) = collector();
        let outcome = c.offer([
            FileCandidate::new("x", "notes.txt", 10, "text/plain"),
            photo("huge.jpg", 11 * 1024 * 1024),
            photo("empty.jpg", 0),
            photo("ok.jpg", 10),
        ]);
        assert_eq!(outcome.accepted.len(), 1);
        assert_eq!(outcome.rejected.len(), 3);
        assert!(matches!(outcome.rejected[0].reason, RejectReason::UnsupportedType { .. }));
        assert!(matches!(outcome.rejected[1].reason, RejectReason::TooLarge { .. }));
        assert_eq!(outcome.rejected[2].reason, RejectReason::Empty);
    }

    #[test]
    fn test_extension_fallback_when_mime_unknown() {
        let (mut c, _) = collector();
        let outcome = c.offer([FileCandidate::new("x", "scan.TIFF", 10, "")]);
        assert_eq!(outcome.accepted.len(), 1);
    }

    #[test]
    fn test_video_needs_video_policy() {
        let video = || FileCandidate::new("v", "clip.mp4", 50 * 1024 * 1024, "video/mp4");

        let (mut c, _) = collector();
        assert_eq!(c.offer([video()]).rejected.len(), 1);

        let mut c = UploadCollector::new(AcceptPolicy::photos_and_videos(), RecordingPreviews::default());
        assert_eq!(c.offer([video()]).accepted.len(), 1);
    }

    #[test]
    fn test_file_limit() {
        let (mut c, _) = collector();
        let names = ["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg", "6.jpg", "7.jpg", "8.jpg", "9.jpg", "10.jpg", "11.jpg"];
        let outcome = c.offer(names.iter().map(|n| photo(n, 1)));
        assert_eq!(outcome.accepted.len(), 10);
        assert_eq!(outcome.rejected[0].name, "11.jpg");
        assert_eq!(outcome.rejected[0].reason, RejectReason::LimitReached { max_files: 10 });
    }

    #[test]
    fn test_remove_releases_preview_once() {
        let (mut c, previews) = collector();
        c.offer([photo("a.jpg", 1), photo("b.jpg", 1)]);
        let id = c.items()[0].id.clone();
        let url = c.items()[0].preview_url.clone();

        assert!(c.remove(&id));
        assert!(!c.remove(&id));
        assert_eq!(*previews.released.borrow(), vec![url]);
        assert!(c.items().iter().all(|item| item.id != id));
    }

    #[test]
    fn test_clear_releases_all() {
        let (mut c, previews) = collector();
        c.offer([photo("a.jpg", 1), photo("b.jpg", 1)]);
        c.clear();
        assert!(c.is_empty());
        assert_eq!(previews.released.borrow().len(), 2);
    }

    #[test]
    fn test_into_items_keeps_previews() {
        let (mut c, previews) = collector();
        c.offer([photo("a.jpg", 1)]);
        let items = c.into_items();
        assert_eq!(items.len(), 1);
        assert!(previews.released.borrow().is_empty());
    }

    #[test]
    fn test_submit_gate() {
        let (mut c, _) = collector();
        let credits = Credits::new(3, 5);
        assert!(matches!(c.check_submit(&credits), Err(CollectError::NothingToSubmit)));

        c.offer([photo("1.jpg", 1), photo("2.jpg", 1), photo("3.jpg", 1)]);
        assert!(c.can_submit(&credits));

        c.offer([photo("4.jpg", 1)]);
        assert!(matches!(
            c.check_submit(&credits),
            Err(CollectError::InsufficientCredits { needed: 4, remaining: 3 })
        ));
        assert!(c.can_submit(&Credits::unlimited()));
    }

    #[test]
    fn test_estimated_minutes() {
        let (mut c, _) = collector();
        assert_eq!(c.estimated_minutes(), 0);
        c.offer([photo("1.jpg", 1)]);
        assert_eq!(c.estimated_minutes(), 1);
        c.offer([photo("2.jpg", 1), photo("3.jpg", 1)]);
        assert_eq!(c.estimated_minutes(), 2);
    }

    #[test]
    fn test_credits_fraction() {
        assert!((Credits::new(3, 5).used_fraction() - 0.4).abs() < 1e-9);
        assert_eq!(Credits::new(0, 0).used_fraction(), 0.0);
    }

    #[test]
    fn test_credits_fraction_with_surplus() {
        let credits = Credits { remaining: 7, total: 5 };
        assert_eq!(credits.used_fraction(), 0.0);
    }

    #[test]
    fn test_accept_attribute() {
        let attr = AcceptPolicy::photos().accept_attribute();
        assert!(attr.starts_with("image/*,"));
        assert!(attr.contains(".png"));
    }
}
