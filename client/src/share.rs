//! Carrying out share actions on the desktop.

use tracing::debug;

use pastperfect::ShareAction;

use crate::error::{ClientError, ClientResult};

/// What actually happened for a share action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShareOutcome {
    /// URL to open in a browser or mail client.
    Link(String),
    /// Text placed on the system clipboard.
    Copied(String),
    /// No clipboard: text printed instead.
    CopyUnavailable(String),
}

impl ShareOutcome {
    /// Line shown to the user.
    pub fn message(&self) -> String {
        match self {
            ShareOutcome::Link(url) => format!("🔗 {}", url),
            ShareOutcome::Copied(_) => "📋 Copied!".to_string(),
            ShareOutcome::CopyUnavailable(text) => {
                format!("📋 Clipboard unavailable, copy this text:\n{}", text)
            }
        }
    }
}

/// Perform a share action.
pub fn perform(action: ShareAction) -> ShareOutcome {
    perform_with(action, copy_to_clipboard)
}

/// Perform several share actions, touching the clipboard at most once.
///
/// Later copy actions reuse the first copy's outcome when their text is the
/// same, and are printed otherwise.
pub fn perform_each(actions: impl IntoIterator<Item = ShareAction>) -> Vec<ShareOutcome> {
    perform_each_with(actions, copy_to_clipboard)
}

fn perform_with(action: ShareAction, copy: impl FnOnce(&str) -> ClientResult<()>) -> ShareOutcome {
    match action {
        ShareAction::OpenUrl(url) => ShareOutcome::Link(url),
        ShareAction::CopyText(text) => match copy(&text) {
            Ok(()) => ShareOutcome::Copied(text),
            Err(e) => {
                debug!(error = %e, "Clipboard copy failed");
                ShareOutcome::CopyUnavailable(text)
            }
        },
    }
}

fn perform_each_with(
    actions: impl IntoIterator<Item = ShareAction>,
    mut copy: impl FnMut(&str) -> ClientResult<()>,
) -> Vec<ShareOutcome> {
    let mut copied: Option<ShareOutcome> = None;
    let mut outcomes = Vec::new();

    for action in actions {
        if let (ShareAction::CopyText(text), Some(first)) = (&action, &copied) {
            let reused = match first {
                ShareOutcome::Copied(done) if done == text => first.clone(),
                _ => ShareOutcome::CopyUnavailable(text.clone()),
            };
            outcomes.push(reused);
            continue;
        }

        let outcome = perform_with(action, &mut copy);
        if matches!(outcome, ShareOutcome::Copied(_) | ShareOutcome::CopyUnavailable(_)) {
            copied = Some(outcome.clone());
        }
        outcomes.push(outcome);
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pastperfect::{share_action, SharePlatform};

    #[test]
    fn test_url_share_gives_link() {
        let action = share_action(SharePlatform::Twitter, Some("photo.jpg"), "https://pastperfect.test");
        let outcome = perform(action);
        match outcome {
            ShareOutcome::Link(url) => assert!(url.starts_with("https://twitter.com/intent/tweet?text=")),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_copy_falls_back_to_text() {
        // Headless CI has no clipboard; both outcomes carry the text
        let action = share_action(SharePlatform::Copy, None, "https://pastperfect.test");
        match perform(action) {
            ShareOutcome::Copied(text) | ShareOutcome::CopyUnavailable(text) => {
                assert!(text.ends_with("https://pastperfect.test"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(ShareOutcome::Copied("x".into()).message(), "📋 Copied!");
        assert!(ShareOutcome::Link("https://a".into()).message().contains("https://a"));
        assert!(ShareOutcome::CopyUnavailable("hello".into()).message().ends_with("hello"));
    }

    #[test]
    fn test_all_platforms_copy_once() {
        let actions = SharePlatform::ALL
            .iter()
            .map(|p| share_action(*p, Some("photo.jpg"), "https://pastperfect.test"));
        let mut copies = 0;
        let outcomes = perform_each_with(actions, |_| {
            copies += 1;
            Ok(())
        });

        assert_eq!(copies, 1);
        assert_eq!(outcomes.len(), SharePlatform::ALL.len());
        let copied = outcomes.iter().filter(|o| matches!(o, ShareOutcome::Copied(_))).count();
        assert_eq!(copied, 2);
    }

    #[test]
    fn test_different_copy_text_is_printed() {
        let actions = vec![
            ShareAction::CopyText("first".into()),
            ShareAction::CopyText("second".into()),
        ];
        let outcomes = perform_each_with(actions, |_| Ok(()));
        assert_eq!(outcomes[0], ShareOutcome::Copied("first".into()));
        assert_eq!(outcomes[1], ShareOutcome::CopyUnavailable("second".into()));
    }
}
