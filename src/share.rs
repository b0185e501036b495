//! Social-share link construction and the clipboard collaborator.
//!
//! Share targets receive the current page URL and article title as
//! query-encoded parameters. The clipboard is a trait so hosts plug in
//! whatever mechanism they have; a failed write is surfaced only as a
//! transient feedback state that auto-reverts, never as an error to the
//! caller.

use std::time::{Duration, Instant};

use thiserror::Error;

/// How long the copy feedback (check mark / failure icon) stays before
/// reverting to the default link icon.
pub const FEEDBACK_REVERT_AFTER: Duration = Duration::from_secs(2);

/// Percent-encodes a component for embedding in an outbound URL.
///
/// Unreserved characters pass through; everything else (including spaces)
/// is `%XX`-encoded, so the output is valid in `mailto:` links as well as
/// HTTP query strings.
pub fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Outbound share URLs for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    pub twitter: String,
    pub facebook: String,
    pub linkedin: String,
    pub email: String,
}

/// Builds the share targets for the current page URL and article title.
pub fn share_links(page_url: &str, title: &str) -> ShareLinks {
    let url = encode_component(page_url);
    let text = encode_component(title);

    ShareLinks {
        twitter: format!("https://twitter.com/intent/tweet?url={url}&text={text}"),
        facebook: format!("https://www.facebook.com/sharer/sharer.php?u={url}"),
        linkedin: format!("https://www.linkedin.com/shareArticle?mini=true&url={url}&title={text}"),
        email: format!(
            "mailto:?subject={text}&body=I%20thought%20you%20might%20find%20this%20interesting%3A%20{url}"
        ),
    }
}

/// Renders the share-button block appended below an article.
pub fn share_buttons_html(links: &ShareLinks) -> String {
    let anchor = |network: &str, href: &str, label: &str| {
        format!(
            "<a class=\"social-share-button {network}\" href=\"{href}\" target=\"_blank\" \
             rel=\"noopener noreferrer\" title=\"Share on {label}\">{label}</a>"
        )
    };

    format!(
        "<div class=\"social-share-container\">\
         <h4 class=\"social-share-title\">Share This Article</h4>\
         <div class=\"social-share-buttons\">\
         {}{}{}\
         <a class=\"social-share-button email\" href=\"{}\" title=\"Share by Email\">Email</a>\
         <button class=\"social-share-button copy-link\" data-network=\"copy\" title=\"Copy link\">Copy Link</button>\
         </div></div>",
        anchor("twitter", &links.twitter, "Twitter"),
        anchor("facebook", &links.facebook, "Facebook"),
        anchor("linkedin", &links.linkedin, "LinkedIn"),
        links.email,
    )
}

// ============================================================================
// Clipboard
// ============================================================================

#[derive(Debug, Error)]
#[error("Clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Host-provided clipboard. Writing is a suspension-free collaborator call;
/// the session only ever consumes it through [`copy_page_url`].
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// What the copy attempt produced, for the transient feedback icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

/// Transient feedback after a copy attempt, auto-reverting after
/// [`FEEDBACK_REVERT_AFTER`].
#[derive(Debug, Clone, Copy)]
pub struct CopyFeedback {
    outcome: CopyOutcome,
    since: Instant,
}

impl CopyFeedback {
    pub fn outcome(&self) -> CopyOutcome {
        self.outcome
    }

    /// Icon name the UI shows while the feedback is live.
    pub fn icon(&self) -> &'static str {
        match self.outcome {
            CopyOutcome::Copied => "check",
            CopyOutcome::Failed => "warning",
        }
    }

    /// Whether the feedback has aged past the revert delay.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.since) >= FEEDBACK_REVERT_AFTER
    }
}

/// Copies the current page URL, converting any failure into feedback state.
/// Never returns an error.
pub fn copy_page_url(clipboard: &mut dyn Clipboard, page_url: &str) -> CopyFeedback {
    let outcome = match clipboard.write_text(page_url) {
        Ok(()) => CopyOutcome::Copied,
        Err(e) => {
            tracing::warn!(error = %e, "Clipboard write failed");
            CopyOutcome::Failed
        }
    };
    CopyFeedback {
        outcome,
        since: Instant::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeClipboard {
        content: Option<String>,
        fail: bool,
    }

    impl Clipboard for FakeClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError("denied".to_string()));
            }
            self.content = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn component_encoding_covers_spaces_and_reserved() {
        assert_eq!(encode_component("zero trust"), "zero%20trust");
        assert_eq!(encode_component("a&b=c?d"), "a%26b%3Dc%3Fd");
        assert_eq!(encode_component("plain-text_ok.~"), "plain-text_ok.~");
    }

    #[test]
    fn share_urls_encode_page_url_and_title() {
        let links = share_links("https://example.com/?article=2", "Zero Trust & You");
        assert_eq!(
            links.twitter,
            "https://twitter.com/intent/tweet?url=https%3A%2F%2Fexample.com%2F%3Farticle%3D2&text=Zero%20Trust%20%26%20You"
        );
        assert!(links.facebook.contains("u=https%3A%2F%2Fexample.com"));
        assert!(links.linkedin.contains("title=Zero%20Trust%20%26%20You"));
        assert!(links.email.starts_with("mailto:?subject=Zero%20Trust%20%26%20You&body="));
    }

    #[test]
    fn share_buttons_include_every_network_and_copy() {
        let links = share_links("https://example.com/", "Title");
        let html = share_buttons_html(&links);
        for class in ["twitter", "facebook", "linkedin", "email", "copy-link"] {
            assert!(html.contains(class), "missing {class}");
        }
        assert!(html.contains("rel=\"noopener noreferrer\""));
    }

    #[test]
    fn copy_success_yields_copied_feedback() {
        let mut clip = FakeClipboard { content: None, fail: false };
        let feedback = copy_page_url(&mut clip, "https://example.com/?article=2");
        assert_eq!(feedback.outcome(), CopyOutcome::Copied);
        assert_eq!(feedback.icon(), "check");
        assert_eq!(clip.content.as_deref(), Some("https://example.com/?article=2"));
    }

    #[test]
    fn copy_failure_is_feedback_not_error() {
        let mut clip = FakeClipboard { content: None, fail: true };
        let feedback = copy_page_url(&mut clip, "https://example.com/");
        assert_eq!(feedback.outcome(), CopyOutcome::Failed);
        assert_eq!(feedback.icon(), "warning");
    }

    #[test]
    fn feedback_expires_after_revert_delay() {
        let mut clip = FakeClipboard { content: None, fail: false };
        let feedback = copy_page_url(&mut clip, "x");
        let now = Instant::now();
        assert!(!feedback.is_expired(now));
        assert!(feedback.is_expired(now + FEEDBACK_REVERT_AFTER));
    }
}
