//! Request mail drafts.
//!
//! The body template is read at most once per [`TemplateCache`]. Callers
//! own the cache and pass it by reference wherever a draft is needed.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use drawpack_model::Mode;
use tracing::{debug, warn};

/// Body used when no template file is configured or it cannot be read.
pub const FALLBACK_TEMPLATE: &str = "Hello,\n\nPlease find the RFQ package attached.\n\nRegards,\n";

/// Mail body template, populated on first use and fixed afterwards.
#[derive(Debug, Default)]
pub struct TemplateCache {
    path: Option<PathBuf>,
    body: OnceLock<String>,
}

impl TemplateCache {
    /// Cache backed by an optional template file.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            body: OnceLock::new(),
        }
    }

    /// Cache that always yields `body`.
    pub fn with_body(body: impl Into<String>) -> Self {
        let cache = Self::default();
        let _ = cache.body.set(body.into());
        cache
    }

    /// Template text; the file is read on the first call only.
    pub fn body(&self) -> &str {
        self.body.get_or_init(|| load_template(self.path.as_deref()))
    }

    pub fn is_loaded(&self) -> bool {
        self.body.get().is_some()
    }
}

fn load_template(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return FALLBACK_TEMPLATE.to_string();
    };
    match std::fs::read_to_string(path) {
        Ok(body) => {
            debug!(template = %path.display(), "loaded mail template");
            body
        }
        Err(error) => {
            warn!(template = %path.display(), %error, "mail template unavailable, using fallback");
            FALLBACK_TEMPLATE.to_string()
        }
    }
}

/// Subject and body of a request mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDraft {
    pub subject: String,
    pub body: String,
}

impl MailDraft {
    /// `mailto:` link with percent-encoded subject and body.
    pub fn mailto(&self) -> String {
        format!(
            "mailto:?subject={}&body={}",
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body)
        )
    }
}

/// `RFQ<id>`, followed by ` - <title>` when a title is known.
pub fn mail_subject(id: &str, title: &str) -> String {
    let title = title.trim();
    let subject = if title.is_empty() {
        format!("RFQ{id}")
    } else {
        format!("RFQ{id} - {title}")
    };
    subject.trim().to_string()
}

/// Drafts the request mail; only request packages are mailed.
pub fn draft_request_mail(
    mode: Mode,
    id: &str,
    title: &str,
    templates: &TemplateCache,
) -> Option<MailDraft> {
    if mode != Mode::Rfq {
        return None;
    }
    Some(MailDraft {
        subject: mail_subject(id, title),
        body: templates.body().to_string(),
    })
}
