//! Unsent request mail messages (`.eml`).
//!
//! The message carries the drawing archive, the file overview and, when
//! discovery found one, the request PDF as base64 attachments. Mail clients
//! open it as a draft because of the `X-Unsent: 1` header.

use std::fs;
use std::path::{Path, PathBuf};

use drawpack_core::safe_title;
use drawpack_model::Mode;
use mail_builder::MessageBuilder;
use mail_builder::headers::raw::Raw;
use tracing::{debug, info};

use crate::bundle::BundlePlan;
use crate::error::{ReportError, Result};
use crate::mail::{TemplateCache, mail_subject};

/// Content type used for every attachment.
pub const ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

/// A rendered request message and its suggested file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEml {
    /// `RFQ<id>[ - <title>].eml`.
    pub file_name: String,
    pub subject: String,
    /// Attachment names in message order.
    pub attachments: Vec<String>,
    pub bytes: Vec<u8>,
}

impl RequestEml {
    /// Writes the message to `target`, or into it when `target` is a directory.
    pub fn save(&self, target: &Path) -> Result<PathBuf> {
        let output_path = if target.is_dir() {
            target.join(&self.file_name)
        } else {
            target.to_path_buf()
        };
        fs::write(&output_path, &self.bytes).map_err(|source| ReportError::FileWrite {
            path: output_path.clone(),
            source,
        })?;
        info!(output = %output_path.display(), bytes = self.bytes.len(), "request mail written");
        Ok(output_path)
    }
}

/// `RFQ<id>[ - <title>].eml`, with file-name-unsafe title characters replaced.
pub fn eml_file_name(id: &str, title: &str) -> String {
    format!("{}.eml", mail_subject(id, &safe_title(title)))
}

/// Builds the unsent request message for a planned bundle.
///
/// Purchase orders are not mailed and yield `None`. The document list stays
/// out of the message; every other bundle member is attached in bundle order.
pub fn draft_request_eml(
    plan: &BundlePlan,
    id: &str,
    title: &str,
    templates: &TemplateCache,
) -> Result<Option<RequestEml>> {
    if plan.mode != Mode::Rfq {
        return Ok(None);
    }
    let subject = mail_subject(id, &safe_title(title));
    let file_name = eml_file_name(id, title);

    let attached: Vec<_> = plan
        .members
        .iter()
        .filter(|member| member.name != plan.document_list.file_name)
        .collect();

    let mut message = MessageBuilder::new()
        .subject(subject.as_str())
        .header("X-Unsent", Raw::new("1"))
        .text_body(templates.body());
    for member in &attached {
        debug!(attachment = %member.name, bytes = member.bytes.len(), "attaching");
        message = message.attachment(
            ATTACHMENT_CONTENT_TYPE,
            member.name.as_str(),
            member.bytes.as_slice(),
        );
    }
    let bytes = message
        .write_to_vec()
        .map_err(|source| ReportError::Eml {
            name: file_name.clone(),
            source,
        })?;

    Ok(Some(RequestEml {
        file_name,
        subject,
        attachments: attached.iter().map(|member| member.name.clone()).collect(),
        bytes,
    }))
}
