//! # File Attachments
//!
//! Turns a path typed in the file prompt into the name + media type a chat
//! message records. Nothing is read or uploaded beyond the file's existence.
//!
//! Accepted: `image/*`, `video/*`, `audio/*`, `.pdf`, `.doc`, `.docx`.

use std::fmt;
use std::path::{Path, PathBuf};

/// Extensions accepted regardless of their guessed media type.
const ACCEPTED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];
const ACCEPTED_PREFIXES: [&str; 3] = ["image/", "video/", "audio/"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub file_name: String,
    pub media_type: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum AttachError {
    Missing(String),
    Unsupported { file_name: String, media_type: String },
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachError::Missing(path) => write!(f, "no such file: {path}"),
            AttachError::Unsupported {
                file_name,
                media_type,
            } => write!(f, "unsupported file type {media_type} for {file_name}"),
        }
    }
}

impl std::error::Error for AttachError {}

/// Classify a name without touching the filesystem.
pub fn classify(file_name: &str) -> Result<PickedFile, AttachError> {
    let media_type = mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let accepted = ACCEPTED_PREFIXES.iter().any(|p| media_type.starts_with(p))
        || extension
            .as_deref()
            .is_some_and(|e| ACCEPTED_EXTENSIONS.contains(&e));

    if accepted {
        Ok(PickedFile {
            file_name: file_name.to_string(),
            media_type,
        })
    } else {
        Err(AttachError::Unsupported {
            file_name: file_name.to_string(),
            media_type,
        })
    }
}

/// Resolve a user-entered path to a pickable file.
/// A leading `~/` is expanded to the home directory.
pub fn pick(path: &str) -> Result<PickedFile, AttachError> {
    let trimmed = path.trim();
    let expanded = match (trimmed.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(trimmed),
    };
    let path = expanded.as_path();
    if trimmed.is_empty() || !path.is_file() {
        return Err(AttachError::Missing(trimmed.to_string()));
    }
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AttachError::Missing(trimmed.to_string()))?;
    classify(file_name)
}
