//! Loading documents and draft attachments from disk
//!
//! Documents must be text under the size limit; attachments may be binary and
//! get a mime type from their extension.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use crate::gateway::Attachment;

/// Maximum document or attachment size in bytes (20 MB)
pub const MAX_FILE_SIZE: u64 = 20 * 1024 * 1024;

/// Errors that can occur when reading a document or attachment
#[derive(Debug, Clone)]
pub enum FileOpenError {
    NotFound,
    PermissionDenied,
    IsDirectory,
    /// Document appears to be binary (contains null bytes)
    BinaryFile,
    TooLarge { size_mb: f64 },
    IoError(String),
}

impl FileOpenError {
    /// Get a user-friendly error message
    pub fn user_message(&self, filename: &str) -> String {
        match self {
            Self::NotFound => format!("File not found: {}", filename),
            Self::PermissionDenied => format!("Permission denied: {}", filename),
            Self::IsDirectory => format!("Cannot open directory: {}", filename),
            Self::BinaryFile => format!("Cannot open binary file as a document: {}", filename),
            Self::TooLarge { size_mb } => format!(
                "{} is too large ({:.1} MB, max {} MB)",
                filename,
                size_mb,
                MAX_FILE_SIZE / (1024 * 1024)
            ),
            Self::IoError(msg) => format!("Error opening {}: {}", filename, msg),
        }
    }
}

impl std::fmt::Display for FileOpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "file not found"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::IsDirectory => write!(f, "is a directory"),
            Self::BinaryFile => write!(f, "binary file"),
            Self::TooLarge { size_mb } => write!(f, "file too large ({:.1} MB)", size_mb),
            Self::IoError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FileOpenError {}

fn io_error(e: std::io::Error) -> FileOpenError {
    match e.kind() {
        std::io::ErrorKind::NotFound => FileOpenError::NotFound,
        std::io::ErrorKind::PermissionDenied => FileOpenError::PermissionDenied,
        _ => FileOpenError::IoError(e.to_string()),
    }
}

/// Check existence, kind and size before reading
pub fn validate_file(path: &Path) -> Result<(), FileOpenError> {
    let metadata = fs::metadata(path).map_err(io_error)?;

    if metadata.is_dir() {
        return Err(FileOpenError::IsDirectory);
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(FileOpenError::TooLarge {
            size_mb: metadata.len() as f64 / (1024.0 * 1024.0),
        });
    }

    Ok(())
}

/// Check if a file is likely binary by scanning the first 8KB for null bytes
pub fn is_likely_binary(path: &Path) -> bool {
    let Ok(mut file) = File::open(path) else {
        return false;
    };

    let mut buffer = [0u8; 8192];
    let Ok(bytes_read) = file.read(&mut buffer) else {
        return false;
    };

    buffer[..bytes_read].contains(&0)
}

/// Read a text document to seed the session
pub fn read_document(path: &Path) -> Result<String, FileOpenError> {
    validate_file(path)?;
    if is_likely_binary(path) {
        return Err(FileOpenError::BinaryFile);
    }
    fs::read_to_string(path).map_err(io_error)
}

/// Extension → mime type for draft attachments
const MIME_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("pdf", "application/pdf"),
    ("txt", "text/plain"),
    ("md", "text/markdown"),
];

/// Guess a mime type from the file extension
pub fn mime_type_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .and_then(|ext| {
            MIME_TYPES
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, mime)| *mime)
        })
        .unwrap_or("application/octet-stream")
}

/// Read a file as a draft attachment
pub fn read_attachment(path: &Path) -> Result<Attachment, FileOpenError> {
    validate_file(path)?;
    let data = fs::read(path).map_err(io_error)?;
    Ok(Attachment {
        mime_type: mime_type_for(path).to_string(),
        data,
    })
}

/// Get the filename from a path for display in error messages
pub fn filename_for_display(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
