//! File selection: the in-memory candidate handed to the session.
//!
//! A [`SelectedFile`] mirrors what a platform file picker delivers — a name,
//! a *declared* MIME type, and the raw bytes. The MIME type is declared, not
//! sniffed: selection accepts or rejects a candidate purely on the type it
//! claims, exactly like a browser form does. A terminal has no picker, so
//! [`SelectedFile::open`] emulates one by reading a path and declaring the
//! type from the file extension.

use crate::error::Pdf2XmlError;
use bytes::Bytes;
use std::path::Path;
use tracing::debug;

/// The only MIME type the conversion service accepts.
pub const PDF_MIME: &str = "application/pdf";

/// A user-chosen file held in memory prior to upload.
///
/// Cheap to clone: the payload is a reference-counted [`Bytes`] buffer, so a
/// clone copies pointers, not the document.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    /// File name as presented to the backend (multipart `filename`).
    pub name: String,
    /// MIME type the candidate declares for itself.
    pub declared_mime: String,
    /// Raw file content.
    pub bytes: Bytes,
}

impl SelectedFile {
    /// Assemble a candidate from parts, as a picker change event would.
    pub fn from_parts(
        name: impl Into<String>,
        declared_mime: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_mime: declared_mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a candidate from disk, declaring its MIME type from the extension.
    ///
    /// # Errors
    /// [`Pdf2XmlError::FileNotFound`] / [`Pdf2XmlError::PermissionDenied`]
    /// when the path cannot be read. Note that a readable non-PDF file is
    /// *not* an error here — declaring the wrong type is the picker's job,
    /// rejecting it is [`crate::session::ConverterSession::select_file`]'s.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, Pdf2XmlError> {
        let path = path.as_ref();

        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Pdf2XmlError::FileNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => Pdf2XmlError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Pdf2XmlError::Internal(format!("reading '{}': {}", path.display(), e)),
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "file".to_string());
        let declared_mime = mime_for_path(path);

        debug!(
            "Selected '{}' ({} bytes, declared {})",
            name,
            bytes.len(),
            declared_mime
        );

        Ok(Self {
            name,
            declared_mime,
            bytes: Bytes::from(bytes),
        })
    }

    /// Whether the candidate declares itself as a PDF.
    pub fn is_pdf(&self) -> bool {
        self.declared_mime == PDF_MIME
    }

    /// File size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Size formatted the way the upload form shows it, e.g. `"2.00 MB"`.
    pub fn size_display(&self) -> String {
        format!("{:.2} MB", self.bytes.len() as f64 / 1024.0 / 1024.0)
    }
}

/// Declare a MIME type from the file extension, the way a browser picker does.
fn mime_for_path(path: &Path) -> String {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => PDF_MIME,
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "xml" => "application/xml",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
    .to_string()
}
