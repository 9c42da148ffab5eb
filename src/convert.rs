//! One-shot conversion entry point.
//!
//! [`ConverterSession`](crate::session::ConverterSession) is the right tool
//! when an interaction layer needs the full select/convert/download/preview
//! state machine. Scripts and services that just want "this path in, a
//! conversion result out" can call [`convert_file`] instead and handle the
//! typed error themselves.

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::Pdf2XmlError;
use crate::input::SelectedFile;
use crate::protocol::ConversionResult;
use std::path::Path;

/// Read a PDF from `path`, upload it, and return the conversion result.
///
/// Unlike the session this returns the typed error instead of recording a
/// user-facing message, so callers can distinguish a missing file from a
/// backend rejection.
///
/// # Errors
/// - [`Pdf2XmlError::FileNotFound`] / [`Pdf2XmlError::PermissionDenied`] —
///   the path cannot be read
/// - [`Pdf2XmlError::NotAPdf`] — the file does not declare `application/pdf`
/// - [`Pdf2XmlError::RequestFailed`] / [`Pdf2XmlError::ConvertRejected`] /
///   [`Pdf2XmlError::BadResponse`] — the upload itself failed
pub async fn convert_file(
    path: impl AsRef<Path>,
    config: &ClientConfig,
) -> Result<ConversionResult, Pdf2XmlError> {
    let file = SelectedFile::open(path).await?;
    if !file.is_pdf() {
        return Err(Pdf2XmlError::NotAPdf {
            name: file.name,
            mime: file.declared_mime,
        });
    }

    let api = ApiClient::new(config)?;
    api.convert(&file).await
}
