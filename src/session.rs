//! The converter session: interaction state plus the operations driving it.
//!
//! [`ConverterSession`] is the component a front end binds to. It owns five
//! pieces of transient state — the selected file, a busy flag, the conversion
//! result, an error message, and the preview text — and exposes the four
//! operations that drive them: select, convert, download, preview.
//!
//! ## State discipline
//!
//! * Every `convert()` attempt starts by clearing the error, the previous
//!   result, and the previous preview; stale artifacts never outlive a new
//!   upload attempt.
//! * The busy flag is raised for exactly the lifetime of the upload request
//!   and is released through a drop guard, so it reaches `false` on success,
//!   on failure, and on panic unwinding alike.
//! * `download_to` and `preview` are silent no-ops without a conversion
//!   result: there is nothing to fetch, and that is not an error.
//!
//! Failures never tear the session down. Each operation records a message
//! (see [`crate::messages`]) and returns; the user re-triggers at will.
//! Nothing is retried automatically.
//!
//! Overlapping operations are discouraged by the busy flag but not enforced
//! here; the interaction layer is expected to disable its convert trigger
//! while [`ConverterSession::is_busy`] reports `true`.

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::Pdf2XmlError;
use crate::input::SelectedFile;
use crate::messages;
use crate::protocol::ConversionResult;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// One user's conversion workflow: selected file, in-flight flag, result,
/// error message, and preview text.
#[derive(Debug)]
pub struct ConverterSession {
    api: ApiClient,
    selected: Option<SelectedFile>,
    busy: Arc<AtomicBool>,
    result: Option<ConversionResult>,
    error: Option<String>,
    preview: Option<String>,
}

/// Raises the in-flight flag and guarantees its release when dropped.
struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn raise(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(Arc::clone(flag))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ConverterSession {
    /// Create a session talking to the configured backend.
    pub fn new(config: &ClientConfig) -> Result<Self, Pdf2XmlError> {
        Ok(Self {
            api: ApiClient::new(config)?,
            selected: None,
            busy: Arc::new(AtomicBool::new(false)),
            result: None,
            error: None,
            preview: None,
        })
    }

    /// Wrap an existing [`ApiClient`] in a fresh session.
    pub fn with_client(api: ApiClient) -> Self {
        Self {
            api,
            selected: None,
            busy: Arc::new(AtomicBool::new(false)),
            result: None,
            error: None,
            preview: None,
        }
    }

    // ── State accessors ───────────────────────────────────────────────────

    /// The currently held file, if any.
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// Whether an upload is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// The result of the last successful conversion, if any.
    pub fn result(&self) -> Option<&ConversionResult> {
        self.result.as_ref()
    }

    /// The current user-facing error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The XML text fetched by the last successful preview, if any.
    pub fn preview_text(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    // ── Operations ────────────────────────────────────────────────────────

    /// Offer a candidate from the file picker.
    ///
    /// A candidate declaring exactly `application/pdf` becomes the current
    /// selection and clears any error. Anything else — including a cancelled
    /// picker (`None`) — leaves the previous selection in place, records the
    /// invalid-file message, and drops any result or preview still lying
    /// around from an earlier file. No network access happens here.
    pub fn select_file(&mut self, candidate: Option<SelectedFile>) {
        match candidate {
            Some(file) if file.is_pdf() => {
                info!("Selected '{}' ({})", file.name, file.size_display());
                self.selected = Some(file);
                self.error = None;
            }
            Some(file) => {
                warn!(
                    "Rejected '{}': declared type {}",
                    file.name, file.declared_mime
                );
                self.error = Some(messages::INVALID_FILE.to_string());
                self.result = None;
                self.preview = None;
            }
            None => {
                self.error = Some(messages::INVALID_FILE.to_string());
                self.result = None;
                self.preview = None;
            }
        }
    }

    /// Upload the selected file for conversion.
    ///
    /// Without a selection this records the no-file message and sends
    /// nothing. Otherwise the error, result, and preview are cleared, the
    /// busy flag is raised for the duration of the request, and the outcome
    /// lands in either [`result`](Self::result) or
    /// [`error_message`](Self::error_message). A failure message prefers the
    /// backend's `detail` over the generic wording.
    pub async fn convert(&mut self) {
        let Some(file) = self.selected.clone() else {
            self.error = Some(messages::NO_FILE_SELECTED.to_string());
            return;
        };

        self.error = None;
        self.result = None;
        self.preview = None;

        let _busy = BusyGuard::raise(&self.busy);
        match self.api.convert(&file).await {
            Ok(result) => {
                self.result = Some(result);
            }
            Err(err) => {
                warn!("Conversion of '{}' failed: {}", file.name, err);
                self.error = Some(
                    err.detail()
                        .map(str::to_string)
                        .unwrap_or_else(|| messages::CONVERSION_FAILED.to_string()),
                );
            }
        }
    }

    /// Download the converted artifact and save it at `dest`.
    ///
    /// A no-op when no conversion result is held. The artifact is written
    /// atomically (temp file + rename) so a failed transfer never leaves a
    /// truncated XML file at `dest`.
    pub async fn download_to(&mut self, dest: impl AsRef<Path>) {
        let Some(xml_file) = self.result.as_ref().map(|r| r.xml_file.clone()) else {
            return;
        };
        let dest = dest.as_ref();

        let outcome = match self.api.download(&xml_file).await {
            Ok(bytes) => write_atomic(dest, &bytes).await,
            Err(err) => Err(err),
        };

        match outcome {
            Ok(()) => {
                info!("Saved '{}' to {}", xml_file, dest.display());
                self.error = None;
            }
            Err(err) => {
                warn!("Download of '{}' failed: {}", xml_file, err);
                self.error = Some(messages::DOWNLOAD_FAILED.to_string());
            }
        }
    }

    /// Fetch the artifact's XML text and hold it for display.
    ///
    /// A no-op when no conversion result is held.
    pub async fn preview(&mut self) {
        let Some(xml_file) = self.result.as_ref().map(|r| r.xml_file.clone()) else {
            return;
        };

        match self.api.preview(&xml_file).await {
            Ok(response) => {
                self.preview = Some(response.xml_content);
                self.error = None;
            }
            Err(err) => {
                warn!("Preview of '{}' failed: {}", xml_file, err);
                self.error = Some(messages::PREVIEW_FAILED.to_string());
            }
        }
    }
}

/// Write `bytes` to `dest` via a sibling temp file and rename.
async fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<(), Pdf2XmlError> {
    let save_err = |source: std::io::Error| Pdf2XmlError::SaveFailed {
        path: dest.to_path_buf(),
        source,
    };

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(save_err)?;
        }
    }

    let file_name = dest
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "download".to_string());
    let tmp = dest.with_file_name(format!("{file_name}.tmp"));

    tokio::fs::write(&tmp, bytes).await.map_err(save_err)?;
    tokio::fs::rename(&tmp, dest).await.map_err(save_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PDF_MIME;

    fn session() -> ConverterSession {
        ConverterSession::new(&ClientConfig::default()).expect("default config is valid")
    }

    /// A backend origin nothing listens on; connections fail immediately.
    fn unreachable_session() -> ConverterSession {
        let config = ClientConfig::builder()
            .base_url("http://127.0.0.1:1")
            .request_timeout_secs(2)
            .upload_timeout_secs(2)
            .build()
            .expect("valid config");
        ConverterSession::new(&config).expect("client builds")
    }

    fn pdf_candidate(name: &str, len: usize) -> SelectedFile {
        SelectedFile::from_parts(name, PDF_MIME, vec![0u8; len])
    }

    #[test]
    fn selecting_a_pdf_stores_it_and_clears_the_error() {
        let mut s = session();
        s.select_file(None); // seed an error
        assert!(s.error_message().is_some());

        s.select_file(Some(pdf_candidate("report.pdf", 16)));
        assert_eq!(s.selected_file().map(|f| f.name.as_str()), Some("report.pdf"));
        assert_eq!(s.error_message(), None);
    }

    #[test]
    fn selecting_a_non_pdf_is_rejected_and_keeps_the_previous_file() {
        let mut s = session();
        s.select_file(Some(pdf_candidate("report.pdf", 16)));

        s.select_file(Some(SelectedFile::from_parts(
            "image.png",
            "image/png",
            vec![0u8; 8],
        )));
        assert_eq!(s.error_message(), Some(messages::INVALID_FILE));
        assert_eq!(s.selected_file().map(|f| f.name.as_str()), Some("report.pdf"));
        assert!(s.result().is_none());
        assert!(s.preview_text().is_none());
    }

    #[test]
    fn cancelled_picker_counts_as_rejection() {
        let mut s = session();
        s.select_file(None);
        assert_eq!(s.error_message(), Some(messages::INVALID_FILE));
        assert!(s.selected_file().is_none());
    }

    #[test]
    fn acceptance_is_on_declared_type_not_extension() {
        let mut s = session();
        s.select_file(Some(SelectedFile::from_parts(
            "report.pdf",
            "application/octet-stream",
            vec![0u8; 8],
        )));
        assert_eq!(s.error_message(), Some(messages::INVALID_FILE));
        assert!(s.selected_file().is_none());
    }

    #[tokio::test]
    async fn convert_without_a_file_sends_nothing_and_records_the_message() {
        // The session points at an unreachable origin; if this ever issued a
        // request the transport failure would surface as a different message
        // than the no-file one asserted here.
        let mut s = unreachable_session();
        s.convert().await;
        assert_eq!(s.error_message(), Some(messages::NO_FILE_SELECTED));
        assert!(s.result().is_none());
        assert!(!s.is_busy());
    }

    #[tokio::test]
    async fn failed_convert_releases_busy_and_records_the_generic_message() {
        let mut s = unreachable_session();
        s.select_file(Some(pdf_candidate("report.pdf", 32)));

        s.convert().await;
        assert!(!s.is_busy(), "busy flag must be released on failure");
        assert_eq!(s.error_message(), Some(messages::CONVERSION_FAILED));
        assert!(s.result().is_none());
        assert!(s.preview_text().is_none());
    }

    #[tokio::test]
    async fn download_and_preview_are_no_ops_without_a_result() {
        // The unreachable origin would turn any issued request into an error
        // message; staying error-free proves nothing was sent.
        let mut s = unreachable_session();
        s.select_file(Some(pdf_candidate("report.pdf", 32)));

        s.download_to("never-written.xml").await;
        assert_eq!(s.error_message(), None);
        assert!(!std::path::Path::new("never-written.xml").exists());

        s.preview().await;
        assert_eq!(s.error_message(), None);
        assert!(s.preview_text().is_none());
    }

    #[tokio::test]
    async fn write_atomic_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("report.xml");

        write_atomic(&dest, b"<root/>").await.expect("write succeeds");
        assert_eq!(std::fs::read(&dest).expect("read back"), b"<root/>");
        assert!(!dest.with_file_name("report.xml.tmp").exists());
    }

    #[test]
    fn busy_guard_releases_on_drop() {
        let flag = Arc::new(AtomicBool::new(false));
        {
            let _guard = BusyGuard::raise(&flag);
            assert!(flag.load(Ordering::SeqCst));
        }
        assert!(!flag.load(Ordering::SeqCst));
    }
}
