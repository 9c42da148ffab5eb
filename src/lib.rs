//! # pdf2xml
//!
//! Upload PDF documents to a remote conversion service and fetch the
//! resulting XML — as a library, or via the bundled `pdf2xml` CLI.
//!
//! ## Why this crate?
//!
//! The PDF→XML conversion itself runs behind an HTTP service; this crate is
//! the client side done properly. Instead of three ad-hoc `curl` calls it
//! gives you a [`ConverterSession`] with the exact interaction contract of
//! the service's web UI: MIME-checked file selection, a multipart upload
//! whose in-flight flag is released on every exit path, and download/preview
//! follow-ups keyed by the filename the upload returned.
//!
//! ## Flow Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Select    MIME-check the candidate, hold it in memory
//!  ├─ 2. Convert   POST multipart "file" → { xml_file }
//!  ├─ 3. Download  GET /download/{xml_file} → atomic save to disk
//!  └─ 4. Preview   GET /preview/{xml_file} → { xml_content }
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2xml::{ClientConfig, ConverterSession, SelectedFile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .base_url("http://localhost:8000")
//!         .build()?;
//!     let mut session = ConverterSession::new(&config)?;
//!
//!     session.select_file(Some(SelectedFile::open("report.pdf").await?));
//!     session.convert().await;
//!
//!     if let Some(name) = session.result().map(|r| r.xml_file.clone()) {
//!         session.download_to(&name).await;
//!         session.preview().await;
//!         if let Some(xml) = session.preview_text() {
//!             println!("{xml}");
//!         }
//!     } else if let Some(err) = session.error_message() {
//!         eprintln!("{err}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2xml` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! pdf2xml = { version = "0.3", default-features = false }
//! ```
//!
//! ## Error model
//!
//! The wire layer ([`ApiClient`]) returns typed [`Pdf2XmlError`]s. The
//! session never does: every failure lands in
//! [`ConverterSession::error_message`] as one of the fixed strings in
//! [`messages`] (the backend's own `detail` taking precedence for upload
//! failures), and the session stays interactive — no failure is fatal and
//! nothing retries on its own.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod api;
pub mod config;
pub mod convert;
pub mod error;
pub mod input;
pub mod messages;
pub mod protocol;
pub mod session;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use api::ApiClient;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL};
pub use convert::convert_file;
pub use error::Pdf2XmlError;
pub use input::{SelectedFile, PDF_MIME};
pub use protocol::{ConversionResult, ErrorBody, HealthResponse, PreviewResponse};
pub use session::ConverterSession;
