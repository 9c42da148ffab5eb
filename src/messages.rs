//! Fixed user-facing messages.
//!
//! The conversion UI has always shown these exact strings; they are the
//! stable vocabulary users and support docs know, so they live in one place
//! and the session maps every failure onto them. Typed error details stay
//! available on [`crate::error::Pdf2XmlError`] for logs — with one exception:
//! an upload rejection's server-provided `detail` replaces the generic
//! conversion message, because the backend's own words ("corrupted PDF",
//! "Only PDF files are allowed") are more useful than anything generic.

/// Shown when the selected candidate does not declare `application/pdf`.
pub const INVALID_FILE: &str = "Please select a valid PDF file";

/// Shown when convert is triggered with no file selected.
pub const NO_FILE_SELECTED: &str = "Please select a file first";

/// Fallback when an upload fails and the backend sent no `detail`.
pub const CONVERSION_FAILED: &str = "An error occurred during conversion";

/// Shown when the download request or the local save fails.
pub const DOWNLOAD_FAILED: &str = "Failed to download file";

/// Shown when the preview request fails.
pub const PREVIEW_FAILED: &str = "Failed to load preview";
