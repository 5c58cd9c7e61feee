//! Invoice handling
//!
//! The order endpoint may return a base64 PDF. It is opened for printing; when
//! no viewer can be opened the PDF is saved as a download instead. A failure
//! here never affects the order itself.

use crate::error::InvoiceError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

/// Decoded invoice document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDocument {
    pub order_number: String,
    pub bytes: Vec<u8>,
}

impl InvoiceDocument {
    /// Decode a base64 payload; a `data:` URL prefix is tolerated
    pub fn decode(order_number: &str, encoded: &str) -> Result<Self, InvoiceError> {
        let payload = match encoded.split_once("base64,") {
            Some((prefix, rest)) if prefix.starts_with("data:") => rest,
            _ => encoded,
        };
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD.decode(compact)?;
        if bytes.is_empty() {
            return Err(InvoiceError::Empty);
        }

        Ok(Self {
            order_number: order_number.to_string(),
            bytes,
        })
    }

    /// File name offered for download, e.g. "invoice-ORD-0042.pdf"
    pub fn file_name(&self) -> String {
        let safe: String = self
            .order_number
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!("invoice-{safe}.pdf")
    }
}

/// Opens a document in a viewing context and triggers printing
pub trait InvoiceViewer: Send + Sync {
    fn open_and_print(&self, document: &InvoiceDocument) -> Result<(), InvoiceError>;
}

impl<T: InvoiceViewer + ?Sized> InvoiceViewer for std::sync::Arc<T> {
    fn open_and_print(&self, document: &InvoiceDocument) -> Result<(), InvoiceError> {
        (**self).open_and_print(document)
    }
}

/// Hands the PDF to the platform's document opener
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemViewer;

impl SystemViewer {
    fn open_command(path: &Path) -> Command {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(path);
            cmd
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(path);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(path);
            cmd
        }
    }

    fn print_command(path: &Path) -> Command {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("powershell");
            cmd.args(["-NoProfile", "-Command", "Start-Process", "-Verb", "Print", "-FilePath"])
                .arg(path);
            cmd
        } else {
            let mut cmd = Command::new("lp");
            cmd.arg(path);
            cmd
        }
    }
}

impl InvoiceViewer for SystemViewer {
    fn open_and_print(&self, document: &InvoiceDocument) -> Result<(), InvoiceError> {
        let file = tempfile::Builder::new()
            .prefix("invoice-")
            .suffix(".pdf")
            .tempfile()?;
        std::fs::write(file.path(), &document.bytes)?;
        // The viewer reads the file after we return
        let (_, path) = file.keep().map_err(|e| InvoiceError::Io(e.error))?;

        Self::open_command(&path)
            .spawn()
            .map_err(|e| InvoiceError::ViewerUnavailable(e.to_string()))?;

        if let Err(e) = Self::print_command(&path).spawn() {
            warn!(error = %e, path = %path.display(), "invoice opened but print could not be triggered");
        }
        Ok(())
    }
}

/// Download fallback: writes invoices into a directory
#[derive(Debug, Clone)]
pub struct InvoiceDownloads {
    dir: PathBuf,
}

impl InvoiceDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save(&self, document: &InvoiceDocument) -> Result<PathBuf, InvoiceError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(document.file_name());
        std::fs::write(&path, &document.bytes)?;
        Ok(path)
    }
}

/// What happened to an invoice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceOutcome {
    /// Opened for printing
    Printed,
    /// Viewer unavailable; saved for download
    Downloaded(PathBuf),
    /// Nothing usable could be produced
    Failed(String),
}

/// Print-or-download flow
pub struct InvoiceDispatcher {
    viewer: Box<dyn InvoiceViewer>,
    downloads: InvoiceDownloads,
}

impl InvoiceDispatcher {
    pub fn new(viewer: Box<dyn InvoiceViewer>, downloads: InvoiceDownloads) -> Self {
        Self { viewer, downloads }
    }

    pub fn dispatch(&self, order_number: &str, encoded: &str) -> InvoiceOutcome {
        let document = match InvoiceDocument::decode(order_number, encoded) {
            Ok(document) => document,
            Err(e) => {
                warn!(order_number, error = %e, "invoice could not be decoded");
                return InvoiceOutcome::Failed(e.to_string());
            }
        };

        match self.viewer.open_and_print(&document) {
            Ok(()) => {
                info!(order_number, bytes = document.bytes.len(), "invoice sent to viewer");
                InvoiceOutcome::Printed
            }
            Err(view_err) => {
                warn!(order_number, error = %view_err, "invoice viewer unavailable, saving download");
                match self.downloads.save(&document) {
                    Ok(path) => InvoiceOutcome::Downloaded(path),
                    Err(e) => InvoiceOutcome::Failed(e.to_string()),
                }
            }
        }
    }
}

impl std::fmt::Debug for InvoiceDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceDispatcher")
            .field("downloads", &self.downloads)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{BlockedViewer, RecordingViewer, PDF_B64};
    use std::sync::Arc;

    #[test]
    fn test_decode_plain_and_data_url() {
        let plain = InvoiceDocument::decode("ORD-1", PDF_B64).unwrap();
        let data_url =
            InvoiceDocument::decode("ORD-1", &format!("data:application/pdf;base64,{PDF_B64}"))
                .unwrap();

        assert!(plain.bytes.starts_with(b"%PDF"));
        assert_eq!(plain, data_url);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            InvoiceDocument::decode("ORD-1", "***"),
            Err(InvoiceError::Decode(_))
        ));
        assert!(matches!(InvoiceDocument::decode("ORD-1", ""), Err(InvoiceError::Empty)));
    }

    #[test]
    fn test_file_name_is_sanitized() {
        let doc = InvoiceDocument {
            order_number: "ORD/12 34".to_string(),
            bytes: vec![1],
        };
        assert_eq!(doc.file_name(), "invoice-ORD_12_34.pdf");
    }

    #[test]
    fn test_viewer_success_means_printed() {
        let dir = tempfile::tempdir().unwrap();
        let viewer = Arc::new(RecordingViewer::default());
        let dispatcher =
            InvoiceDispatcher::new(Box::new(viewer.clone()), InvoiceDownloads::new(dir.path()));

        assert_eq!(dispatcher.dispatch("ORD-9", PDF_B64), InvoiceOutcome::Printed);
        assert_eq!(viewer.opened(), vec!["ORD-9".to_string()]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_blocked_viewer_falls_back_to_download() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher =
            InvoiceDispatcher::new(Box::new(BlockedViewer), InvoiceDownloads::new(dir.path()));

        let outcome = dispatcher.dispatch("ORD-9", PDF_B64);
        let expected = dir.path().join("invoice-ORD-9.pdf");
        assert_eq!(outcome, InvoiceOutcome::Downloaded(expected.clone()));
        assert!(std::fs::read(expected).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_undecodable_invoice_fails_without_download() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher =
            InvoiceDispatcher::new(Box::new(BlockedViewer), InvoiceDownloads::new(dir.path()));

        assert!(matches!(dispatcher.dispatch("ORD-9", "%%%"), InvoiceOutcome::Failed(_)));
    }
}
