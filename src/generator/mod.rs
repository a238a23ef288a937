//! Sheet generation - business logic for turning an installation and a
//! selected frequency into a fillable inspection PDF.
//!
//! The flow is template-driven:
//! 1. [`crate::filter::filter_by_frequency`] selects the applicable activities
//! 2. [`template::SheetTemplate`] renders them into a complete HTML document
//! 3. an HTML-to-PDF backend converts the document into an AcroForm PDF

pub mod common;
pub mod engine;
pub mod pipeline;
pub mod template;
pub mod traits;

pub use engine::WkhtmltopdfBackend;
pub use pipeline::SheetGenerator;
pub use template::SheetTemplate;
pub use traits::PdfBackend;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during sheet generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("HTML template not found: {0}")]
    TemplateNotFound(String),
    #[error("no activity of '{installation}' applies at frequency {frequency}")]
    NoMatchingActivities {
        installation: String,
        frequency: String,
    },
    #[error("failed to create temporary HTML file: {0}")]
    TempFile(#[source] std::io::Error),
    #[error("failed to write rendered HTML: {0}")]
    WriteHtml(#[source] std::io::Error),
    #[error("PDF backend execution failed: {0}")]
    BackendIo(#[source] std::io::Error),
    #[error("PDF backend exited with status {0}")]
    BackendExit(i32),
    #[error("PDF generation failed: no output file at {0}")]
    PdfGenerationFailed(PathBuf),
    #[error("generation worker failed: {0}")]
    Worker(#[source] tokio::task::JoinError),
}

/// Result of a successful sheet generation.
#[derive(Debug, Clone)]
pub struct GeneratedSheet {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub generated_at: DateTime<Utc>,
    /// How many activity rows the sheet contains.
    pub activity_count: usize,
}
