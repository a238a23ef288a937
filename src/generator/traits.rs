//! Seam between the generation pipeline and the HTML-to-PDF converter.

use std::path::Path;

use super::GeneratorError;

/// An HTML-to-PDF converter.
///
/// Implementations must produce interactive form fields (AcroForm) for HTML
/// form controls rather than flattened static content, and must either write
/// a complete file at `output_path` or none at all.
pub trait PdfBackend {
    fn convert(&self, html_path: &Path, output_path: &Path) -> Result<(), GeneratorError>;
}
