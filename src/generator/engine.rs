//! Default PDF backend: the `wkhtmltopdf` CLI.
//!
//! Invoked with `--enable-forms` so HTML radio buttons and text inputs map to
//! interactive AcroForm fields instead of being flattened into the page.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::traits::PdfBackend;
use super::GeneratorError;

/// Environment variable overriding the converter binary.
pub const BACKEND_BIN_VAR: &str = "MANUTENZIONI_PDF_BIN";

const DEFAULT_BIN: &str = "wkhtmltopdf";

/// Stateless wrapper around the external HTML-to-PDF converter.
pub struct WkhtmltopdfBackend {
    binary: PathBuf,
}

impl WkhtmltopdfBackend {
    /// Backend using the binary named by `MANUTENZIONI_PDF_BIN`, falling back
    /// to `wkhtmltopdf` on the PATH.
    pub fn from_env() -> Self {
        let binary = std::env::var(BACKEND_BIN_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_BIN));
        Self { binary }
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for WkhtmltopdfBackend {
    fn default() -> Self {
        Self::from_env()
    }
}

impl PdfBackend for WkhtmltopdfBackend {
    fn convert(&self, html_path: &Path, output_path: &Path) -> Result<(), GeneratorError> {
        log::debug!(
            "Converting {} -> {} via {}",
            html_path.display(),
            output_path.display(),
            self.binary.display()
        );

        let status = Command::new(&self.binary)
            .arg("--enable-forms")
            .arg("--quiet")
            .arg(html_path)
            .arg(output_path)
            .status()
            .map_err(GeneratorError::BackendIo)?;

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            return Err(GeneratorError::BackendExit(code));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_surfaces_backend_io() {
        let backend = WkhtmltopdfBackend::with_binary("/nonexistent/wkhtmltopdf-test-bin");
        let err = backend
            .convert(Path::new("in.html"), Path::new("out.pdf"))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::BackendIo(_)));
    }
}
