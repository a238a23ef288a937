//! Generation pipeline: filter, render, convert, verify.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;

use super::engine::WkhtmltopdfBackend;
use super::template::{SheetTemplate, DEFAULT_TEMPLATE};
use super::traits::PdfBackend;
use super::{GeneratedSheet, GeneratorError};
use crate::filter::filter_by_frequency;
use crate::models::{Frequency, Installation};

/// Orchestrates one sheet generation from installation data to the PDF file.
///
/// A single invocation writes exactly one file at the output path on success
/// plus one transient HTML artifact that is removed on every exit path. It
/// never retries; retry policy belongs to the caller.
pub struct SheetGenerator<B: PdfBackend = WkhtmltopdfBackend> {
    template: SheetTemplate,
    backend: B,
}

impl SheetGenerator<WkhtmltopdfBackend> {
    /// Generator with the bundled default template and the default backend.
    pub fn new() -> Result<Self, GeneratorError> {
        Ok(Self {
            template: SheetTemplate::load(DEFAULT_TEMPLATE)?,
            backend: WkhtmltopdfBackend::from_env(),
        })
    }
}

impl<B: PdfBackend> SheetGenerator<B> {
    pub fn with_backend(template: SheetTemplate, backend: B) -> Self {
        Self { template, backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Generate the inspection sheet PDF at `output_path`.
    pub fn generate(
        &self,
        installation: &Installation,
        frequency: &Frequency,
        output_path: &Path,
        client_name: Option<&str>,
    ) -> Result<GeneratedSheet, GeneratorError> {
        let filtered = filter_by_frequency(&installation.activities, frequency);
        if filtered.is_empty() {
            return Err(GeneratorError::NoMatchingActivities {
                installation: installation.name.clone(),
                frequency: frequency.label(),
            });
        }

        let html = self
            .template
            .render(installation, &filtered, frequency, client_name);

        // NamedTempFile removes the artifact when dropped, on success and on
        // every early return below.
        let mut temp_html = tempfile::Builder::new()
            .prefix(&format!("manutenzione_{}_", installation.code))
            .suffix(".html")
            .tempfile()
            .map_err(GeneratorError::TempFile)?;
        temp_html
            .write_all(html.as_bytes())
            .map_err(GeneratorError::WriteHtml)?;
        temp_html.flush().map_err(GeneratorError::WriteHtml)?;

        self.backend.convert(temp_html.path(), output_path)?;

        let metadata = fs::metadata(output_path)
            .map_err(|_| GeneratorError::PdfGenerationFailed(output_path.to_path_buf()))?;

        log::info!(
            "Sheet generated: {} ({} activities, {} bytes)",
            output_path.display(),
            filtered.len(),
            metadata.len()
        );

        Ok(GeneratedSheet {
            path: output_path.to_path_buf(),
            size_bytes: metadata.len(),
            generated_at: Utc::now(),
            activity_count: filtered.len(),
        })
    }
}

/// Run a generation on a blocking worker task, so an interactive caller stays
/// responsive.
///
/// Dropping the returned future before it is polled to completion does not
/// cancel a conversion already handed to the backend; the blocking task runs
/// to completion or failure.
pub async fn generate_on_worker<B>(
    generator: Arc<SheetGenerator<B>>,
    installation: Installation,
    frequency: Frequency,
    output_path: PathBuf,
    client_name: Option<String>,
) -> Result<GeneratedSheet, GeneratorError>
where
    B: PdfBackend + Send + Sync + 'static,
{
    tokio::task::spawn_blocking(move || {
        generator.generate(
            &installation,
            &frequency,
            &output_path,
            client_name.as_deref(),
        )
    })
    .await
    .map_err(GeneratorError::Worker)?
}
