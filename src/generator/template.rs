//! HTML template engine for inspection sheets.
//!
//! Loads the sheet skeleton, substitutes the header placeholders and
//! generates one table row per filtered activity, complete with the radio
//! and note form controls the PDF backend turns into AcroForm fields.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::common::escape_html;
use super::GeneratorError;
use crate::models::{Activity, Frequency, Installation};

/// Name of the default sheet template.
pub const DEFAULT_TEMPLATE: &str = "scheda.html";

/// Fixed enumerated outcome set, one radio button per outcome per row.
pub const OUTCOMES: [&str; 6] = ["P", "PI", "NA", "NP", "VN", "B"];

/// Templates bundled into the binary; looked up before the filesystem.
const BUNDLED: &[(&str, &str)] = &[(DEFAULT_TEMPLATE, include_str!("../../static/scheda.html"))];

const MARKER_CODE: &str = "<!-- COD_SCHEDA -->";
const MARKER_SUBJECT: &str = "<!-- OGGETTO -->";
const MARKER_FREQUENCY: &str = "<!-- PERIODICITA -->";
const MARKER_PREAMBLE: &str = "<!-- PREMESSA -->";
const MARKER_ROWS: &str = "<!-- ATTIVITA_ROWS -->";
const CLIENT_FRAGMENT: &str = "<p>Cliente</p>";

/// A loaded sheet template, ready to render.
#[derive(Debug)]
pub struct SheetTemplate {
    html: String,
}

impl SheetTemplate {
    /// Load a template by name: bundled resources first, then the filesystem.
    pub fn load(name: &str) -> Result<Self, GeneratorError> {
        if let Some((_, html)) = BUNDLED.iter().find(|(n, _)| *n == name) {
            return Ok(Self {
                html: (*html).to_string(),
            });
        }

        let path = Path::new(name);
        if path.exists() {
            let html = fs::read_to_string(path)
                .map_err(|_| GeneratorError::TemplateNotFound(name.to_string()))?;
            return Ok(Self { html });
        }

        Err(GeneratorError::TemplateNotFound(name.to_string()))
    }

    /// Build a template directly from an HTML string.
    pub fn from_html(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Render the complete HTML document for an installation.
    ///
    /// `filtered` must already be the output of
    /// [`crate::filter::filter_by_frequency`]: its order fixes the visual row
    /// order and the 1-based row numbers in the form field names. Missing
    /// placeholder markers leave the corresponding section empty; the
    /// substitution is simply a no-op.
    pub fn render(
        &self,
        installation: &Installation,
        filtered: &[Activity],
        frequency: &Frequency,
        client_name: Option<&str>,
    ) -> String {
        let mut html = self.html.clone();

        html = html.replace(MARKER_CODE, &escape_html(&installation.code));
        html = html.replace(MARKER_SUBJECT, &escape_html(&installation.name));
        html = html.replace(MARKER_FREQUENCY, &escape_html(&frequency.label()));
        html = html.replace(
            MARKER_PREAMBLE,
            &escape_html(installation.preamble.as_deref().unwrap_or("")),
        );

        let client_text = match client_name {
            Some(name) if !name.trim().is_empty() => {
                format!("Cliente: {}", escape_html(name))
            }
            _ => "Cliente".to_string(),
        };
        html = html.replace(CLIENT_FRAGMENT, &format!("<p>{client_text}</p>"));

        let rows = build_activity_rows(filtered, &installation.code);
        html.replace(MARKER_ROWS, &rows)
    }
}

/// Radio group name for the 1-based `row_number` of an installation's sheet.
pub fn radio_group_name(installation_code: &str, row_number: usize) -> String {
    format!("esito_{installation_code}_{row_number}")
}

/// Note field name for the 1-based `row_number` of an installation's sheet.
pub fn note_field_name(installation_code: &str, row_number: usize) -> String {
    format!("note_{installation_code}_{row_number}")
}

/// Generate the `<tr>` rows for the filtered activities.
///
/// Field names are unique per row within one document and deterministic
/// given the same input; the downstream PDF form is addressed by them.
fn build_activity_rows(activities: &[Activity], installation_code: &str) -> String {
    let mut rows = String::new();

    for (index, activity) in activities.iter().enumerate() {
        let row_number = index + 1;
        let radio_name = radio_group_name(installation_code, row_number);

        let _ = writeln!(rows, r#"                <tr class="row--data">"#);
        let _ = writeln!(
            rows,
            r#"                    <td class="cell--data-empty"><p>{}</p></td>"#,
            escape_html(&activity.sequence.to_string())
        );
        let _ = writeln!(
            rows,
            r#"                    <td class="cell--data-empty"><p>{}</p></td>"#,
            escape_html(activity.kind.as_deref().unwrap_or(""))
        );
        let _ = writeln!(
            rows,
            r#"                    <td class="cell--data-empty"><p>{}</p></td>"#,
            escape_html(&activity.frequency.label())
        );
        let _ = writeln!(
            rows,
            r#"                    <td class="cell--data-empty"><p>{}</p></td>"#,
            escape_html(activity.description.as_deref().unwrap_or(""))
        );

        for outcome in OUTCOMES {
            let id = format!("{radio_name}_{}", outcome.to_lowercase());
            let _ = writeln!(rows, r#"                    <td class="cell--data-empty">"#);
            let _ = writeln!(
                rows,
                r#"                        <input type="radio" name="{radio_name}" id="{id}" value="{outcome}" />"#
            );
            let _ = writeln!(
                rows,
                r#"                        <label for="{id}" class="visually-hidden">{outcome}</label>"#
            );
            let _ = writeln!(rows, r#"                    </td>"#);
        }

        let note_name = note_field_name(installation_code, row_number);
        let _ = writeln!(rows, r#"                    <td class="cell--data-standard">"#);
        let _ = writeln!(
            rows,
            r#"                        <input type="text" name="{note_name}" id="{note_name}" />"#
        );
        let _ = writeln!(
            rows,
            r#"                        <label for="{note_name}" class="visually-hidden">Nota</label>"#
        );
        let _ = writeln!(rows, r#"                    </td>"#);
        let _ = writeln!(rows, r#"                    <td class="cell--spacer"></td>"#);
        let _ = writeln!(rows, r#"                </tr>"#);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;

    fn installation(code: &str, name: &str) -> Installation {
        Installation {
            code: code.into(),
            name: name.into(),
            preamble: Some("Togliere tensione prima di operare.".into()),
            activities: vec![],
            regulations: vec![],
        }
    }

    fn activity(sequence: u32, months: u32) -> Activity {
        Activity {
            sequence,
            kind: Some("Controllo".into()),
            description: Some("Verifica generale".into()),
            frequency: Frequency::months(months).unwrap(),
        }
    }

    #[test]
    fn test_bundled_template_loads() {
        let template = SheetTemplate::load(DEFAULT_TEMPLATE);
        assert!(template.is_ok());
    }

    #[test]
    fn test_unknown_template_is_not_found() {
        let err = SheetTemplate::load("no_such_template.html").unwrap_err();
        assert!(matches!(err, GeneratorError::TemplateNotFound(name) if name == "no_such_template.html"));
    }

    #[test]
    fn test_header_placeholders_are_substituted_and_escaped() {
        let template = SheetTemplate::from_html(
            "<h1><!-- COD_SCHEDA --></h1><h2><!-- OGGETTO --></h2>\
             <p><!-- PERIODICITA --></p><p><!-- PREMESSA --></p>",
        );
        let imp = installation("GE", "Gruppo <script>alert(1)</script>");
        let html = template.render(&imp, &[], &Frequency::months(6).unwrap(), None);

        assert!(html.contains("<h1>GE</h1>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("6 Mesi"));
        assert!(html.contains("Togliere tensione"));
    }

    #[test]
    fn test_client_fragment_with_and_without_name() {
        let template = SheetTemplate::from_html("<p>Cliente</p>");
        let imp = installation("GE", "Gruppo Elettrogeno");
        let freq = Frequency::months(6).unwrap();

        let with = template.render(&imp, &[], &freq, Some("Rossi & Figli"));
        assert!(with.contains("<p>Cliente: Rossi &amp; Figli</p>"));

        let without = template.render(&imp, &[], &freq, None);
        assert!(without.contains("<p>Cliente</p>"));

        let blank = template.render(&imp, &[], &freq, Some("   "));
        assert!(blank.contains("<p>Cliente</p>"));
    }

    #[test]
    fn test_row_field_names_use_row_position_not_sequence() {
        let template = SheetTemplate::from_html("<!-- ATTIVITA_ROWS -->");
        let imp = installation("CT", "Centrale Termica");
        // Sequence ids 7 and 9; row numbers must still be 1 and 2.
        let filtered = vec![activity(7, 1), activity(9, 6)];
        let html = template.render(&imp, &filtered, &Frequency::months(6).unwrap(), None);

        assert!(html.contains(r#"name="esito_CT_1""#));
        assert!(html.contains(r#"name="esito_CT_2""#));
        assert!(html.contains(r#"id="esito_CT_1_pi""#));
        assert!(html.contains(r#"name="note_CT_2""#));
        assert!(!html.contains("esito_CT_7"));
    }

    #[test]
    fn test_each_row_has_all_outcomes() {
        let template = SheetTemplate::from_html("<!-- ATTIVITA_ROWS -->");
        let imp = installation("GE", "Gruppo Elettrogeno");
        let html = template.render(&imp, &[activity(1, 1)], &Frequency::months(1).unwrap(), None);

        for outcome in OUTCOMES {
            assert!(html.contains(&format!(r#"value="{outcome}""#)));
            assert!(html.contains(&format!("esito_GE_1_{}", outcome.to_lowercase())));
        }
    }

    #[test]
    fn test_missing_markers_render_as_no_op() {
        let template = SheetTemplate::from_html("<html><body>static</body></html>");
        let imp = installation("GE", "Gruppo Elettrogeno");
        let html = template.render(&imp, &[activity(1, 1)], &Frequency::months(1).unwrap(), None);
        assert_eq!(html, "<html><body>static</body></html>");
    }
}
