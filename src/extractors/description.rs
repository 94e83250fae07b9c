// src/extractors/description.rs

// --- Imports ---
use crate::clipboard::ClipboardSink;
use crate::sql::{self, Record};
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

// --- CSS Selectors (Lazy Static) ---
// Description cells inside a chapter's section heading row on the TARIC consultation page
static DESCRIPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".section_heading .tddescription")
        .expect("Failed to compile DESCRIPTION_SELECTOR")
});

// --- Document Access ---

/// Read-only query over a document tree.
pub trait DescriptionSource {
    /// Raw text content of every matched description element, in document order.
    fn description_texts(&self) -> Vec<String>;
}

/// A parsed HTML page, e.g. the consultation page saved from the browser.
pub struct HtmlDocument {
    document: Html,
}

impl HtmlDocument {
    /// Parses a full page. html5ever recovers from malformed or empty markup,
    /// so this never fails; a blank page simply has no descriptions.
    pub fn parse(html_content: &str) -> Self {
        let document = Html::parse_document(html_content);
        if !document.errors.is_empty() {
            tracing::debug!("HTML parser recovered from {} error(s)", document.errors.len());
        }

        Self { document }
    }
}

impl DescriptionSource for HtmlDocument {
    fn description_texts(&self) -> Vec<String> {
        self.document
            .select(&DESCRIPTION_SELECTOR)
            .map(|element| element.text().collect::<String>())
            .collect()
    }
}

// --- Extraction ---

/// Builds the SQL tuples for every description in `source` and returns the
/// formatted `VALUES` list body. Yields an empty string when nothing matched.
pub fn extract_and_format_descriptions(source: &impl DescriptionSource) -> String {
    let records = collect_records(source);
    let output = sql::format_values_list(&records);
    tracing::debug!("Formatted {} description tuple(s):\n{}", records.len(), output);
    output
}

fn collect_records(source: &impl DescriptionSource) -> Vec<Record> {
    source
        .description_texts()
        .iter()
        .enumerate()
        .map(|(position, text)| Record::from_raw(position, text))
        .collect()
}

/// Outcome of one extraction run.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub output: String,
    pub copied: bool, // Whether the clipboard write succeeded
}

pub struct DescriptionExtractor {
    allow_empty: bool,
}

impl DescriptionExtractor {
    pub fn new(allow_empty: bool) -> Self {
        Self { allow_empty }
    }

    /// Extracts and formats the descriptions found in `source` without
    /// touching any clipboard. Fails with [`ExtractError::NoMatches`] on an
    /// empty match set unless empty output is allowed.
    pub fn extract(&self, source: &impl DescriptionSource) -> Result<Extraction, ExtractError> {
        let records = collect_records(source);
        tracing::info!("Matched {} description element(s)", records.len());

        if records.is_empty() && !self.allow_empty {
            return Err(ExtractError::NoMatches);
        }

        let output = sql::format_values_list(&records);
        Ok(Extraction { records, output, copied: false })
    }

    /// Copies the formatted output. A clipboard failure is logged and
    /// reflected in [`Extraction::copied`]; it never fails the run.
    /// Passing `None` skips the copy.
    pub fn copy(&self, extraction: &mut Extraction, clipboard: Option<&mut dyn ClipboardSink>) {
        extraction.copied = match clipboard {
            Some(sink) => match sink.set_text(&extraction.output) {
                Ok(()) => {
                    tracing::info!("SQL insert statements copied to clipboard!");
                    true
                }
                Err(e) => {
                    tracing::warn!("Failed to copy SQL insert statements to clipboard: {}", e);
                    false
                }
            },
            None => {
                tracing::debug!("Clipboard copy skipped");
                false
            }
        };
    }

    /// Extracts, formats and copies the descriptions found in `source`.
    pub fn run(
        &self,
        source: &impl DescriptionSource,
        clipboard: Option<&mut dyn ClipboardSink>,
    ) -> Result<Extraction, ExtractError> {
        let mut extraction = self.extract(source)?;
        self.copy(&mut extraction, clipboard);
        Ok(extraction)
    }
}
