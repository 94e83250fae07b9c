// src/app/mod.rs
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::clipboard::ClipboardSink;
use crate::extractors::{DescriptionExtractor, Extraction, HtmlDocument};
use crate::storage::{RunSummary, StorageManager};
use crate::utils::AppError;

/// Settings for one run, built from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub input: Option<PathBuf>,      // None or "-" reads stdin
    pub output_dir: Option<PathBuf>, // Optional export directory
    pub allow_empty: bool,
}

impl RunConfig {
    fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|path| path.as_os_str() != "-")
    }

    pub fn source_label(&self) -> String {
        match self.input_path() {
            Some(path) => path.display().to_string(),
            None => "<stdin>".to_string(),
        }
    }

    /// Reads the page from the configured file, or from `stdin` when no file is set.
    pub fn read_input(&self, mut stdin: impl Read) -> Result<String, AppError> {
        match self.input_path() {
            Some(path) => {
                if !path.is_file() {
                    return Err(AppError::Config(format!(
                        "Input file not found: {}",
                        path.display()
                    )));
                }
                Ok(std::fs::read_to_string(path)?)
            }
            None => {
                let mut buffer = String::new();
                stdin.read_to_string(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

/// Reads the page, writes the formatted tuples to `stdout`, then copies them
/// and runs the optional export.
///
/// The output is written and flushed before the clipboard is touched, since a
/// holding clipboard may block for as long as the user likes.
pub fn execute(
    config: &RunConfig,
    stdin: impl Read,
    stdout: &mut impl Write,
    clipboard: Option<&mut dyn ClipboardSink>,
) -> Result<Extraction, AppError> {
    // 1. Load and parse the page
    let source = config.source_label();
    let html = config.read_input(stdin)?;
    tracing::info!("Read {} bytes from {}", html.len(), source);
    let document = HtmlDocument::parse(&html);

    // 2. Extract and format
    let extractor = DescriptionExtractor::new(config.allow_empty);
    let mut extraction = extractor.extract(&document)?;

    // 3. Emit exactly what will be copied
    write!(stdout, "{}", extraction.output)?;
    stdout.flush()?;
    tracing::debug!("Formatted output:\n{}", extraction.output);

    // 4. Copy
    extractor.copy(&mut extraction, clipboard);

    // 5. Optional export
    if let Some(dir) = &config.output_dir {
        let storage = StorageManager::new(dir)?;
        storage.save_sql(&extraction)?;
        storage.save_summary(&RunSummary::new(&source, &extraction))?;
    }

    tracing::info!(
        "Extraction finished. Tuples: {}, copied to clipboard: {}",
        extraction.records.len(),
        extraction.copied
    );

    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::utils::error::{ClipboardError, ExtractError};
    use std::io::Cursor;

    const PAGE: &str = r#"<html><body><table>
        <tr class="section_heading"><td class="tddescription"> Live animals </td></tr>
        <tr class="section_heading"><td class="tddescription">O'Brien's list</td></tr>
        </table></body></html>"#;

    const EXPECTED: &str = "(1, 'EN', 'Live animals'),\n(2, 'EN', 'O''Brien''s list');";

    // Records what had already been written to stdout when the copy happened.
    struct OrderCheckingClipboard<'a> {
        stdout: &'a std::cell::RefCell<Vec<u8>>,
        seen_at_copy: Option<Vec<u8>>,
    }

    impl ClipboardSink for OrderCheckingClipboard<'_> {
        fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            self.seen_at_copy = Some(self.stdout.borrow().clone());
            Ok(())
        }
    }

    struct SharedWriter<'a>(&'a std::cell::RefCell<Vec<u8>>);

    impl Write for SharedWriter<'_> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_read_input_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("taric.html");
        std::fs::write(&path, PAGE).unwrap();

        let config = RunConfig { input: Some(path.clone()), ..Default::default() };

        assert_eq!(config.read_input(Cursor::new("ignored")).unwrap(), PAGE);
        assert_eq!(config.source_label(), path.display().to_string());
    }

    #[test]
    fn test_read_input_missing_file_is_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let config = RunConfig {
            input: Some(tmp.path().join("missing.html")),
            ..Default::default()
        };

        let err = config.read_input(Cursor::new("")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)), "unexpected error: {:?}", err);
    }

    #[test]
    fn test_read_input_dash_or_none_reads_stdin() {
        for input in [None, Some(PathBuf::from("-"))] {
            let config = RunConfig { input, ..Default::default() };
            assert_eq!(config.read_input(Cursor::new(PAGE)).unwrap(), PAGE);
            assert_eq!(config.source_label(), "<stdin>");
        }
    }

    #[test]
    fn test_execute_writes_exact_output_and_copies() {
        let mut stdout = Vec::new();
        let mut clipboard = MemoryClipboard::new();

        let extraction = execute(
            &RunConfig::default(),
            Cursor::new(PAGE),
            &mut stdout,
            Some(&mut clipboard),
        )
        .unwrap();

        assert!(extraction.copied);
        assert_eq!(String::from_utf8(stdout).unwrap(), EXPECTED);
        assert_eq!(clipboard.contents(), Some(EXPECTED));
    }

    #[test]
    fn test_execute_prints_before_copying() {
        let stdout = std::cell::RefCell::new(Vec::new());
        let mut clipboard = OrderCheckingClipboard { stdout: &stdout, seen_at_copy: None };

        execute(
            &RunConfig::default(),
            Cursor::new(PAGE),
            &mut SharedWriter(&stdout),
            Some(&mut clipboard),
        )
        .unwrap();

        assert_eq!(clipboard.seen_at_copy.as_deref(), Some(EXPECTED.as_bytes()));
    }

    #[test]
    fn test_execute_without_clipboard_exports_both_files() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("out");
        let config = RunConfig { output_dir: Some(out_dir.clone()), ..Default::default() };
        let mut stdout = Vec::new();

        let extraction = execute(&config, Cursor::new(PAGE), &mut stdout, None).unwrap();

        assert!(!extraction.copied);
        assert_eq!(
            std::fs::read_to_string(out_dir.join("chapter_descriptions.sql")).unwrap(),
            EXPECTED
        );
        let summary: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(out_dir.join("chapter_descriptions_meta.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(summary["source"], "<stdin>");
        assert_eq!(summary["record_count"], 2);
        assert_eq!(summary["copied_to_clipboard"], false);
    }

    #[test]
    fn test_execute_blank_input() {
        let mut stdout = Vec::new();
        let err = execute(&RunConfig::default(), Cursor::new("   \n"), &mut stdout, None).unwrap_err();
        assert!(matches!(err, AppError::Extraction(ExtractError::NoMatches)));
        assert!(stdout.is_empty());

        let config = RunConfig { allow_empty: true, ..Default::default() };
        let extraction = execute(&config, Cursor::new("   \n"), &mut stdout, None).unwrap();
        assert_eq!(extraction.output, "");
        assert!(stdout.is_empty());
    }
}
