//! Command-line interface for xml2table.

use std::path::PathBuf;

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{validate_labels, ExtractOptions, DEFAULT_PREVIEW_ROWS};
use crate::converter::{convert_file, ConversionRequest};
use crate::error::Result;
use crate::extract::{missing_columns_message, EventSink, ExtractionEvent, TracingSink};
use crate::output::{preview, OutputFormat};
use crate::types::ColumnSpec;

/// Extract the specified elements from an XML file and save them as an xlsx
/// file or an alternative format (csv, json).
#[derive(Parser, Debug)]
#[command(name = "xml2table")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// XML file to convert
    pub input_file: PathBuf,

    /// Element name or XPath expression, evaluated per record, used as a column
    #[arg(required = true, num_args = 1..)]
    pub column: Vec<String>,

    /// Output file (default: input file name with the format's extension)
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    /// Namespace prepended to every column, e.g. "{urn:example}"
    #[arg(short, long, default_value = "")]
    pub namespace: String,

    /// Element whose children become rows (default: the XML root)
    #[arg(short, long, default_value = "")]
    pub parent_element: String,

    /// Only children of the parent with this tag become rows
    #[arg(short, long)]
    pub row_element: Option<String>,

    /// Column labels, one per column (default: the column expressions)
    #[arg(short, long, num_args = 1..)]
    pub labels: Vec<String>,

    /// Output format when no output file extension is given (xlsx, csv, json)
    #[arg(short, long, value_parser = parse_format)]
    pub format: Option<OutputFormat>,

    /// Number of rows shown in the preview (0 disables it)
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub preview_rows: usize,

    /// Print the tag outline of the data root down to this depth
    #[arg(long, value_name = "LEVEL")]
    pub outline: Option<usize>,
}

fn parse_format(value: &str) -> std::result::Result<OutputFormat, String> {
    value.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Build the column specification from command-line columns and labels.
pub fn column_spec(columns: &[String], labels: &[String]) -> Result<ColumnSpec> {
    if labels.is_empty() {
        return ColumnSpec::from_bare_names(columns.iter().cloned());
    }
    validate_labels(columns, labels)?;
    ColumnSpec::from_labeled_pairs(columns.iter().cloned().zip(labels.iter().cloned()))
}

/// Renders extraction events as a progress bar on the terminal.
///
/// Every event is also forwarded to the tracing subscriber.
pub struct ConsoleSink {
    bar: Option<ProgressBar>,
    log: TracingSink,
}

impl ConsoleSink {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bar: None,
            log: TracingSink,
        }
    }

    /// Remove the progress bar, if one is showing.
    pub fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn println(&self, line: String) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => eprintln!("{line}"),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: &ExtractionEvent) {
        self.log.emit(event);
        match event {
            ExtractionEvent::Started { total } => {
                let bar = ProgressBar::new(*total as u64);
                #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} records ({elapsed})")
                        .expect("valid template"),
                );
                self.bar = Some(bar);
            }
            ExtractionEvent::Progress { processed, .. } => {
                if let Some(bar) = &self.bar {
                    bar.set_position(*processed as u64);
                }
            }
            ExtractionEvent::UnsupportedMatch {
                row,
                label,
                description,
            } => {
                self.println(format!(
                    "{} row {row}, column {}: skipped {description}",
                    style("Warning:").yellow().bold(),
                    style(label).cyan()
                ));
            }
            ExtractionEvent::Completed { rows, missing, .. } => {
                self.clear();
                println!("  Rows: {rows}");
                if !missing.is_empty() {
                    println!(
                        "  {} {}",
                        style("Warning:").yellow().bold(),
                        missing_columns_message(missing)
                    );
                }
            }
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    convert_command(&cli)
}

/// Execute a conversion.
fn convert_command(cli: &Cli) -> Result<()> {
    // Validate the column configuration before touching the input file
    let columns = column_spec(&cli.column, &cli.labels)?;

    let mut options = ExtractOptions::from_env().with_namespace(cli.namespace.as_str());
    if let Some(tag) = &cli.row_element {
        options = options.with_row_element(tag.as_str());
    }

    let request = ConversionRequest::new(&cli.input_file, columns)
        .with_output(cli.output_file.clone())
        .with_format(cli.format)
        .with_parent_element(cli.parent_element.as_str())
        .with_options(options)
        .with_outline(cli.outline);

    println!(
        "{} {}",
        style("Converting").bold(),
        style(cli.input_file.display()).cyan()
    );

    let mut sink = ConsoleSink::new();
    let summary = match convert_file(&request, &mut sink) {
        Ok(summary) => summary,
        Err(e) => {
            sink.clear();
            return Err(e);
        }
    };

    if let Some(outline) = &summary.outline {
        println!();
        print!("{outline}");
    }

    if cli.preview_rows > 0 {
        println!();
        println!("Output preview:");
        print!("{}", preview(&summary.table, cli.preview_rows));
        println!("Total rows: {}.", summary.rows());
    }

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        summary.output_path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Xml2TableError;

    #[test]
    fn test_cli_parse_minimal() {
        let cli = Cli::parse_from(["xml2table", "people.xml", "id", "name"]);

        assert_eq!(cli.input_file, PathBuf::from("people.xml"));
        assert_eq!(cli.column, vec!["id", "name"]);
        assert!(cli.output_file.is_none());
        assert_eq!(cli.namespace, "");
        assert_eq!(cli.parent_element, "");
        assert!(cli.labels.is_empty());
        assert_eq!(cli.preview_rows, DEFAULT_PREVIEW_ROWS);
    }

    #[test]
    fn test_cli_parse_all_options() {
        let cli = Cli::parse_from([
            "xml2table",
            "people.xml",
            "id",
            "@type",
            "-o",
            "out.csv",
            "-n",
            "{urn:p}",
            "-p",
            "records",
            "-r",
            "person",
            "-f",
            "json",
            "--preview-rows",
            "3",
            "--outline",
            "2",
            "-l",
            "ID",
            "Type",
        ]);

        assert_eq!(cli.column, vec!["id", "@type"]);
        assert_eq!(cli.output_file, Some(PathBuf::from("out.csv")));
        assert_eq!(cli.namespace, "{urn:p}");
        assert_eq!(cli.parent_element, "records");
        assert_eq!(cli.row_element.as_deref(), Some("person"));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.preview_rows, 3);
        assert_eq!(cli.outline, Some(2));
        assert_eq!(cli.labels, vec!["ID", "Type"]);
    }

    #[test]
    fn test_cli_requires_a_column() {
        assert!(Cli::try_parse_from(["xml2table", "people.xml"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["xml2table", "in.xml", "id", "-f", "xls"]).is_err());
    }

    #[test]
    fn test_column_spec_bare_names() {
        let spec = column_spec(&["id".to_string(), "name".to_string()], &[]).unwrap();
        assert_eq!(spec.labels().collect::<Vec<_>>(), vec!["id", "name"]);
    }

    #[test]
    fn test_column_spec_with_labels() {
        let spec = column_spec(
            &["id".to_string(), "name".to_string()],
            &["ID".to_string(), "Name".to_string()],
        )
        .unwrap();
        assert_eq!(spec.entries()[1].path, "name");
        assert_eq!(spec.entries()[1].label, "Name");
    }

    #[test]
    fn test_column_spec_label_mismatch() {
        let err = column_spec(&["id".to_string(), "name".to_string()], &["ID".to_string()])
            .unwrap_err();
        assert!(matches!(
            err,
            Xml2TableError::LabelCountMismatch {
                columns: 2,
                labels: 1
            }
        ));
    }
}
