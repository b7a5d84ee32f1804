//! Table serialization and output path handling.

mod delimited;
mod json;
mod preview;
mod xlsx;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub use preview::preview;

use crate::config::DEFAULT_OUTPUT_FORMAT;
use crate::error::{Result, Xml2TableError};
use crate::extract::Table;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Office Open XML workbook.
    Xlsx,
    /// Comma-separated values with a header row.
    Csv,
    /// JSON "table" layout: a schema plus one record per row.
    Json,
}

impl OutputFormat {
    /// Look up a format by file extension, ignoring case.
    ///
    /// # Examples
    /// ```
    /// use xml2table::output::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_extension("CSV"), Some(OutputFormat::Csv));
    /// assert_eq!(OutputFormat::from_extension("xls"), None);
    /// ```
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "xlsx" => Some(Self::Xlsx),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// File extension without the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Format of `path`, judged by its extension.
    pub fn for_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(extension)
            .ok_or_else(|| Xml2TableError::UnsupportedFormat(extension.to_string()))
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = Xml2TableError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s.trim_start_matches('.'))
            .ok_or_else(|| Xml2TableError::UnsupportedFormat(s.to_string()))
    }
}

/// Decide where a conversion of `input` is written.
///
/// Without an explicit `output` the input's file stem is kept and its
/// extension replaced by the format's. An explicit output without an
/// extension gets the format's extension appended; one with an extension is
/// used as given. `format` defaults to xlsx.
///
/// # Examples
/// ```
/// use std::path::{Path, PathBuf};
/// use xml2table::output::{derive_output_path, OutputFormat};
///
/// let input = Path::new("data/people.xml");
/// assert_eq!(derive_output_path(input, None, None), PathBuf::from("data/people.xlsx"));
/// assert_eq!(
///     derive_output_path(input, Some(Path::new("out")), Some(OutputFormat::Csv)),
///     PathBuf::from("out.csv")
/// );
/// ```
#[must_use]
pub fn derive_output_path(
    input: &Path,
    output: Option<&Path>,
    format: Option<OutputFormat>,
) -> PathBuf {
    let extension = format.unwrap_or(DEFAULT_OUTPUT_FORMAT).extension();
    match output {
        Some(path) if path.extension().is_some() => path.to_path_buf(),
        Some(path) => path.with_extension(extension),
        None => input.with_extension(extension),
    }
}

/// Serialize `table` in the given format.
pub fn render(table: &Table, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Xlsx => xlsx::render(table),
        OutputFormat::Csv => delimited::render(table),
        OutputFormat::Json => json::render(table),
    }
}

/// Write `table` to `path` in the format named by its extension.
///
/// The file is written to a temporary sibling first and renamed into place,
/// so an interrupted write never leaves a truncated table behind.
///
/// # Returns
/// The path of the written file.
pub fn save_table(table: &Table, path: &Path) -> Result<PathBuf> {
    let format = OutputFormat::for_path(path)?;
    let content = render(table, format)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = dir.join(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(&content)?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Table written");

    Ok(path.to_path_buf())
}
