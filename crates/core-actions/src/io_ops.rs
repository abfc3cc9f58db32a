//! File and clipboard IO for the line buffer, plus the mapping-file and
//! list-file readers used by `multiple_replace` and `select_from_file`.
//!
//! Everything here is synchronous and scoped to one command: files are opened,
//! read or written, and closed before returning.

use crate::error::ActionError;
use crate::ports::Clipboard;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key/value separator for text mapping files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Separator {
    #[default]
    Tab,
    Space,
    Literal(String),
}

impl Separator {
    /// `"tab"` and `"space"` are names; anything else is used literally.
    pub fn parse(raw: &str) -> Result<Self, ActionError> {
        match raw {
            "" => Err(ActionError::validation("separator must not be empty")),
            "tab" | "\\t" => Ok(Self::Tab),
            "space" => Ok(Self::Space),
            other => Ok(Self::Literal(other.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Tab => "\t",
            Self::Space => " ",
            Self::Literal(s) => s,
        }
    }
}

/// How a mapping or list file is interpreted, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Text,
    /// Delimited sheet; columns split on the given char.
    Sheet(char),
    Workbook,
}

fn file_format(path: &Path) -> FileFormat {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("csv") => FileFormat::Sheet(','),
        Some("tsv") => FileFormat::Sheet('\t'),
        Some("xlsx" | "xls" | "xlsm" | "ods") => FileFormat::Workbook,
        _ => FileFormat::Text,
    }
}

fn read_text(path: &Path) -> Result<String, ActionError> {
    std::fs::read_to_string(path).map_err(|e| {
        warn!(target: "io", file = %path.display(), ?e, "file_read_error");
        ActionError::io(path, "cannot read", e)
    })
}

/// Read a document, keeping each line's terminator.
pub fn load_file(path: &Path) -> Result<Vec<String>, ActionError> {
    let content = read_text(path)?;
    let lines = core_text::split_lines(&content);
    debug!(target: "io", file = %path.display(), size_bytes = content.len(), lines = lines.len(), "file_read_ok");
    Ok(lines)
}

/// Read the clipboard as a document, normalizing CRLF to LF.
pub fn load_clipboard(clipboard: &mut dyn Clipboard) -> Result<Vec<String>, ActionError> {
    let text = clipboard
        .get_text()
        .map_err(|e| ActionError::Clipboard(e.to_string()))?;
    if text.is_empty() {
        return Err(ActionError::Clipboard("clipboard is empty".into()));
    }
    let lines = core_text::split_lines(&core_text::normalize_crlf(&text));
    debug!(target: "io", size_bytes = text.len(), lines = lines.len(), "clipboard_read_ok");
    Ok(lines)
}

/// Write `lines` verbatim, creating parent directories. Returns bytes written.
pub fn save_file(path: &Path, lines: &[String]) -> Result<usize, ActionError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| ActionError::io(parent, "cannot create directory", e))?;
    }
    let content = core_text::join(lines);
    std::fs::write(path, content.as_bytes()).map_err(|e| {
        warn!(target: "io", file = %path.display(), ?e, "file_write_error");
        ActionError::io(path, "cannot write", e)
    })?;
    debug!(target: "io", file = %path.display(), size_bytes = content.len(), "file_write_ok");
    Ok(content.len())
}

/// Resolve the save destination: explicit path, else the recorded source.
pub fn save_target(explicit: Option<&Path>, source: Option<&Path>) -> Result<PathBuf, ActionError> {
    explicit
        .or(source)
        .map(Path::to_path_buf)
        .ok_or_else(|| ActionError::validation("no file name; use `save <path>`"))
}

/// Split one delimited record, honoring double-quoted fields (`""` escapes a quote).
fn split_record(line: &str, delim: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if quoted && chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            '"' if quoted => quoted = false,
            '"' if field.is_empty() => quoted = true,
            c if c == delim && !quoted => fields.push(std::mem::take(&mut field)),
            c => field.push(c),
        }
    }
    fields.push(field);
    fields
}

fn unsupported_workbook(path: &Path) -> ActionError {
    ActionError::Io {
        context: format!("cannot read {}", path.display()),
        source: std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "workbook formats are not supported; export the sheet as .csv or .tsv",
        ),
    }
}

/// Ordered key/value pairs from a mapping file.
///
/// Text files split each line on the first `separator`; lines without it are
/// skipped. `.csv`/`.tsv` files use their first two columns.
pub fn read_mapping(path: &Path, separator: &Separator) -> Result<Vec<(String, String)>, ActionError> {
    let format = file_format(path);
    if format == FileFormat::Workbook {
        return Err(unsupported_workbook(path));
    }
    let content = read_text(path)?;
    let mut pairs = Vec::new();
    for line in content.lines() {
        let pair = match format {
            FileFormat::Sheet(delim) => {
                let mut fields = split_record(line, delim).into_iter();
                match (fields.next(), fields.next()) {
                    (Some(k), Some(v)) => Some((k, v)),
                    _ => None,
                }
            }
            _ => line
                .split_once(separator.as_str())
                .map(|(k, v)| (k.to_owned(), v.to_owned())),
        };
        if let Some((key, value)) = pair
            && !key.is_empty()
        {
            pairs.push((key, value));
        }
    }
    debug!(target: "io", file = %path.display(), pairs = pairs.len(), "mapping_read_ok");
    Ok(pairs)
}

/// Non-empty entries of a list file (first column for `.csv`/`.tsv`).
pub fn read_list(path: &Path) -> Result<Vec<String>, ActionError> {
    let format = file_format(path);
    if format == FileFormat::Workbook {
        return Err(unsupported_workbook(path));
    }
    let content = read_text(path)?;
    let entries: Vec<String> = content
        .lines()
        .filter_map(|line| match format {
            FileFormat::Sheet(delim) => split_record(line, delim).into_iter().next(),
            _ => Some(line.trim().to_owned()),
        })
        .filter(|entry| !entry.trim().is_empty())
        .collect();
    debug!(target: "io", file = %path.display(), entries = entries.len(), "list_read_ok");
    Ok(entries)
}
