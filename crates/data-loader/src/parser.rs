//! Parser for the catalog CSV files.
//!
//! Both catalogs are pandas exports:
//! - `CONTENT_based_filtering.csv`: ,username,title,category,moods,rating_percent,...
//! - `completed_data_for_cold_start.csv`: title,mood,rating_percent,...
//!
//! The leading unnamed index column pandas writes is dropped. List-like
//! cells (`"['Vible']"`, `"['happy', 'calm']"`) are normalized here, once,
//! so filters never re-parse them.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use csv::StringRecord;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// Position of each known column in the header row
struct ColumnMap {
    title: usize,
    mood: usize,
    username: Option<usize>,
    category: Option<usize>,
    rating: Option<usize>,
    /// (position, header) for every remaining non-index column
    extra: Vec<(usize, String)>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord, schema: CatalogSchema, file: &str) -> Result<Self> {
        for &column in schema.required_columns() {
            if !headers.iter().any(|h| h == column) {
                return Err(DataLoadError::MissingColumn {
                    file: file.to_string(),
                    column: column.to_string(),
                });
            }
        }

        let position = |name: &str| headers.iter().position(|h| h == name);
        let mood_column = schema.mood_column();

        let extra = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !is_index_column(h))
            .filter(|(_, h)| {
                !matches!(*h, "title" | "username" | "category" | "rating_percent")
                    && *h != mood_column
            })
            .map(|(i, h)| (i, h.to_string()))
            .collect();

        Ok(Self {
            // Presence checked above
            title: position("title").unwrap_or_default(),
            mood: position(mood_column).unwrap_or_default(),
            username: position("username"),
            category: position("category"),
            rating: position("rating_percent"),
            extra,
        })
    }
}

/// pandas writes its row index as a column with an empty header, which
/// reads back as `Unnamed: 0`
fn is_index_column(header: &str) -> bool {
    header.trim().is_empty() || header.starts_with("Unnamed:")
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse a catalog CSV file into items, in file order.
///
/// Returns the items and whether the header carried a `rating_percent`
/// column.
pub fn parse_catalog(path: &Path, schema: CatalogSchema) -> Result<(Vec<Item>, bool)> {
    let file_name = file_label(path);
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    let mut reader = csv::Reader::from_reader(file);
    let headers = reader
        .headers()
        .map_err(|source| DataLoadError::Csv {
            file: file_name.clone(),
            source,
        })?
        .clone();
    let columns = ColumnMap::from_headers(&headers, schema, &file_name)?;

    let mut items = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        // Header is line 1
        let line_no = idx + 2;
        let record = record.map_err(|source| DataLoadError::Csv {
            file: file_name.clone(),
            source,
        })?;
        items.push(parse_row(&record, &columns, &file_name, line_no)?);
    }

    Ok((items, columns.rating.is_some()))
}

fn parse_row(record: &StringRecord, columns: &ColumnMap, file: &str, line: usize) -> Result<Item> {
    let field = |position: usize| record.get(position).unwrap_or_default();

    let rating_percent = match columns.rating {
        Some(position) => parse_rating(field(position)).map_err(|reason| {
            DataLoadError::ParseError {
                file: file.to_string(),
                line,
                reason,
            }
        })?,
        None => None,
    };

    let extra: BTreeMap<String, CellValue> = columns
        .extra
        .iter()
        .map(|(position, header)| (header.clone(), CellValue::parse(field(*position))))
        .collect();

    Ok(Item {
        index: 0,
        title: field(columns.title).to_string(),
        category: columns.category.map(|p| normalize_category(field(p))),
        moods: parse_moods(field(columns.mood)),
        rating_percent,
        username: columns.username.map(|p| field(p).to_string()),
        extra,
        mood_column: CatalogSchema::Content.mood_column(),
        rating_column: columns.rating.is_some(),
    })
}

/// Strip list-literal decoration from a category cell.
///
/// Example: "['Vible']" -> "Vible"
///          "Flic" -> "Flic"
pub fn normalize_category(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '[' || c == ']')
        .replace(['\'', '"'], "")
        .trim()
        .to_string()
}

/// Split a serialized mood cell into labels.
///
/// Example: "['happy', 'calm']" -> vec!["happy", "calm"]
///          "happy,calm" -> vec!["happy", "calm"]
pub fn parse_moods(raw: &str) -> Vec<String> {
    raw.trim()
        .trim_matches(|c| matches!(c, '[' | ']' | '{' | '}'))
        .split(',')
        .map(|label| label.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a `rating_percent` cell; empty and `nan` cells have no rating
fn parse_rating(raw: &str) -> std::result::Result<Option<f64>, String> {
    let value = raw.trim().trim_end_matches('%').trim();
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let rating: f64 = value
        .parse()
        .map_err(|e| format!("Invalid rating_percent '{}': {}", raw, e))?;
    if rating.is_finite() {
        Ok(Some(rating))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category("['Vible']"), "Vible");
        assert_eq!(normalize_category("[\"The Igloo\"]"), "The Igloo");
        assert_eq!(normalize_category("Flic"), "Flic");
        assert_eq!(normalize_category("['E/ACC']"), "E/ACC");
    }

    #[test]
    fn test_parse_moods() {
        assert_eq!(parse_moods("['happy', 'calm']"), vec!["happy", "calm"]);
        assert_eq!(parse_moods("happy,excited"), vec!["happy", "excited"]);
        assert_eq!(parse_moods("{'sad'}"), vec!["sad"]);
        assert_eq!(parse_moods("happy"), vec!["happy"]);
        assert!(parse_moods("[]").is_empty());
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("87.5"), Ok(Some(87.5)));
        assert_eq!(parse_rating("90%"), Ok(Some(90.0)));
        assert_eq!(parse_rating(""), Ok(None));
        assert_eq!(parse_rating("nan"), Ok(None));
        assert!(parse_rating("high").is_err());
    }

    #[test]
    fn test_parse_content_catalog_drops_index_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ",username,title,category,moods,rating_percent,slug,views").unwrap();
        writeln!(file, "0,alice,Post A,\"['Vible']\",\"['happy', 'calm']\",80,post-a,120").unwrap();
        writeln!(file, "1,bob,Post B,\"['Flic']\",\"['sad']\",,post-b,2.5").unwrap();

        let (items, has_rating) = parse_catalog(file.path(), CatalogSchema::Content).unwrap();

        assert!(has_rating);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].username.as_deref(), Some("alice"));
        assert_eq!(items[0].category.as_deref(), Some("Vible"));
        assert_eq!(items[0].moods, vec!["happy", "calm"]);
        assert_eq!(items[0].rating_percent, Some(80.0));
        assert_eq!(items[0].extra["slug"], CellValue::Text("post-a".to_string()));
        assert_eq!(items[0].extra["views"], CellValue::Int(120));
        assert_eq!(items[1].extra["views"], CellValue::Float(2.5));
        assert!(!items[0].extra.contains_key(""));
        assert_eq!(items[1].rating_percent, None);
    }

    #[test]
    fn test_cell_value_typing() {
        assert_eq!(CellValue::parse("120"), CellValue::Int(120));
        assert_eq!(CellValue::parse("-3"), CellValue::Int(-3));
        assert_eq!(CellValue::parse("0.75"), CellValue::Float(0.75));
        assert_eq!(CellValue::parse(""), CellValue::Empty);
        assert_eq!(CellValue::parse("NaN"), CellValue::Empty);
        assert_eq!(CellValue::parse("inf"), CellValue::Text("inf".to_string()));
        assert_eq!(CellValue::parse("post-a"), CellValue::Text("post-a".to_string()));
    }

    #[test]
    fn test_parse_catalog_missing_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "username,title,moods").unwrap();
        writeln!(file, "alice,Post A,happy").unwrap();

        let err = parse_catalog(file.path(), CatalogSchema::Content).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn { ref column, .. } if column == "category"));
    }

    #[test]
    fn test_parse_catalog_bad_rating_reports_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "title,mood,rating_percent").unwrap();
        writeln!(file, "Post A,happy,75").unwrap();
        writeln!(file, "Post B,sad,lots").unwrap();

        let err = parse_catalog(file.path(), CatalogSchema::ColdStart).unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { line: 3, .. }));
    }

    #[test]
    fn test_parse_catalog_missing_file() {
        let err = parse_catalog(Path::new("does/not/exist.csv"), CatalogSchema::ColdStart)
            .unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
