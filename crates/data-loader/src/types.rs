//! Core domain types for the content catalogs.
//!
//! An [`Item`] is one row of a catalog file. For the content catalog a row
//! is a single view event, so the same title shows up once per viewer.
//! [`Catalog`] keeps rows in file order and builds the lookups the
//! recommendation paths need (title → first row, username → viewed rows).

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of a row in its catalog file.
///
/// For the content catalog this is also the row/column key into the
/// similarity matrix, so it must follow the order the matrix was built in.
pub type ItemIndex = usize;

// =============================================================================
// Catalog schema
// =============================================================================

/// Which tabular file a catalog was read from.
///
/// The two files share most columns but name the mood column differently
/// and only the content catalog carries viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogSchema {
    /// View events used by the similarity path (`CONTENT_based_filtering.csv`)
    Content,
    /// Static catalog used by the mood path (`completed_data_for_cold_start.csv`)
    ColdStart,
}

impl CatalogSchema {
    /// Columns that must be present in the header row
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            CatalogSchema::Content => &["username", "title", "category", "moods"],
            CatalogSchema::ColdStart => &["title", "mood"],
        }
    }

    /// Name of the column holding the serialized mood list
    pub fn mood_column(self) -> &'static str {
        match self {
            CatalogSchema::Content => "moods",
            CatalogSchema::ColdStart => "mood",
        }
    }
}

// =============================================================================
// Cell values
// =============================================================================

/// A cell from a column the recommender does not interpret.
///
/// Numbers stay numbers so responses mirror the file: `120` serializes as
/// `120`, not `"120"`. Empty cells serialize as `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Type a raw CSV cell: integer, then finite float, then text
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            return CellValue::Empty;
        }
        if let Ok(value) = trimmed.parse::<i64>() {
            return CellValue::Int(value);
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => CellValue::Float(value),
            _ => CellValue::Text(raw.to_string()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_none(),
            CellValue::Int(value) => serializer.serialize_i64(*value),
            CellValue::Float(value) => serializer.serialize_f64(*value),
            CellValue::Text(value) => serializer.serialize_str(value),
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

// =============================================================================
// Item
// =============================================================================

/// One catalog row with its list-like fields already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub index: ItemIndex,
    pub title: String,
    /// Bare category label, e.g. `"['Vible']"` is stored as `"Vible"`
    pub category: Option<String>,
    pub moods: Vec<String>,
    pub rating_percent: Option<f64>,
    /// Viewer of this row; only the content catalog has one
    pub username: Option<String>,
    /// Every other column, typed per cell
    pub extra: BTreeMap<String, CellValue>,
    pub(crate) mood_column: &'static str,
    /// Whether the source catalog has a `rating_percent` column
    pub(crate) rating_column: bool,
}

impl Item {
    /// Create an item with only a title set.
    ///
    /// The index is assigned when the item is pushed into a [`Catalog`].
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            index: 0,
            title: title.into(),
            category: None,
            moods: Vec::new(),
            rating_percent: None,
            username: None,
            extra: BTreeMap::new(),
            mood_column: CatalogSchema::Content.mood_column(),
            rating_column: false,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_moods<I, S>(mut self, moods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.moods = moods.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rating(mut self, rating_percent: f64) -> Self {
        self.rating_percent = Some(rating_percent);
        self
    }

    pub fn with_extra(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.extra.insert(column.into(), value.into());
        self
    }

    /// True when every column matches `other`.
    ///
    /// The row index is not a column, so two rows with identical content
    /// count as the same record.
    pub fn same_record(&self, other: &Item) -> bool {
        self.title == other.title
            && self.category == other.category
            && self.moods == other.moods
            && self.rating_percent == other.rating_percent
            && self.username == other.username
            && self.extra == other.extra
    }

    /// True when any requested mood is contained in one of this row's mood
    /// labels. Matching is substring based and case-sensitive, so `"calm"`
    /// also matches a `"calming"` label.
    pub fn matches_any_mood<S: AsRef<str>>(&self, moods: &[S]) -> bool {
        moods.iter().any(|mood| {
            let mood = mood.as_ref();
            self.moods.iter().any(|label| label.contains(mood))
        })
    }

    /// True when the normalized category equals `label` exactly
    pub fn has_category(&self, label: &str) -> bool {
        self.category.as_deref() == Some(label)
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(username) = &self.username {
            map.serialize_entry("username", username)?;
        }
        map.serialize_entry("title", &self.title)?;
        if let Some(category) = &self.category {
            map.serialize_entry("category", category)?;
        }
        map.serialize_entry(self.mood_column, &self.moods)?;
        // Absent from the output when the file had no such column
        if self.rating_column || self.rating_percent.is_some() {
            map.serialize_entry("rating_percent", &self.rating_percent)?;
        }
        for (column, value) in &self.extra {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Catalog - rows in file order plus lookups
// =============================================================================

/// An ordered, read-only set of catalog rows.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) schema: CatalogSchema,
    pub(crate) items: Vec<Item>,
    pub(crate) has_rating_column: bool,

    /// First row index for each title
    pub(crate) title_index: HashMap<String, ItemIndex>,
    /// Rows viewed by each user, in file order
    pub(crate) user_views: HashMap<String, Vec<ItemIndex>>,
}

impl Catalog {
    /// Creates a new, empty catalog
    pub fn new(schema: CatalogSchema) -> Self {
        Self {
            schema,
            items: Vec::new(),
            has_rating_column: false,
            title_index: HashMap::new(),
            user_views: HashMap::new(),
        }
    }

    /// Append a row and return the index it was given.
    ///
    /// Pushing a rated item marks the catalog as having a rating column.
    pub fn push_item(&mut self, mut item: Item) -> ItemIndex {
        let index = self.items.len();
        item.index = index;
        item.mood_column = self.schema.mood_column();

        if item.rating_percent.is_some() && !self.has_rating_column {
            self.set_has_rating_column(true);
        }
        item.rating_column = self.has_rating_column;
        self.title_index.entry(item.title.clone()).or_insert(index);
        if let Some(username) = &item.username {
            self.user_views
                .entry(username.clone())
                .or_insert_with(Vec::new)
                .push(index);
        }

        self.items.push(item);
        index
    }

    /// Declare whether the source file had a `rating_percent` column, even
    /// if every cell in it was empty.
    pub fn set_has_rating_column(&mut self, present: bool) {
        self.has_rating_column = present;
        for item in &mut self.items {
            item.rating_column = present;
        }
    }

    pub fn schema(&self) -> CatalogSchema {
        self.schema
    }

    pub fn has_rating_column(&self) -> bool {
        self.has_rating_column
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get_item(&self, index: ItemIndex) -> Option<&Item> {
        self.items.get(index)
    }

    /// Row indices viewed by `username`; empty for unknown users
    pub fn view_indices(&self, username: &str) -> &[ItemIndex] {
        self.user_views
            .get(username)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All rows whose `username` equals the query, in file order
    pub fn get_user_views(&self, username: &str) -> Vec<&Item> {
        self.view_indices(username)
            .iter()
            .filter_map(|&index| self.items.get(index))
            .collect()
    }

    /// Index of the first row carrying `title`
    pub fn find_index_by_title(&self, title: &str) -> Option<ItemIndex> {
        self.title_index.get(title).copied()
    }

    /// Known viewers, sorted
    pub fn usernames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.user_views.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Case-insensitive substring search over titles.
    ///
    /// Returns the first row of each matching title; exact matches sort
    /// before partial ones.
    pub fn search_titles(&self, query: &str) -> Vec<&Item> {
        let query = query.to_lowercase();
        let mut matches: Vec<(bool, &Item)> = self
            .title_index
            .values()
            .filter_map(|&index| self.items.get(index))
            .filter_map(|item| {
                let title = item.title.to_lowercase();
                if title == query {
                    Some((true, item))
                } else if title.contains(&query) {
                    Some((false, item))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.index.cmp(&b.1.index)));
        matches.into_iter().map(|(_, item)| item).collect()
    }

    /// (rows, distinct titles, viewers) for debugging/validation
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.items.len(), self.title_index.len(), self.user_views.len())
    }
}
