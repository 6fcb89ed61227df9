//! Flat records for tabular export.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Field every record carries.
pub const SOURCE_URL: &str = "source_url";

/// Separator used when a list value is rendered into one cell.
pub const LIST_SEPARATOR: &str = "; ";

/// A link as text plus resolved address.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Link {
    pub text: String,
    pub url: String,
}

/// A record value: a scalar or a short list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(u64),
    List(Vec<String>),
    Links(Vec<Link>),
}

impl FieldValue {
    /// Cell text for tabular output.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(n) => n.to_string(),
            Self::List(items) => items.join(LIST_SEPARATOR),
            Self::Links(links) => links
                .iter()
                .map(|link| format!("{} ({})", link.text, link.url))
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        Self::Number(u64::try_from(value).unwrap_or(u64::MAX))
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<Link>> for FieldValue {
    fn from(value: Vec<Link>) -> Self {
        Self::Links(value)
    }
}

/// An ordered field-name to value mapping.
///
/// Field names are unique; inserting an existing name replaces its value in
/// place, keeping the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedRecord {
    fields: Vec<(String, FieldValue)>,
}

impl ExtractedRecord {
    /// A record holding only its `source_url`.
    #[must_use]
    pub fn new(source_url: &str) -> Self {
        let mut record = Self::default();
        record.insert(SOURCE_URL, source_url);
        record
    }

    pub fn insert(&mut self, name: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| key == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Insert when `value` is present.
    pub fn insert_opt(&mut self, name: &str, value: Option<impl Into<FieldValue>>) {
        if let Some(value) = value {
            self.insert(name, value);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(key, _)| key == name).map(|(_, value)| value)
    }

    /// Text value of a field, if it is text.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Cells for `columns`, empty where the record lacks a field.
    #[must_use]
    pub fn row(&self, columns: &[String]) -> Vec<String> {
        columns
            .iter()
            .map(|column| self.get(column).map(FieldValue::render).unwrap_or_default())
            .collect()
    }
}

impl FromIterator<(String, FieldValue)> for ExtractedRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        let mut record = Self::default();
        for (name, value) in iter {
            record.insert(&name, value);
        }
        record
    }
}

impl Serialize for ExtractedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Union of field names across records, in first-seen order.
#[must_use]
pub fn column_union(records: &[ExtractedRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.to_string());
            }
        }
    }
    columns
}
