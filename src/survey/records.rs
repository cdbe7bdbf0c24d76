//! Survey response records loaded from a CSV export

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::{Result, SurveyError};

/// One respondent's row: header field name -> answer text, in column order.
#[derive(Debug, Clone)]
pub struct ResponseRecord {
    /// 1-based position among the data rows
    row: usize,
    fields: Arc<[String]>,
    values: Vec<String>,
}

impl ResponseRecord {
    /// Build a record from a shared header and the row's values.
    ///
    /// Values beyond the header length are ignored; missing trailing values
    /// read as absent fields.
    pub fn new(row: usize, fields: Arc<[String]>, values: Vec<String>) -> Self {
        Self {
            row,
            fields,
            values,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Look up the answer stored under `field`.
    pub fn get(&self, field: &str) -> Result<&str> {
        self.fields
            .iter()
            .position(|name| name == field)
            .and_then(|index| self.values.get(index))
            .map(String::as_str)
            .ok_or_else(|| SurveyError::MissingField {
                field: field.to_string(),
                row: self.row,
            })
    }

    /// Iterate `(field, answer)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .zip(self.values.iter())
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }
}

/// All responses of one survey file, in file order.
#[derive(Debug, Clone)]
pub struct ResponseSet {
    fields: Arc<[String]>,
    records: Vec<ResponseRecord>,
}

impl ResponseSet {
    /// Read and parse a survey export from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let set = Self::from_reader(file)?;

        tracing::info!(
            "Loaded {} responses ({} columns) from {}",
            set.len(),
            set.fields.len(),
            path.display()
        );

        Ok(set)
    }

    /// Parse comma-separated text whose first row is the header.
    ///
    /// Blank lines are skipped; every value is kept as text. A row whose
    /// column count differs from the header is a format error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let fields: Arc<[String]> = reader.headers()?.iter().map(str::to_string).collect();

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = row?;
            records.push(ResponseRecord::new(
                index + 1,
                Arc::clone(&fields),
                row.iter().map(str::to_string).collect(),
            ));
        }

        Ok(Self { fields, records })
    }

    /// Header field names, verbatim.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Fail on the first of `fields` absent from the header.
    ///
    /// An empty set never fails, since no record would be looked up.
    pub fn require_fields<'f, I>(&self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = &'f str>,
    {
        if self.is_empty() {
            return Ok(());
        }
        match fields
            .into_iter()
            .find(|field| !self.fields.iter().any(|name| name == field))
        {
            Some(field) => Err(SurveyError::MissingField {
                field: field.to_string(),
                row: 1,
            }),
            None => Ok(()),
        }
    }

    pub fn records(&self) -> &[ResponseRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResponseRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResponseSet {
    type Item = &'a ResponseRecord;
    type IntoIter = std::slice::Iter<'a, ResponseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
