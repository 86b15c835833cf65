use std::collections::HashSet;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::ParseError;

/// In-memory table read from a delimited file.
///
/// Every row holds exactly one cell per header, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, ParseError> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(ParseError::Malformed(format!(
                "row {} has {} fields, expected {}",
                index,
                row.len(),
                headers.len()
            )));
        }

        Ok(Self { headers, rows })
    }

    /// Parses comma-separated text with a header row. Quoted fields may
    /// contain delimiters, quotes and newlines. Ragged rows, a missing header
    /// row and repeated header names are rejected.
    pub fn from_csv(bytes: &[u8]) -> Result<Self, ParseError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(bytes);

        let headers = reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        if headers.is_empty() {
            return Err(ParseError::Malformed("missing header row".to_string()));
        }
        if let Some(duplicate) = first_duplicate(&headers) {
            return Err(ParseError::Malformed(format!(
                "duplicate column name: {}",
                duplicate
            )));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Header row followed by one line per row, same column order, no index
    /// column. Fields are quoted only when needed.
    pub fn to_csv(&self) -> Result<Vec<u8>, csv::Error> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());

        if !self.headers.is_empty() {
            writer.write_record(&self.headers)?;
        }
        for row in &self.rows {
            writer.write_record(row)?;
        }

        writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|cells| cells[index].as_str())
    }

    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|cells| cells[index].as_str()).collect())
    }

    /// Mutable access to a single column, in row order. The shape of the
    /// table cannot change through this.
    pub fn column_mut(&mut self, index: usize) -> impl Iterator<Item = &mut String> + '_ {
        self.rows.iter_mut().filter_map(move |cells| cells.get_mut(index))
    }
}

fn first_duplicate(headers: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    headers
        .iter()
        .find(|header| !seen.insert(header.as_str()))
        .map(String::as_str)
}
