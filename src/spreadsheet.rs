/*!
 * Sentence extraction from CSV input files.
 *
 * Pulls one column out of a delimited file, selected by header name or
 * 0-based index. Values are trimmed; blank cells are retained so the
 * pipeline's positional contract holds for every input row.
 */

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use csv::ReaderBuilder;
use log::info;

use crate::errors::AppError;

/// Which column of the input file holds the sentences
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    /// Match a header cell by exact name
    Name(String),
    /// 0-based column index
    Index(usize),
}

impl FromStr for ColumnSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // A bare number selects by position, anything else by header
        Ok(match s.parse::<usize>() {
            Ok(index) => ColumnSelector::Index(index),
            Err(_) => ColumnSelector::Name(s.to_string()),
        })
    }
}

impl fmt::Display for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSelector::Name(name) => write!(f, "{}", name),
            ColumnSelector::Index(index) => write!(f, "#{}", index),
        }
    }
}

/// Extract the selected column from a CSV file, one value per data row
pub fn extract_column(path: &Path, selector: &ColumnSelector) -> Result<Vec<String>, AppError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| AppError::File(format!("{}: {}", path.display(), e)))?;

    let headers = reader
        .headers()
        .map_err(|e| AppError::ParseError(e.to_string()))?
        .clone();

    let column_index = match selector {
        ColumnSelector::Index(index) => {
            if *index >= headers.len() {
                return Err(AppError::ColumnNotFound(format!(
                    "index {} out of range (file has {} columns)",
                    index,
                    headers.len()
                )));
            }
            *index
        }
        ColumnSelector::Name(name) => headers
            .iter()
            .position(|header| header.trim() == name)
            .ok_or_else(|| {
                AppError::ColumnNotFound(format!(
                    "'{}' (available: {})",
                    name,
                    headers.iter().collect::<Vec<_>>().join(", ")
                ))
            })?,
    };

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| AppError::ParseError(e.to_string()))?;
        // Short rows yield a blank cell rather than an error
        let value = record.get(column_index).unwrap_or("").trim().to_string();
        values.push(value);
    }

    info!(
        "Extracted {} rows from column {} of {}",
        values.len(),
        selector,
        path.display()
    );

    Ok(values)
}
