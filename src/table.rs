use std::{fs, path::Path};

use ndarray::{Array2, ArrayView2};

use crate::{ImputerErr, Result};

/// Cell contents that stand for a missing value.
pub const MISSING_TOKENS: [&str; 6] = ["", "NA", "NaN", "nan", "null", "NULL"];

/// A numeric table with named columns, missing cells are stored as `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    values: Array2<f64>,
}

impl Table {
    /// Creates a new `Table`.
    ///
    /// # Errors
    /// Fails if the amount of column names differs from the amount of columns of `values`.
    pub fn new(columns: Vec<String>, values: Array2<f64>) -> Result<Self> {
        if columns.len() != values.ncols() {
            return Err(ImputerErr::ShapeMismatch {
                what: "column names",
                got: columns.len(),
                expected: values.ncols(),
            });
        }

        Ok(Self { columns, values })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// Parses comma separated content.
    ///
    /// The first non empty line holds the column names, every line after it is a row. Blank
    /// lines are skipped, except in single column tables where a blank line is a row whose only
    /// cell is missing. Quoting is not supported.
    pub fn parse_csv(content: &str) -> Result<Self> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()));

        let (_, header) = lines
            .by_ref()
            .find(|(_, line)| !line.is_empty())
            .ok_or(ImputerErr::EmptyTable)?;
        let columns: Vec<String> = header.split(',').map(|c| c.trim().to_string()).collect();
        let single_column = columns.len() == 1;

        let mut data = Vec::new();
        let mut nrows = 0;

        for (line_no, line) in lines {
            if line.is_empty() && !single_column {
                continue;
            }

            let cells: Vec<&str> = line.split(',').collect();
            if cells.len() != columns.len() {
                return Err(ImputerErr::RaggedRow {
                    line: line_no,
                    got: cells.len(),
                    expected: columns.len(),
                });
            }

            for (cell, column) in cells.into_iter().zip(&columns) {
                data.push(parse_cell(cell, line_no, column)?);
            }

            nrows += 1;
        }

        let values = Array2::from_shape_vec((nrows, columns.len()), data).map_err(|_| {
            ImputerErr::ShapeMismatch {
                what: "table cells",
                got: nrows,
                expected: columns.len(),
            }
        })?;

        Self::new(columns, values)
    }

    /// Reads and parses a CSV file.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ImputerErr::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse_csv(&content)
    }

    /// Renders the table as CSV, missing cells are left empty.
    pub fn to_csv(&self) -> String {
        let mut out = self.columns.join(",");
        out.push('\n');

        for row in self.values.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|v| if v.is_nan() { String::new() } else { v.to_string() })
                .collect();

            out.push_str(&cells.join(","));
            out.push('\n');
        }

        out
    }

    /// Writes the table as a CSV file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_csv()).map_err(|source| ImputerErr::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Marks every missing cell with `true`.
    pub fn missing_mask(&self) -> Array2<bool> {
        self.values.mapv(f64::is_nan)
    }

    /// A copy of the values with every missing cell replaced by `value`.
    pub fn filled(&self, value: f64) -> Array2<f64> {
        self.values.mapv(|v| if v.is_nan() { value } else { v })
    }
}

fn parse_cell(cell: &str, line: usize, column: &str) -> Result<f64> {
    let cell = cell.trim();
    if MISSING_TOKENS.contains(&cell) {
        return Ok(f64::NAN);
    }

    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ImputerErr::Parse {
            line,
            column: column.to_string(),
            value: cell.to_string(),
        }),
    }
}
