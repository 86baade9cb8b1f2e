//! Tabular import of externally supplied populations.
//!
//! The expected layout is a header row followed by one row per student:
//!
//! ```text
//! id,score,pref1,pref2,pref3
//! 1,8.25,Software,Mechanical,
//! 2,7.5,Civil,,Software
//! ```
//!
//! `id` and `score` are required (`gpa` is accepted for `score`). Preference
//! columns are named `pref<N>` with `N >= 1`; any other column is ignored.
//! Ranks above [`MAX_PREFERENCE_RANK`] are rejected as a parse error on the
//! header. Empty cells are missing ranks. Fields may be wrapped in double
//! quotes, with `""` standing for a literal quote; a quoted field may span
//! lines.

use std::collections::BTreeSet;

use super::types::{Population, StudentId, StudentRecord};
use crate::error::{Result, SimError};

const ID_COLUMN: &str = "id";
const SCORE_COLUMNS: [&str; 2] = ["score", "gpa"];
const PREFERENCE_PREFIX: &str = "pref";

/// Highest preference rank a `pref<N>` column may carry.
pub const MAX_PREFERENCE_RANK: usize = 64;

/// A parsed header plus raw data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl StudentTable {
    /// Splits comma-separated text into header and rows.
    ///
    /// Blank lines are skipped. Fails with `MissingRequiredField` when the
    /// text has no header at all.
    pub fn parse(text: &str) -> Result<Self> {
        let mut records = split_records(text).into_iter();
        let header = records.next().ok_or(SimError::MissingRequiredField {
            field: ID_COLUMN,
            row: None,
        })?;
        let rows = records.collect();
        Ok(Self { header, rows })
    }

    /// Column names as written in the header.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Converts the rows into student records, keeping row order.
    ///
    /// Every score must parse as a finite number and every id as a positive
    /// integer; ids must be unique.
    pub fn into_population(self) -> Result<Population> {
        let id_col = self.column(&[ID_COLUMN]).ok_or(SimError::MissingRequiredField {
            field: ID_COLUMN,
            row: None,
        })?;
        let score_col = self.column(&SCORE_COLUMNS).ok_or(SimError::MissingRequiredField {
            field: "score",
            row: None,
        })?;
        let pref_cols = self.preference_columns()?;

        let mut seen = BTreeSet::new();
        let mut records = Vec::with_capacity(self.rows.len());

        for (row, fields) in self.rows.iter().enumerate() {
            let cell = |col: usize| fields.get(col).map(|s| s.as_str()).unwrap_or("");

            let id = parse_id(cell(id_col), &self.header[id_col], row)?;
            if !seen.insert(id) {
                return Err(SimError::DuplicateStudent(id));
            }

            let score = parse_score(cell(score_col), &self.header[score_col], row)?;

            let filled: Vec<(usize, &str)> = pref_cols
                .iter()
                .map(|&(rank, col)| (rank, cell(col)))
                .filter(|(_, value)| !value.is_empty())
                .collect();
            let ranks = filled.last().map_or(0, |&(rank, _)| rank);
            let mut preferences: Vec<Option<String>> = vec![None; ranks];
            for (rank, value) in filled {
                preferences[rank - 1] = Some(value.to_string());
            }

            records.push(StudentRecord::with_ranked(id, score, preferences));
        }

        Ok(Population::new(records))
    }

    fn column(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|name| {
            self.header
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
        })
    }

    /// `(rank, column index)` pairs sorted by rank; the first column wins
    /// when a rank is repeated.
    fn preference_columns(&self) -> Result<Vec<(usize, usize)>> {
        let mut cols: Vec<(usize, usize)> = Vec::new();
        for (i, name) in self.header.iter().enumerate() {
            let lower = name.to_ascii_lowercase();
            let Some(suffix) = lower.strip_prefix(PREFERENCE_PREFIX) else {
                continue;
            };
            if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            let rank = match suffix.parse::<usize>() {
                Ok(rank) if rank <= MAX_PREFERENCE_RANK => rank,
                _ => {
                    return Err(SimError::Parse {
                        column: name.clone(),
                        row: None,
                        value: name.clone(),
                    })
                }
            };
            if rank >= 1 && !cols.iter().any(|&(r, _)| r == rank) {
                cols.push((rank, i));
            }
        }
        cols.sort_unstable();
        Ok(cols)
    }
}

/// Parses comma-separated text straight into a population.
///
/// # Examples
///
/// ```
/// use u_allocsim::population::parse_population;
///
/// let pop = parse_population("id,gpa,pref1,pref2\n1,8.5,Software,Civil\n").unwrap();
/// assert_eq!(pop.len(), 1);
/// assert_eq!(pop.records()[0].score, 8.5);
/// ```
pub fn parse_population(text: &str) -> Result<Population> {
    StudentTable::parse(text)?.into_population()
}

fn parse_id(raw: &str, column: &str, row: usize) -> Result<StudentId> {
    if raw.is_empty() {
        return Err(SimError::MissingRequiredField {
            field: ID_COLUMN,
            row: Some(row),
        });
    }
    match raw.parse::<StudentId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(SimError::Parse {
            column: column.to_string(),
            row: Some(row),
            value: raw.to_string(),
        }),
    }
}

fn parse_score(raw: &str, column: &str, row: usize) -> Result<f64> {
    match raw.parse::<f64>() {
        Ok(score) if score.is_finite() => Ok(score),
        _ => Err(SimError::Parse {
            column: column.to_string(),
            row: Some(row),
            value: raw.to_string(),
        }),
    }
}

/// Splits text into records of comma-separated fields.
///
/// Double quotes protect commas and line breaks. Blank lines are dropped.
fn split_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(take_field(&mut current)),
            '\r' if !quoted && chars.peek() == Some(&'\n') => {}
            '\n' if !quoted => {
                fields.push(take_field(&mut current));
                push_record(&mut records, std::mem::take(&mut fields));
            }
            _ => current.push(c),
        }
    }
    fields.push(take_field(&mut current));
    push_record(&mut records, fields);
    records
}

fn take_field(current: &mut String) -> String {
    let field = current.trim().to_string();
    current.clear();
    field
}

fn push_record(records: &mut Vec<Vec<String>>, fields: Vec<String>) {
    let blank = fields.len() == 1 && fields[0].is_empty();
    if !blank {
        records.push(fields);
    }
}
