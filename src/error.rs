//! Error types shared by the population and allocation components.

use thiserror::Error;

/// Errors surfaced by population import and allocation runs.
///
/// Distributional degeneracies (e.g. a zero standard deviation) are not
/// errors; they are recovered inside the sampler.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A record or table lacks the student identifier or score.
    #[error("missing required field `{field}`{}", row_suffix(.row))]
    MissingRequiredField {
        /// Name of the missing field (`id` or `score`).
        field: &'static str,
        /// Zero-based data row, when the failure is tied to one record.
        row: Option<usize>,
    },

    /// A value could not be interpreted as the expected numeric type.
    #[error("cannot parse `{column}` value {value:?}{}", row_suffix(.row))]
    Parse {
        /// Column the value came from.
        column: String,
        /// Zero-based data row; `None` when the header itself is malformed.
        row: Option<usize>,
        /// The raw text that failed to parse.
        value: String,
    },

    /// The same student id appears more than once.
    #[error("duplicate student id {0}")]
    DuplicateStudent(u64),

    /// A category was configured with negative seats under the strict policy.
    #[error("category {category:?} has negative capacity {seats}")]
    NegativeCapacity {
        /// Category name.
        category: String,
        /// Configured seat count.
        seats: i64,
    },

    /// A configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(r) => format!(" on row {r}"),
        None => String::new(),
    }
}

/// Result alias for fallible simulator operations.
pub type Result<T> = std::result::Result<T, SimError>;
