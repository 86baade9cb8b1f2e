//! Processing order: score descending with an explicit tie-breaker.

use crate::population::StudentId;

/// Order among students whose scores are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    /// Keep the input order (stable sort).
    #[default]
    InputOrder,

    /// Lower student id first.
    LowerIdFirst,
}

/// Returns input indices in processing order.
///
/// Scores compare exactly; the engine never merges nearly equal scores.
pub fn processing_order(keys: &[(StudentId, f64)], tie_break: TieBreak) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..keys.len()).collect();

    indices.sort_by(|&a, &b| {
        let (id_a, score_a) = keys[a];
        let (id_b, score_b) = keys[b];
        score_b.total_cmp(&score_a).then_with(|| match tie_break {
            TieBreak::InputOrder => std::cmp::Ordering::Equal,
            TieBreak::LowerIdFirst => id_a.cmp(&id_b),
        })
    });

    indices
}
