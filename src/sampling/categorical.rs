//! Categorical draws over discrete weight vectors.
//!
//! All draws follow the same mapping: one uniform `r` in `[0, 1)` selects
//! the first index whose cumulative normalized weight reaches `r`, scanning
//! in index order. If rounding leaves `r` above the final cumulative value,
//! the last index is selected.

use rand::Rng;

/// Draws one index proportionally to `weights`.
///
/// Weights need not be normalized. Returns `None` when the slice is empty or
/// carries no positive mass, leaving the caller to decide how to proceed.
pub fn draw_index<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 || !total.is_finite() {
        return None;
    }

    let r: f64 = rng.random();
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w / total;
        if r <= cumulative {
            return Some(i);
        }
    }

    Some(weights.len() - 1) // floating-point fallback
}

/// Draws `k` indices independently (with replacement).
///
/// Returns an empty vector when `weights` has no positive mass.
pub fn sample_with_replacement<R: Rng>(weights: &[f64], k: usize, rng: &mut R) -> Vec<usize> {
    let mut out = Vec::with_capacity(k);
    for _ in 0..k {
        match draw_index(weights, rng) {
            Some(i) => out.push(i),
            None => break,
        }
    }
    out
}

/// What to do when the remaining weight mass reaches zero before
/// enough distinct indices were drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustedMass {
    /// Take the last remaining index.
    TakeLast,
    /// Pick uniformly among the remaining indices.
    Uniform,
}

/// Draws up to `k` distinct indices, removing each chosen index and its mass
/// before the next draw.
///
/// Stops early only when every index has been drawn. Indices refer to
/// positions in the original `weights` slice, in draw order.
pub fn sample_without_replacement<R: Rng>(
    weights: &[f64],
    k: usize,
    on_exhausted: ExhaustedMass,
    rng: &mut R,
) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..weights.len()).collect();
    let mut mass: Vec<f64> = weights.to_vec();
    let target = k.min(weights.len());
    let mut out = Vec::with_capacity(target);

    while out.len() < target {
        let pos = match draw_index(&mass, rng) {
            Some(p) => p,
            None => match on_exhausted {
                ExhaustedMass::TakeLast => remaining.len() - 1,
                ExhaustedMass::Uniform => rng.random_range(0..remaining.len()),
            },
        };
        out.push(remaining.remove(pos));
        mass.remove(pos);
    }

    out
}
