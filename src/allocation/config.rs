//! Allocation run configuration.

use super::order::TieBreak;

/// How configured categories with negative seat counts are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NegativeCapacityPolicy {
    /// Treat negative seats as "no space".
    #[default]
    Tolerate,

    /// Fail the run before any student is processed.
    Reject,
}

/// Configuration for [`AllocationRunner`](super::AllocationRunner).
///
/// # Examples
///
/// ```
/// use u_allocsim::allocation::{AllocationConfig, TieBreak};
///
/// let config = AllocationConfig::default()
///     .with_max_preferences(3)
///     .with_fallback(false)
///     .with_tie_break(TieBreak::LowerIdFirst)
///     .with_seed(123);
/// assert_eq!(config.max_preferences, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationConfig {
    /// Rank slots considered per student; later ranks are ignored.
    pub max_preferences: usize,

    /// Whether a student whose preferences are all full may be placed in a
    /// random category outside their list.
    pub allow_fallback: bool,

    /// Order among students with identical scores.
    pub tie_break: TieBreak,

    /// Handling of negative seat counts.
    pub negative_capacity: NegativeCapacityPolicy,

    /// Random seed for fallback draws. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            max_preferences: 5,
            allow_fallback: true,
            tie_break: TieBreak::default(),
            negative_capacity: NegativeCapacityPolicy::default(),
            seed: None,
        }
    }
}

impl AllocationConfig {
    pub fn with_max_preferences(mut self, n: usize) -> Self {
        self.max_preferences = n;
        self
    }

    pub fn with_fallback(mut self, allow: bool) -> Self {
        self.allow_fallback = allow;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_negative_capacity(mut self, policy: NegativeCapacityPolicy) -> Self {
        self.negative_capacity = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AllocationConfig::default();
        assert_eq!(config.max_preferences, 5);
        assert!(config.allow_fallback);
        assert_eq!(config.tie_break, TieBreak::InputOrder);
        assert_eq!(config.negative_capacity, NegativeCapacityPolicy::Tolerate);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder() {
        let config = AllocationConfig::default()
            .with_fallback(false)
            .with_negative_capacity(NegativeCapacityPolicy::Reject)
            .with_seed(9);
        assert!(!config.allow_fallback);
        assert_eq!(config.negative_capacity, NegativeCapacityPolicy::Reject);
        assert_eq!(config.seed, Some(9));
    }
}
