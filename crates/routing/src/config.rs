//! Search configuration for the itinerary search.

/// Bounds applied to every search.
///
/// The search explores simple paths only, so it always terminates; these
/// bounds keep it cheap on dense networks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of legs in a returned path. `None` means the only limit
    /// is the number of distinct locations in the network minus one.
    pub max_legs: Option<usize>,

    /// Maximum number of paths to return, after ordering.
    pub max_results: usize,

    /// Maximum number of hops the search may try before giving up on
    /// further exploration.
    pub max_expansions: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_legs: Option<usize>, max_results: usize, max_expansions: usize) -> Self {
        Self {
            max_legs,
            max_results,
            max_expansions,
        }
    }

    /// Returns the leg bound for a network with `location_count` locations.
    pub fn effective_max_legs(&self, location_count: usize) -> usize {
        let structural = location_count.saturating_sub(1);
        self.max_legs.map_or(structural, |cap| cap.min(structural))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_legs: None,
            max_results: 10,
            max_expansions: 100_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = SearchConfig::default();
        assert_eq!(config.max_legs, None);
        assert_eq!(config.max_results, 10);
        assert_eq!(config.max_expansions, 100_000);
    }

    #[test]
    fn effective_max_legs_uses_tighter_bound() {
        let unbounded = SearchConfig::default();
        assert_eq!(unbounded.effective_max_legs(6), 5);
        assert_eq!(unbounded.effective_max_legs(0), 0);

        let capped = SearchConfig::new(Some(3), 10, 1000);
        assert_eq!(capped.effective_max_legs(6), 3);
        assert_eq!(capped.effective_max_legs(2), 1);
    }
}
