//! Rayon-based parallelisation utilities.
//!
//! Scenario grids fan out over rows once the number of cells reaches
//! [`ParallelConfig::parallel_threshold`]. Every item is evaluated
//! independently and collected in input order, so the output does not depend
//! on whether the parallel path was taken.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Default minimum number of work items before using parallelism.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Configuration for parallel execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Minimum items before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    /// Configuration that never parallelises.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}

/// Maps `items` in order, in parallel when `work` reaches the threshold.
///
/// `work` is the caller's measure of total effort (grid cells for a grid
/// mapped by row), not necessarily `items.len()`.
pub fn ordered_map<T, R, F>(items: &[T], work: usize, config: &ParallelConfig, mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    if config.should_parallelize(work) {
        items.par_iter().map(mapper).collect()
    } else {
        items.iter().map(mapper).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_config_default() {
        let config = ParallelConfig::default();
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_should_parallelize() {
        let config = ParallelConfig::new(100);
        assert!(!config.should_parallelize(50));
        assert!(config.should_parallelize(100));
        assert!(config.should_parallelize(1000));
        assert!(!ParallelConfig::sequential().should_parallelize(usize::MAX - 1));
    }

    #[test]
    fn test_ordered_map_same_either_way() {
        let items: Vec<f64> = (0..200).map(|i| i as f64 * 0.1).collect();
        let f = |x: &f64| x.exp().sin();
        let par = ordered_map(&items, items.len(), &ParallelConfig::new(1), f);
        let seq = ordered_map(&items, items.len(), &ParallelConfig::sequential(), f);
        assert_eq!(par, seq);
        assert_eq!(par[10], (1.0f64).exp().sin());
    }
}
