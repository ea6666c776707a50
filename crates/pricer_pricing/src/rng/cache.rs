//! Random-draw matrices and the call-scoped draw cache.
//!
//! A [`RandomDrawCache`] lets one Greeks computation reuse the same random
//! numbers for the base price and every bumped re-price (common random
//! numbers). It is owned by the caller, lives for a single computation and
//! is never shared between legs.

use std::collections::HashMap;
use std::fmt;

use crate::mc::ConfigError;

/// Row-major `rows × cols` matrix of pre-drawn random numbers
/// (paths × steps, or paths × fixings).
#[derive(Debug, Clone, PartialEq)]
pub struct DrawMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DrawMatrix {
    /// Wraps row-major data.
    ///
    /// # Errors
    /// `InvalidParameter` if `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, ConfigError> {
        if data.len() != rows * cols {
            return Err(ConfigError::InvalidParameter {
                name: "draws",
                value: format!("{} values cannot fill a {}x{} matrix", data.len(), rows, cols),
            });
        }
        Ok(Self { rows, cols, data })
    }

    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// One row (one path).
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterates over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on zero, and a zero-width matrix has no data
        self.data.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// Flat row-major data.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Fails unless the matrix is `rows × cols`.
    pub fn ensure_shape(&self, name: &'static str, rows: usize, cols: usize) -> Result<(), ConfigError> {
        if self.shape() == (rows, cols) {
            Ok(())
        } else {
            Err(ConfigError::DrawShapeMismatch {
                name,
                expected: (rows, cols),
                actual: self.shape(),
            })
        }
    }
}

/// Cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawKey {
    /// Standard normal increments ("z")
    Normal,
    /// Uniforms for Brownian-bridge crossing tests ("u")
    Uniform,
}

impl fmt::Display for DrawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawKey::Normal => f.write_str("z"),
            DrawKey::Uniform => f.write_str("u"),
        }
    }
}

/// Caller-owned cache of random draws for one Greeks computation.
///
/// # Examples
/// ```
/// use pricer_pricing::rng::{DrawKey, PricerRng, RandomDrawCache};
///
/// let mut cache = RandomDrawCache::new();
/// assert!(cache.is_empty());
///
/// let z = PricerRng::from_seed(7).normal_matrix(10, 4);
/// cache.insert(DrawKey::Normal, z.clone());
/// assert_eq!(cache.get(DrawKey::Normal), Some(&z));
/// assert!(cache.get(DrawKey::Uniform).is_none());
/// ```
#[derive(Debug, Default, Clone)]
pub struct RandomDrawCache {
    draws: HashMap<DrawKey, DrawMatrix>,
}

impl RandomDrawCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows the draws stored under `key`.
    pub fn get(&self, key: DrawKey) -> Option<&DrawMatrix> {
        self.draws.get(&key)
    }

    /// Stores draws under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: DrawKey, draws: DrawMatrix) {
        self.draws.insert(key, draws);
    }

    /// True if `key` is populated.
    pub fn contains(&self, key: DrawKey) -> bool {
        self.draws.contains_key(&key)
    }

    /// True if nothing has been drawn yet.
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.draws.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_construction() {
        let m = DrawMatrix::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m.row(1), &[3.0, 4.0]);
        assert_eq!(m.rows().count(), 2);
        assert!(DrawMatrix::new(2, 3, vec![0.0; 5]).is_err());
    }

    #[test]
    fn test_zero_width_rows() {
        let m = DrawMatrix::new(3, 0, Vec::new()).unwrap();
        assert_eq!(m.rows().count(), 0);
    }

    #[test]
    fn test_ensure_shape() {
        let m = DrawMatrix::new(2, 3, vec![0.0; 6]).unwrap();
        assert!(m.ensure_shape("z", 2, 3).is_ok());
        assert_eq!(
            m.ensure_shape("z", 3, 2),
            Err(ConfigError::DrawShapeMismatch {
                name: "z",
                expected: (3, 2),
                actual: (2, 3),
            })
        );
    }

    #[test]
    fn test_cache_slots() {
        let mut cache = RandomDrawCache::new();
        cache.insert(DrawKey::Uniform, DrawMatrix::new(1, 1, vec![0.5]).unwrap());
        assert!(cache.contains(DrawKey::Uniform));
        assert!(!cache.contains(DrawKey::Normal));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(DrawKey::Normal.to_string(), "z");
    }
}
