//! Batches of composite graph states.
//!
//! A state is one joint assignment across all factor graphs: entry `i` of a
//! row is a vertex of factor `i`. A batch stores `N` such rows row-major.

use std::fmt;

use crate::error::{KernelError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateBatch {
    indices: Vec<usize>,
    nrows: usize,
    nfactors: usize,
}

impl StateBatch {
    /// Build from one vector per state, taking the width from the first row.
    /// Rows must share a non-zero width. A batch with no rows has no width to
    /// infer; build it with [`StateBatch::with_width`] or [`StateBatch::empty`].
    pub fn from_rows(rows: Vec<Vec<usize>>) -> Result<Self> {
        match rows.first() {
            Some(first) => {
                let nfactors = first.len();
                Self::with_width(nfactors, rows)
            }
            None => Err(KernelError::ShapeMismatch(
                "cannot infer the width of a batch with no rows".to_string(),
            )),
        }
    }

    /// Build from one vector per state, each of length `nfactors`. Zero rows
    /// is a valid (empty) batch.
    pub fn with_width(nfactors: usize, rows: Vec<Vec<usize>>) -> Result<Self> {
        if let Some((r, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != nfactors) {
            return Err(KernelError::ShapeMismatch(format!(
                "row {} has {} entries, expected {}",
                r,
                row.len(),
                nfactors
            )));
        }
        let nrows = rows.len();
        Self::from_flat(nrows, nfactors, rows.into_iter().flatten().collect())
    }

    /// Batch of zero states over `nfactors` factor graphs.
    pub fn empty(nfactors: usize) -> Result<Self> {
        Self::from_flat(0, nfactors, Vec::new())
    }

    /// Build from a row-major flat buffer of `nrows * nfactors` indices.
    /// `nfactors` must be non-zero; `nrows` may be zero.
    pub fn from_flat(nrows: usize, nfactors: usize, indices: Vec<usize>) -> Result<Self> {
        if nfactors == 0 {
            return Err(KernelError::ShapeMismatch(format!(
                "state batch needs at least one factor column, got {}x{}",
                nrows, nfactors
            )));
        }
        if indices.len() != nrows * nfactors {
            return Err(KernelError::ShapeMismatch(format!(
                "{} indices for a {}x{} batch",
                indices.len(),
                nrows,
                nfactors
            )));
        }
        Ok(Self { indices, nrows, nfactors })
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn nfactors(&self) -> usize {
        self.nfactors
    }

    /// `(nrows, nfactors)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.nfactors)
    }

    /// Vertex of factor `factor` in state `row`.
    ///
    /// # Panics
    ///
    /// If `row >= nrows()` or `factor >= nfactors()`.
    #[inline]
    pub fn get(&self, row: usize, factor: usize) -> usize {
        assert!(
            row < self.nrows && factor < self.nfactors,
            "Index out of bounds: ({}, {}) for {}x{} batch",
            row,
            factor,
            self.nrows,
            self.nfactors
        );
        self.indices[row * self.nfactors + factor]
    }

    /// Indices of state `row`, one per factor.
    ///
    /// # Panics
    ///
    /// If `row >= nrows()`.
    pub fn row(&self, row: usize) -> &[usize] {
        assert!(row < self.nrows, "Row {} out of bounds for {} rows", row, self.nrows);
        let start = row * self.nfactors;
        &self.indices[start..start + self.nfactors]
    }

    /// Vertex indices of every state for one factor, in row order.
    pub fn column(&self, factor: usize) -> impl Iterator<Item = usize> + '_ {
        self.indices
            .iter()
            .skip(factor)
            .step_by(self.nfactors)
            .copied()
    }
}

impl fmt::Display for StateBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.nrows {
            let row: Vec<String> = self.row(r).iter().map(|v| v.to_string()).collect();
            writeln!(f, "[{}]", row.join(", "))?;
        }
        Ok(())
    }
}
