//! Simultaneous linear equations via Gaussian elimination with partial
//! pivoting.
//!
//! Rows use the boundary-equation convention shared with `Halfspace`: a row
//! `(a₁…aₙ, k)` states `Σ aᵢxᵢ + k = 0`. Degeneracy is reported instead of
//! solved: vertex enumeration skips singular face tuples rather than treating
//! them as errors.

use nalgebra::DVector;

use crate::cfg::EPS;

/// Outcome of solving `n` equations in `n` unknowns.
#[derive(Clone, Debug)]
pub enum Solution {
    /// Exactly one solution.
    Unique(DVector<f64>),
    /// The system is contradictory.
    None,
    /// The system is underdetermined.
    Many,
}

impl Solution {
    /// The solution point, if unique.
    #[inline]
    pub fn point(self) -> Option<DVector<f64>> {
        match self {
            Solution::Unique(x) => Some(x),
            Solution::None | Solution::Many => None,
        }
    }
}

/// Solve `rows.len()` equations in as many unknowns. Each row has one slot
/// more than the unknown count; rows are consumed as elimination scratch.
pub fn solve_system(mut rows: Vec<DVector<f64>>) -> Solution {
    let n = rows.len();
    debug_assert!(rows.iter().all(|row| row.len() == n + 1));

    // Forward phase: reduce to an upper-triangular system, swapping the
    // largest remaining pivot into place at each step.
    for i in 0..n.saturating_sub(1) {
        let mut max = i;
        for j in i + 1..n {
            if rows[j][i].abs() > rows[max][i].abs() {
                max = j;
            }
        }
        rows.swap(i, max);
        if rows[i][i] == 0.0 {
            // Whole column is zero; back substitution will report it.
            continue;
        }
        for j in i + 1..n {
            let factor = rows[j][i] / rows[i][i];
            for k in i..=n {
                rows[j][k] -= rows[i][k] * factor;
            }
        }
    }

    // Back substitution, classifying singular pivots as contradictory or
    // underdetermined by the residual of their row.
    let mut x = DVector::zeros(n);
    for j in (0..n).rev() {
        let mut sum = 0.0;
        for k in j + 1..n {
            sum += rows[j][k] * x[k];
        }
        let rhs = -rows[j][n] - sum;
        if rows[j][j].abs() < EPS {
            return if rhs.abs() < EPS {
                Solution::Many
            } else {
                Solution::None
            };
        }
        x[j] = rhs / rows[j][j];
    }
    Solution::Unique(x)
}
