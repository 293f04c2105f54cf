use log::debug;
use ndarray::{Array1, Array2, ArrayView1, Axis};

use std::fmt;

use crate::error::PlanError;
use crate::matrix::RecipeMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comp {
    Le, // <=
    Ge, // >=
    Eq, // ==
}

impl fmt::Display for Comp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Comp::Le => write!(f, "\u{2264}"),
            Comp::Eq => write!(f, "="),
            Comp::Ge => write!(f, "\u{2265}"),
        }
    }
}

/// A set of rows `lhs[i, :] · x (comp) rhs[i]` sharing one comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintBlock {
    pub lhs: Array2<f64>,
    pub comp: Comp,
    pub rhs: Array1<f64>,
}

impl ConstraintBlock {
    pub fn new(lhs: Array2<f64>, comp: Comp, rhs: Array1<f64>) -> Result<Self, PlanError> {
        let block = Self { lhs, comp, rhs };
        block.check_shape(block.lhs.ncols())?;
        Ok(block)
    }

    /// Rows of `lhs` must match `rhs`, columns must match `n_vars`.
    pub fn check_shape(&self, n_vars: usize) -> Result<(), PlanError> {
        if self.lhs.nrows() != self.rhs.len() {
            return Err(PlanError::DimensionMismatch {
                what: "constraint rhs",
                expected: self.lhs.nrows(),
                found: self.rhs.len(),
            });
        }
        if self.lhs.ncols() != n_vars {
            return Err(PlanError::DimensionMismatch {
                what: "constraint lhs columns",
                expected: n_vars,
                found: self.lhs.ncols(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }

    /// Whether `x` satisfies every row within `tol`.
    /// A badly shaped `x` or block never satisfies.
    pub fn is_satisfied_by(&self, x: ArrayView1<f64>, tol: f64) -> bool {
        if self.check_shape(x.len()).is_err() {
            return false;
        }
        let lhs = self.lhs.dot(&x);
        lhs.iter().zip(self.rhs.iter()).all(|(&l, &r)| match self.comp {
            Comp::Le => l <= r + tol,
            Comp::Ge => l >= r - tol,
            Comp::Eq => (l - r).abs() <= tol,
        })
    }
}

/// Net production of every item must reach `target`.
///
/// The requirement `M[:-1, :] · x ≥ target` is negated into the `≤` form
/// solvers expect: `-M[:-1, :] · x ≤ -target`. The tax row is left to
/// [`build_equalities`].
pub fn build_inequalities(
    matrix: &RecipeMatrix,
    target: &Array1<f64>,
) -> Result<ConstraintBlock, PlanError> {
    if target.len() != matrix.item_count() {
        return Err(PlanError::DimensionMismatch {
            what: "target",
            expected: matrix.item_count(),
            found: target.len(),
        });
    }

    let lhs = -&matrix.item_rows();
    let rhs = -target;

    debug!("{} inequality rows over {} recipes", lhs.nrows(), lhs.ncols());
    ConstraintBlock::new(lhs, Comp::Le, rhs)
}

/// Tax produced equals tax consumed: `M[tax, :] · x = 0`.
pub fn build_equalities(matrix: &RecipeMatrix) -> ConstraintBlock {
    let lhs = matrix
        .matrix()
        .row(matrix.tax_row_index())
        .insert_axis(Axis(0))
        .to_owned();
    //one row, one rhs: always well shaped
    ConstraintBlock {
        lhs,
        comp: Comp::Eq,
        rhs: Array1::zeros(1),
    }
}
