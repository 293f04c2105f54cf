use log::debug;
use ndarray::{Array1, ArrayView1};
use tabular::{Row, Table};

use std::fmt;

use crate::config::PlannerConfig;
use crate::constraint::{build_equalities, build_inequalities, ConstraintBlock};
use crate::error::PlanError;
use crate::index::RecipeIx;
use crate::matrix::RecipeMatrix;
use crate::objective::build_objective;

/// `min cost · x` subject to `A_ub x ≤ b_ub`, `A_eq x = b_eq`, `x ≥ 0`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearProgram {
    pub cost: Array1<f64>,
    pub inequalities: ConstraintBlock,
    pub equalities: ConstraintBlock,
}

impl LinearProgram {
    /// Derives objective and constraints from an augmented recipe matrix.
    ///
    /// Inputs are validated before anything is built, so a bad priority or
    /// target never produces a partial program.
    pub fn formulate(
        matrix: &RecipeMatrix,
        target: &Array1<f64>,
        priority: &[RecipeIx],
        config: &PlannerConfig,
    ) -> Result<Self, PlanError> {
        config.validate()?;
        let inequalities = build_inequalities(matrix, target)?;
        let equalities = build_equalities(matrix);
        let cost = build_objective(matrix, priority, config)?;

        debug!(
            "formulated LP: {} variables, {} inequalities, {} equalities",
            cost.len(),
            inequalities.len(),
            equalities.len()
        );

        Ok(Self {
            cost,
            inequalities,
            equalities,
        })
    }

    /// Number of variables (columns of the recipe matrix).
    pub fn n_vars(&self) -> usize {
        self.cost.len()
    }

    /// Bounds of every variable: `[0, +inf)`.
    pub fn bounds(&self) -> (f64, f64) {
        (0.0_f64, f64::INFINITY)
    }

    pub fn objective_value(&self, x: ArrayView1<f64>) -> f64 {
        self.cost.dot(&x)
    }

    /// Whether `x` is nonnegative and meets every constraint within `tol`.
    pub fn is_feasible(&self, x: ArrayView1<f64>, tol: f64) -> bool {
        x.len() == self.n_vars()
            && x.iter().all(|&v| v >= -tol)
            && self.inequalities.is_satisfied_by(x, tol)
            && self.equalities.is_satisfied_by(x, tol)
    }

    fn term_cells(&self, coeffs: ArrayView1<f64>) -> Vec<String> {
        coeffs
            .iter()
            .enumerate()
            .map(|(j, &c)| {
                if c == 0.0_f64 {
                    String::new()
                } else if c > 0.0_f64 {
                    format!("+{}*x{}", c, j)
                } else {
                    format!("-{}*x{}", c.abs(), j)
                }
            })
            .collect()
    }
}

impl fmt::Display for LinearProgram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        //OptDir, colon, one column per variable, Comp, rhs
        let n = self.n_vars();
        let columns = "{:<} {:^} ".to_string() + &"{:>} ".repeat(n) + "{:^} {:>}";
        let mut table = Table::new(columns.as_str());

        let mut row = Row::new().with_cell("Min").with_cell(":");
        for cell in self.term_cells(self.cost.view()) {
            row.add_cell(cell);
        }
        table.add_row(row.with_cell("").with_cell(""));

        let mut heading = Row::new().with_cell("Subject to").with_cell(":");
        for _ in 0..n + 2 {
            heading.add_cell("");
        }
        table.add_row(heading);

        for block in [&self.inequalities, &self.equalities] {
            for (lhs, rhs) in block.lhs.rows().into_iter().zip(block.rhs.iter()) {
                let mut row = Row::new().with_cell("").with_cell("");
                for cell in self.term_cells(lhs) {
                    row.add_cell(cell);
                }
                table.add_row(row.with_cell(block.comp).with_cell(rhs));
            }
        }

        write!(f, "{}", table)?;
        write!(f, "x \u{2265} 0")
    }
}
