use ndarray::Array1;
use tabular::{Row, Table};
use uuid::Uuid;

use std::fmt;

use crate::error::PlanError;
use crate::index::RecipeIx;
use crate::matrix::{RecipeKind, RecipeMatrix};

/// Solved production plan: how often each column of the recipe matrix runs.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductionPlan {
    matrix_id: Uuid,
    usage: Array1<f64>,
    net_output: Array1<f64>,
    objective: f64,
    kinds: Vec<RecipeKind>,
    raw_columns: Vec<usize>,
    tax_row: usize,
    tax_col: usize,
}

impl ProductionPlan {
    pub(crate) fn new(matrix: &RecipeMatrix, usage: Array1<f64>, objective: f64) -> Self {
        let net_output = matrix.matrix().dot(&usage);
        let kinds = (0..matrix.recipe_count())
            .filter_map(|col| matrix.kind_of_column(col))
            .collect();
        Self {
            matrix_id: matrix.id(),
            usage,
            net_output,
            objective,
            kinds,
            raw_columns: matrix.raw_recipe_columns().to_vec(),
            tax_row: matrix.tax_row_index(),
            tax_col: matrix.tax_column_index(),
        }
    }

    /// Runs per column, raw and tax pseudo-recipes included.
    pub fn usage(&self) -> &Array1<f64> {
        &self.usage
    }

    /// `M · usage`, tax row included as the last entry.
    pub fn net_output(&self) -> &Array1<f64> {
        &self.net_output
    }

    pub fn objective(&self) -> f64 {
        self.objective
    }

    pub fn usage_of(&self, recipe: RecipeIx) -> Result<f64, PlanError> {
        if recipe.matrix_id() != self.matrix_id {
            return Err(PlanError::ForeignIndex {
                kind: "recipe",
                index: recipe.col(),
            });
        }
        self.usage
            .get(recipe.col())
            .copied()
            .ok_or(PlanError::InvalidIndex {
                kind: "recipe",
                index: recipe.col(),
                len: self.usage.len(),
            })
    }

    pub fn tax_usage(&self) -> f64 {
        self.usage[self.tax_col]
    }

    /// Units bought per raw pseudo-recipe, in the order raw items were requested.
    pub fn raw_usage(&self) -> Vec<(RecipeIx, f64)> {
        self.raw_columns
            .iter()
            .map(|&col| (RecipeIx::new(self.matrix_id, col), self.usage[col]))
            .collect()
    }

    /// Columns that run more than `tol` times.
    pub fn active_recipes(&self, tol: f64) -> Vec<(RecipeIx, RecipeKind, f64)> {
        self.usage
            .iter()
            .enumerate()
            .filter(|(_j, v)| v.abs() > tol)
            .map(|(j, &v)| (RecipeIx::new(self.matrix_id, j), self.kinds[j], v))
            .collect()
    }

    /// Net output meets `target` on every item and the tax balances, within `tol`.
    pub fn satisfies(&self, target: &Array1<f64>, tol: f64) -> Result<bool, PlanError> {
        if target.len() != self.tax_row {
            return Err(PlanError::DimensionMismatch {
                what: "target",
                expected: self.tax_row,
                found: target.len(),
            });
        }
        let items_met = self
            .net_output
            .iter()
            .zip(target.iter())
            .all(|(&out, &want)| out >= want - tol);
        let tax_balanced = self.net_output[self.tax_row].abs() <= tol;
        Ok(items_met && tax_balanced)
    }
}

impl fmt::Display for ProductionPlan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut table = Table::new("{:<}  {:<}  {:>}");
        table.add_row(Row::new().with_cell("recipe").with_cell("kind").with_cell("runs"));
        for (recipe, kind, runs) in self.active_recipes(0.0_f64) {
            table.add_row(
                Row::new()
                    .with_cell(recipe)
                    .with_cell(kind)
                    .with_cell(format!("{:.4}", runs)),
            );
        }
        writeln!(f, "{}", table)?;

        let mut outputs = Table::new("{:<}  {:>}");
        outputs.add_row(Row::new().with_cell("item").with_cell("net"));
        for (row, net) in self.net_output.iter().enumerate() {
            let name = if row == self.tax_row {
                "tax".to_string()
            } else {
                format!("i{}", row)
            };
            outputs.add_row(Row::new().with_cell(name).with_cell(format!("{:.4}", net)));
        }
        writeln!(f, "{}", outputs)?;
        write!(f, "objective: {:.4}", self.objective)
    }
}
