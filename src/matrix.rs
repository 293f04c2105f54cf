//! Recipe matrix construction.
//!
//! Rows are items, columns are recipes. A positive entry means the recipe
//! produces the item per unit run, a negative entry means it consumes it.
//! [`RecipeMatrix::build`] augments a base matrix with one raw pseudo-recipe
//! per requested raw item and then with the tax row and tax pseudo-recipe.

use log::debug;
use ndarray::{s, Array2, ArrayView2};
use rustc_hash::FxHashSet;
use uuid::Uuid; //used for unique matrix ID

use std::fmt;

use crate::diagnostics;
use crate::error::PlanError;
use crate::index::{ItemIx, RecipeIx};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RecipeKind {
    Production,
    Raw,
    Tax,
}

impl fmt::Display for RecipeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecipeKind::Production => write!(f, "recipe"),
            RecipeKind::Raw => write!(f, "raw"),
            RecipeKind::Tax => write!(f, "tax"),
        }
    }
}

/// Appends a raw pseudo-recipe producing one unit of `item`.
///
/// The new column is zero everywhere except `+1` at row `item`; all existing
/// entries are left untouched.
pub fn append_raw_recipe(matrix: &Array2<f64>, item: usize) -> Result<Array2<f64>, PlanError> {
    if item >= matrix.nrows() {
        return Err(PlanError::InvalidIndex {
            kind: "item",
            index: item,
            len: matrix.nrows(),
        });
    }
    Ok(push_unit_column(matrix, item))
}

/// Appends the tax item (a row of `-1` across every existing column) and then
/// the tax pseudo-recipe (`+1` on the tax row only).
///
/// The tax row is the last row and the tax recipe the last column of the result.
pub fn append_tax(matrix: &Array2<f64>) -> Array2<f64> {
    let (rows, cols) = matrix.dim();

    let mut taxed = Array2::<f64>::zeros((rows + 1, cols));
    taxed.slice_mut(s![..rows, ..]).assign(matrix);
    taxed.row_mut(rows).fill(-1.0_f64);

    push_unit_column(&taxed, rows)
}

fn push_unit_column(matrix: &Array2<f64>, row: usize) -> Array2<f64> {
    let (rows, cols) = matrix.dim();
    let mut out = Array2::<f64>::zeros((rows, cols + 1));
    out.slice_mut(s![.., ..cols]).assign(matrix);
    out[[row, cols]] = 1.0_f64;
    out
}

/// Augmented recipe matrix: production recipes, then raw pseudo-recipes, then
/// the tax pseudo-recipe. Read-only once built.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeMatrix {
    id: Uuid,
    matrix: Array2<f64>,
    production_recipes: usize,
    raw_items: Vec<usize>,
    raw_recipes: Vec<usize>,
    tax_row: usize,
    tax_col: usize,
}

impl RecipeMatrix {
    /// Builds the augmented matrix from `base` (items x recipes).
    ///
    /// Each entry of `raw_items` is a row of `base` that may be bought from
    /// outside the network. Order is kept and duplicates yield duplicate
    /// pseudo-recipes. Raw columns are added before the tax so that raw
    /// acquisition is taxed like any other recipe.
    pub fn build(base: &Array2<f64>, raw_items: &[usize]) -> Result<Self, PlanError> {
        let (items, production_recipes) = base.dim();

        let mut matrix = base.to_owned();
        let mut raw_recipes = Vec::with_capacity(raw_items.len());
        for &item in raw_items {
            raw_recipes.push(matrix.ncols());
            matrix = append_raw_recipe(&matrix, item)?;
        }

        let matrix = append_tax(&matrix);
        let (tax_row, tax_col) = (items, matrix.ncols() - 1);

        debug!(
            "built recipe matrix {:?}: {} production recipes, {} raw, tax at ({}, {})",
            matrix.dim(),
            production_recipes,
            raw_recipes.len(),
            tax_row,
            tax_col
        );

        Ok(Self {
            id: Uuid::new_v4(),
            matrix,
            production_recipes,
            raw_items: raw_items.to_vec(),
            raw_recipes,
            tax_row,
            tax_col,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// (rows, cols) of the augmented matrix, tax row and column included.
    pub fn shape(&self) -> (usize, usize) {
        self.matrix.dim()
    }

    /// Number of real items, i.e. rows excluding the tax row.
    pub fn item_count(&self) -> usize {
        self.tax_row
    }

    /// Number of columns, pseudo-recipes included.
    pub fn recipe_count(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn production_recipe_count(&self) -> usize {
        self.production_recipes
    }

    /// Every row except the tax row.
    pub fn item_rows(&self) -> ArrayView2<f64> {
        self.matrix.slice(s![..self.tax_row, ..])
    }

    pub fn tax_item(&self) -> ItemIx {
        ItemIx::new(self.id, self.tax_row)
    }

    pub fn tax_recipe(&self) -> RecipeIx {
        RecipeIx::new(self.id, self.tax_col)
    }

    pub fn tax_row_index(&self) -> usize {
        self.tax_row
    }

    pub fn tax_column_index(&self) -> usize {
        self.tax_col
    }

    /// Raw pseudo-recipes in the order their items were requested.
    pub fn raw_recipes(&self) -> Vec<RecipeIx> {
        self.raw_recipes
            .iter()
            .map(|&col| RecipeIx::new(self.id, col))
            .collect()
    }

    pub fn raw_recipe_columns(&self) -> &[usize] {
        &self.raw_recipes
    }

    /// First raw pseudo-recipe supplying `item` (a row of the base matrix).
    pub fn raw_recipe_for(&self, item: usize) -> Option<RecipeIx> {
        self.raw_items
            .iter()
            .position(|&i| i == item)
            .map(|pos| RecipeIx::new(self.id, self.raw_recipes[pos]))
    }

    /// Item supplied by a raw pseudo-recipe, `None` for other columns.
    pub fn raw_item_of(&self, recipe: RecipeIx) -> Option<ItemIx> {
        if recipe.matrix_id() != self.id {
            return None;
        }
        self.raw_recipes
            .iter()
            .position(|&col| col == recipe.col())
            .map(|pos| ItemIx::new(self.id, self.raw_items[pos]))
    }

    pub fn item(&self, row: usize) -> Result<ItemIx, PlanError> {
        if row >= self.matrix.nrows() {
            return Err(PlanError::InvalidIndex {
                kind: "item",
                index: row,
                len: self.matrix.nrows(),
            });
        }
        Ok(ItemIx::new(self.id, row))
    }

    pub fn recipe(&self, col: usize) -> Result<RecipeIx, PlanError> {
        if col >= self.matrix.ncols() {
            return Err(PlanError::InvalidIndex {
                kind: "recipe",
                index: col,
                len: self.matrix.ncols(),
            });
        }
        Ok(RecipeIx::new(self.id, col))
    }

    /// Resolves a typed index to its column, rejecting indices of other matrices.
    pub fn column_of(&self, recipe: RecipeIx) -> Result<usize, PlanError> {
        if recipe.matrix_id() != self.id {
            return Err(PlanError::ForeignIndex {
                kind: "recipe",
                index: recipe.col(),
            });
        }
        Ok(recipe.col())
    }

    pub fn row_of(&self, item: ItemIx) -> Result<usize, PlanError> {
        if item.matrix_id() != self.id {
            return Err(PlanError::ForeignIndex {
                kind: "item",
                index: item.row(),
            });
        }
        Ok(item.row())
    }

    pub fn is_raw_column(&self, col: usize) -> bool {
        self.raw_recipes.contains(&col)
    }

    /// `None` past the last column.
    pub fn kind_of_column(&self, col: usize) -> Option<RecipeKind> {
        if col == self.tax_col {
            Some(RecipeKind::Tax)
        } else if col > self.tax_col {
            None
        } else if col >= self.production_recipes {
            Some(RecipeKind::Raw)
        } else {
            Some(RecipeKind::Production)
        }
    }

    /// Items produced by two or more production recipes.
    pub fn alternate_items(&self) -> FxHashSet<usize> {
        diagnostics::find_multi_producer_items(&self.production_view())
    }

    /// Items co-produced by some multi-output production recipe.
    pub fn byproduct_items(&self) -> FxHashSet<usize> {
        diagnostics::find_byproduct_items(&self.production_view())
    }

    fn production_view(&self) -> ArrayView2<f64> {
        self.matrix
            .slice(s![..self.tax_row, ..self.production_recipes])
    }
}
