//! Objective function: a cost per column of the recipe matrix.
//!
//! Only acquisition and tax are priced. Production recipes cost nothing,
//! raw pseudo-recipes are weighted by priority (each level `level_ratio`
//! times the next) with a floor for unlisted ones, and the tax recipe gets
//! the smallest cost so it only breaks ties.

use log::debug;
use ndarray::Array1;

use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::index::RecipeIx;
use crate::matrix::RecipeMatrix;

/// Builds the cost vector for `matrix`.
///
/// `priority` lists raw pseudo-recipes, most important first. With `L`
/// entries, `priority[i]` costs `level_ratio^(L - i)`. An entry listed twice
/// keeps the weight of its last position. Every entry is checked before any
/// weight is assigned.
pub fn build_objective(
    matrix: &RecipeMatrix,
    priority: &[RecipeIx],
    config: &PlannerConfig,
) -> Result<Array1<f64>, PlanError> {
    let cols = priority
        .iter()
        .map(|&p| {
            let col = matrix.column_of(p)?;
            if !matrix.is_raw_column(col) {
                return Err(PlanError::NotRawRecipe(col));
            }
            Ok(col)
        })
        .collect::<Result<Vec<usize>, PlanError>>()?;

    let l = cols.len();
    let mut res = Array1::<f64>::zeros(matrix.recipe_count());
    for (i, &col) in cols.iter().enumerate() {
        let level = i32::try_from(l - i).map_err(|_| {
            PlanError::InvalidConfig(format!("{} priority levels is too many", l))
        })?;
        let weight = config.level_ratio().powi(level);
        if !weight.is_finite() {
            return Err(PlanError::InvalidConfig(format!(
                "priority weight {}^{} overflows",
                config.level_ratio(),
                level
            )));
        }
        res[col] = weight;
    }

    //unlisted raw materials are never free
    for &r in matrix.raw_recipe_columns() {
        res[r] = res[r].max(config.raw_floor_cost());
    }

    res[matrix.tax_column_index()] = config.tax_cost();

    debug!("objective weights: {}", res);
    Ok(res)
}
