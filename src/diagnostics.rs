//! Structural checks on a recipe matrix.
//!
//! None of these are needed to solve a plan; they point at the rows where the
//! objective has to choose between alternatives or absorb excess output.

use ndarray::{ArrayBase, Data, Ix2};
use rustc_hash::FxHashSet;

/// Items (rows) with a positive entry in two or more recipes.
pub fn find_multi_producer_items<S>(matrix: &ArrayBase<S, Ix2>) -> FxHashSet<usize>
where
    S: Data<Elem = f64>,
{
    matrix
        .rows()
        .into_iter()
        .enumerate()
        .filter(|(_i, row)| row.iter().filter(|&&v| v > 0.0_f64).count() >= 2)
        .map(|(i, _row)| i)
        .collect()
}

/// Items co-produced by a multi-output recipe.
///
/// Every column with positive entries in two or more rows contributes all of
/// those rows; the union over all columns is returned.
pub fn find_byproduct_items<S>(matrix: &ArrayBase<S, Ix2>) -> FxHashSet<usize>
where
    S: Data<Elem = f64>,
{
    let mut res = FxHashSet::default();
    for col in matrix.columns() {
        let outputs: Vec<usize> = col
            .iter()
            .enumerate()
            .filter(|(_i, v)| **v > 0.0_f64)
            .map(|(i, _v)| i)
            .collect();
        if outputs.len() >= 2 {
            res.extend(outputs);
        }
    }
    res
}
