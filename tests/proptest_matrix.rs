//! Property-based tests for recipe matrix augmentation.
//!
//! Uses proptest to generate random recipe networks and raw requests, then
//! verify the structural invariants of the augmented matrix.

use ndarray::{s, Array2};
use proptest::prelude::*;
use recipe_lp::constraint::build_equalities;
use recipe_lp::matrix::{append_raw_recipe, append_tax};
use recipe_lp::objective::build_objective;
use recipe_lp::{PlanError, PlannerConfig, RecipeMatrix};

// ===========================================================================
// Generators
// ===========================================================================

/// Random items x recipes matrix with small integer rates.
fn arb_matrix(max_items: usize, max_recipes: usize) -> impl Strategy<Value = Array2<f64>> {
    (1..=max_items, 1..=max_recipes).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(-50i32..=50, rows * cols).prop_map(move |vals| {
            Array2::from_shape_vec((rows, cols), vals.into_iter().map(f64::from).collect())
                .unwrap()
        })
    })
}

/// A matrix together with a list of raw item rows (duplicates allowed).
fn arb_network() -> impl Strategy<Value = (Array2<f64>, Vec<usize>)> {
    arb_matrix(6, 6).prop_flat_map(|m| {
        let rows = m.nrows();
        (Just(m), proptest::collection::vec(0..rows, 0..5))
    })
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Appending a raw recipe adds one unit column and leaves the rest alone.
    #[test]
    fn raw_append_adds_unit_column((m, item) in arb_matrix(6, 6).prop_flat_map(|m| {
        let rows = m.nrows();
        (Just(m), 0..rows)
    })) {
        let out = append_raw_recipe(&m, item).unwrap();
        let (rows, cols) = m.dim();
        prop_assert_eq!(out.dim(), (rows, cols + 1));
        prop_assert_eq!(out.slice(s![.., ..cols]), m.view());
        for r in 0..rows {
            let want = if r == item { 1.0 } else { 0.0 };
            prop_assert_eq!(out[[r, cols]], want);
        }
    }

    /// Rows past the end are rejected.
    #[test]
    fn raw_append_rejects_missing_rows(m in arb_matrix(6, 6), extra in 0usize..10) {
        let item = m.nrows() + extra;
        let err = append_raw_recipe(&m, item).unwrap_err();
        prop_assert!(matches!(err, PlanError::InvalidIndex { .. }), "unexpected error");
    }

    /// The tax row is -1 everywhere except +1 on the tax recipe.
    #[test]
    fn tax_row_covers_every_recipe((m, raw) in arb_network()) {
        let rm = RecipeMatrix::build(&m, &raw).unwrap();
        let eq = build_equalities(&rm);
        let (_rows, cols) = rm.shape();
        prop_assert_eq!(cols, m.ncols() + raw.len() + 1);
        prop_assert_eq!(rm.tax_column_index(), cols - 1);
        for j in 0..cols {
            let want = if j == rm.tax_column_index() { 1.0 } else { -1.0 };
            prop_assert_eq!(eq.lhs[[0, j]], want);
        }
        prop_assert_eq!(eq.rhs[0], 0.0);
    }

    /// Any x with x[tax] = sum of the other entries meets the tax equality.
    #[test]
    fn balanced_tax_satisfies_equality(
        (m, raw) in arb_network(),
        seed in proptest::collection::vec(0.0f64..100.0, 13),
    ) {
        let rm = RecipeMatrix::build(&m, &raw).unwrap();
        let cols = rm.recipe_count();
        let mut x = ndarray::Array1::<f64>::zeros(cols);
        for j in 0..cols - 1 {
            x[j] = seed[j % seed.len()];
        }
        x[cols - 1] = x.slice(s![..cols - 1]).sum();
        prop_assert!(build_equalities(&rm).is_satisfied_by(x.view(), 1e-6));
    }

    /// Tax is a fixed point of the manual pipeline too.
    #[test]
    fn append_tax_matches_build((m, raw) in arb_network()) {
        let mut manual = m.clone();
        for &item in &raw {
            manual = append_raw_recipe(&manual, item).unwrap();
        }
        let manual = append_tax(&manual);
        let rm = RecipeMatrix::build(&m, &raw).unwrap();
        prop_assert_eq!(rm.matrix(), &manual);
    }

    /// A higher priority always weighs more than a lower one.
    #[test]
    fn priority_is_strictly_decreasing((m, raw) in arb_network()) {
        prop_assume!(raw.len() >= 2);
        let rm = RecipeMatrix::build(&m, &raw).unwrap();
        let priority = rm.raw_recipes();
        let cost = build_objective(&rm, &priority, &PlannerConfig::default()).unwrap();
        for pair in priority.windows(2) {
            prop_assert!(cost[pair[0].col()] > cost[pair[1].col()]);
        }
        prop_assert_eq!(cost[rm.tax_column_index()], 1.0);
        for j in 0..rm.production_recipe_count() {
            prop_assert_eq!(cost[j], 0.0);
        }
    }
}
