//! # recipe-lp
//!
//! Minimal-cost production planning over a recipe graph.
//!
//! A recipe network is a matrix with one row per item and one column per
//! recipe (`+` produces, `-` consumes). Planning a target bundle of items
//! goes through four steps:
//!
//! - [`matrix`] augments the network with raw-material pseudo-recipes and a tax item/recipe
//! - [`constraint`] derives `A_ub x ≤ b_ub` (demand) and `A_eq x = b_eq` (tax balance)
//! - [`objective`] prices raw materials by a priority ordering
//! - [`solver`] hands the resulting [`program::LinearProgram`] to an LP backend
//!
//! ```no_run
//! use ndarray::array;
//! use recipe_lp::{matrix::RecipeMatrix, solver::solve};
//!
//! // 2 ore -> 1 plate, ore can be bought
//! let base = array![[-2.0], [1.0]];
//! let rm = RecipeMatrix::build(&base, &[0]).unwrap();
//! let plan = solve(&rm, &array![0.0, 3.0], &rm.raw_recipes()).unwrap();
//! println!("{}", plan);
//! ```

pub mod config;
pub mod constraint;
pub mod diagnostics;
pub mod error;
pub mod index;
pub mod matrix;
pub mod objective;
pub mod plan;
pub mod program;
pub mod solver;

pub use config::PlannerConfig;
pub use error::PlanError;
pub use index::{ItemIx, RecipeIx};
pub use matrix::{RecipeKind, RecipeMatrix};
pub use plan::ProductionPlan;
pub use program::LinearProgram;
pub use solver::{solve, solve_with, LpBackend, MiniLp};
