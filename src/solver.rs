//! Solver adapter.
//!
//! The LP itself is solved by an external backend behind [`LpBackend`]; this
//! module only hands it the formulated program and turns its status into a
//! [`ProductionPlan`] or a [`PlanError`].

use log::{debug, info, warn};
use minilp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem};
use ndarray::{Array1, ArrayView1};

use crate::config::PlannerConfig;
use crate::constraint::{Comp, ConstraintBlock};
use crate::error::PlanError;
use crate::index::RecipeIx;
use crate::matrix::RecipeMatrix;
use crate::plan::ProductionPlan;
use crate::program::LinearProgram;

/// Something that can minimize a [`LinearProgram`].
///
/// Implementations return the optimal `x` or report
/// [`PlanError::ProblemInfeasible`] / [`PlanError::ProblemUnbounded`].
pub trait LpBackend {
    fn minimize(&self, lp: &LinearProgram) -> Result<Array1<f64>, PlanError>;
}

/// Backend built on the `minilp` simplex solver.
#[derive(Copy, Clone, Debug, Default)]
pub struct MiniLp;

impl MiniLp {
    pub fn new() -> Self {
        Self
    }

    fn add_block(problem: &mut Problem, vars: &[minilp::Variable], block: &ConstraintBlock) {
        let op = match block.comp {
            Comp::Le => ComparisonOp::Le,
            Comp::Ge => ComparisonOp::Ge,
            Comp::Eq => ComparisonOp::Eq,
        };
        for (row, &rhs) in block.lhs.rows().into_iter().zip(block.rhs.iter()) {
            let mut expr = LinearExpr::empty();
            row.iter()
                .enumerate()
                .filter(|(_j, v)| **v != 0.0_f64)
                .for_each(|(j, &v)| expr.add(vars[j], v));
            problem.add_constraint(expr, op, rhs);
        }
    }
}

impl LpBackend for MiniLp {
    fn minimize(&self, lp: &LinearProgram) -> Result<Array1<f64>, PlanError> {
        lp.inequalities.check_shape(lp.n_vars())?;
        lp.equalities.check_shape(lp.n_vars())?;

        let mut problem = Problem::new(OptimizationDirection::Minimize);
        let vars: Vec<_> = lp
            .cost
            .iter()
            .map(|&c| problem.add_var(c, lp.bounds()))
            .collect();

        Self::add_block(&mut problem, &vars, &lp.inequalities);
        Self::add_block(&mut problem, &vars, &lp.equalities);

        match problem.solve() {
            Ok(solution) => {
                debug!("minilp objective {}", solution.objective());
                Ok(vars.iter().map(|&v| *solution.var_value(v)).collect())
            }
            Err(minilp::Error::Infeasible) => Err(PlanError::ProblemInfeasible),
            Err(minilp::Error::Unbounded) => Err(PlanError::ProblemUnbounded),
        }
    }
}

/// Plans production of `target` with the default configuration and backend.
///
/// `target[i]` is the required net output of item `i` (tax row excluded);
/// `priority` lists raw pseudo-recipes of `matrix`, most preferred first.
pub fn solve(
    matrix: &RecipeMatrix,
    target: &Array1<f64>,
    priority: &[RecipeIx],
) -> Result<ProductionPlan, PlanError> {
    solve_with(matrix, target, priority, &PlannerConfig::default(), &MiniLp)
}

pub fn solve_with<B: LpBackend>(
    matrix: &RecipeMatrix,
    target: &Array1<f64>,
    priority: &[RecipeIx],
    config: &PlannerConfig,
    backend: &B,
) -> Result<ProductionPlan, PlanError> {
    let lp = LinearProgram::formulate(matrix, target, priority, config)?;

    let usage = backend.minimize(&lp).map_err(|e| {
        warn!("solver gave up: {}", e);
        e
    })?;
    if usage.len() != lp.n_vars() {
        return Err(PlanError::DimensionMismatch {
            what: "solver result",
            expected: lp.n_vars(),
            found: usage.len(),
        });
    }

    let usage = clamp_negative_zero(usage.view(), config.tolerance());
    let objective = lp.objective_value(usage.view());
    info!(
        "planned {} recipes, objective {:.6}, tax {:.6}",
        usage.len(),
        objective,
        usage[matrix.tax_column_index()]
    );

    Ok(ProductionPlan::new(matrix, usage, objective))
}

//solvers may return -1e-12 for a nonbasic variable
fn clamp_negative_zero(x: ArrayView1<f64>, tol: f64) -> Array1<f64> {
    x.mapv(|v| if v < 0.0_f64 && v > -tol { 0.0_f64 } else { v })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    struct Fixed(Result<Array1<f64>, PlanError>);

    impl LpBackend for Fixed {
        fn minimize(&self, _lp: &LinearProgram) -> Result<Array1<f64>, PlanError> {
            self.0.clone()
        }
    }

    fn chain() -> RecipeMatrix {
        // recipe 0 turns 2 ore into 1 plate; ore is raw
        let base = array![[-2.0], [1.0]];
        RecipeMatrix::build(&base, &[0]).unwrap()
    }

    #[test]
    fn single_chain_is_solved_exactly() {
        init();
        let rm = chain();
        let plan = solve(&rm, &array![0.0, 3.0], &rm.raw_recipes()).unwrap();
        let x = plan.usage();
        assert!((x[0] - 3.0).abs() < 1e-6);
        assert!((x[1] - 6.0).abs() < 1e-6);
        assert!((x[2] - 9.0).abs() < 1e-6);
        assert!((plan.objective() - (6.0 * 10.0 + 9.0)).abs() < 1e-6);
        assert!(plan.satisfies(&array![0.0, 3.0], 1e-6).unwrap());
    }

    #[test]
    fn missing_raw_material_is_infeasible() {
        init();
        // nothing can be bought, so plates cannot be made
        let rm = RecipeMatrix::build(&array![[-2.0], [1.0]], &[]).unwrap();
        let err = solve(&rm, &array![0.0, 3.0], &[]).unwrap_err();
        assert_eq!(err, PlanError::ProblemInfeasible);
    }

    #[test]
    fn zero_target_needs_nothing() {
        init();
        let rm = chain();
        let plan = solve(&rm, &array![0.0, 0.0], &[]).unwrap();
        assert!(plan.usage().iter().all(|&v| v.abs() < 1e-6));
        assert!(plan.objective().abs() < 1e-6);
    }

    #[test]
    fn backend_status_passes_through() {
        let rm = chain();
        let cfg = PlannerConfig::default();
        let err = solve_with(
            &rm,
            &array![0.0, 1.0],
            &[],
            &cfg,
            &Fixed(Err(PlanError::ProblemUnbounded)),
        )
        .unwrap_err();
        assert_eq!(err, PlanError::ProblemUnbounded);
    }

    #[test]
    fn backend_result_of_wrong_length_is_rejected() {
        let rm = chain();
        let cfg = PlannerConfig::default();
        let err = solve_with(&rm, &array![0.0, 1.0], &[], &cfg, &Fixed(Ok(array![1.0])))
            .unwrap_err();
        assert!(matches!(err, PlanError::DimensionMismatch { .. }));
    }

    #[test]
    fn hand_built_program_with_wrong_width_is_rejected() {
        let rm = chain();
        let mut lp = LinearProgram::formulate(
            &rm,
            &array![0.0, 1.0],
            &[],
            &PlannerConfig::default(),
        )
        .unwrap();
        lp.equalities.lhs = ndarray::Array2::zeros((1, 5));
        let err = MiniLp::new().minimize(&lp).unwrap_err();
        assert_eq!(
            err,
            PlanError::DimensionMismatch {
                what: "constraint lhs columns",
                expected: 3,
                found: 5
            }
        );
    }

    #[test]
    fn tiny_negatives_are_clamped() {
        let x = clamp_negative_zero(array![-1e-12, 2.0, -3.0].view(), 1e-6);
        assert_eq!(x, array![0.0, 2.0, -3.0]);
    }

    #[test]
    fn bad_priority_fails_before_solving() {
        let rm = chain();
        let cfg = PlannerConfig::default();
        let prod = rm.recipe(0).unwrap();
        let err = solve_with(
            &rm,
            &array![0.0, 1.0],
            &[prod],
            &cfg,
            &Fixed(Err(PlanError::ProblemUnbounded)),
        )
        .unwrap_err();
        assert_eq!(err, PlanError::NotRawRecipe(0));
    }
}
