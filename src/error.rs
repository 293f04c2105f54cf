use thiserror::Error;

/// Errors raised while building or solving a production planning problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("{kind} index {index} is out of range (valid range is 0..{len})")]
    InvalidIndex {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("{kind} index {index} belongs to a different recipe matrix")]
    ForeignIndex { kind: &'static str, index: usize },

    #[error("recipe {0} is not a raw pseudo-recipe and cannot be prioritized")]
    NotRawRecipe(usize),

    #[error("{what} has length {found}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("no production plan satisfies the target with the given raw materials")]
    ProblemInfeasible,

    #[error("the objective is unbounded; check the recipe matrix for free loops")]
    ProblemUnbounded,

    #[error("invalid planner configuration: {0}")]
    InvalidConfig(String),
}

impl PlanError {
    /// True for every flavour of bad index, including priority entries outside the raw set.
    pub fn is_invalid_index(&self) -> bool {
        matches!(
            self,
            PlanError::InvalidIndex { .. } | PlanError::ForeignIndex { .. } | PlanError::NotRawRecipe(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_errors_are_grouped() {
        assert!(PlanError::NotRawRecipe(3).is_invalid_index());
        assert!(PlanError::ForeignIndex { kind: "recipe", index: 0 }.is_invalid_index());
        assert!(!PlanError::ProblemInfeasible.is_invalid_index());
    }

    #[test]
    fn messages_name_the_offender() {
        let err = PlanError::InvalidIndex {
            kind: "item",
            index: 7,
            len: 5,
        };
        assert_eq!(err.to_string(), "item index 7 is out of range (valid range is 0..5)");

        let err = PlanError::DimensionMismatch {
            what: "target",
            expected: 5,
            found: 4,
        };
        assert_eq!(err.to_string(), "target has length 4, expected 5");
    }
}
