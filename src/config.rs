use num::ToPrimitive;

use crate::error::PlanError;

/// Weights and tolerances used when turning a recipe matrix into a linear program.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannerConfig {
    level_ratio: f64,
    raw_floor_cost: f64,
    tax_cost: f64,
    tolerance: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            level_ratio: 10.0,
            raw_floor_cost: 5.0,
            tax_cost: 1.0,
            tolerance: 1.0e-6,
        }
    }
}

impl PlannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ratio between the weights of two consecutive priority levels.
    pub fn with_level_ratio<T: ToPrimitive>(mut self, level_ratio: T) -> Self {
        self.level_ratio = level_ratio.to_f64().unwrap_or(f64::NAN);
        self
    }

    /// Minimum cost of any raw pseudo-recipe, prioritized or not.
    pub fn with_raw_floor_cost<T: ToPrimitive>(mut self, cost: T) -> Self {
        self.raw_floor_cost = cost.to_f64().unwrap_or(f64::NAN);
        self
    }

    pub fn with_tax_cost<T: ToPrimitive>(mut self, cost: T) -> Self {
        self.tax_cost = cost.to_f64().unwrap_or(f64::NAN);
        self
    }

    /// Slack allowed when checking a plan against its target.
    pub fn with_tolerance<T: ToPrimitive>(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance.to_f64().unwrap_or(f64::NAN);
        self
    }

    pub fn level_ratio(&self) -> f64 {
        self.level_ratio
    }

    pub fn raw_floor_cost(&self) -> f64 {
        self.raw_floor_cost
    }

    pub fn tax_cost(&self) -> f64 {
        self.tax_cost
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// All values must be finite and positive, the level ratio above one, and tax
    /// cheaper than any raw material.
    pub fn validate(&self) -> Result<(), PlanError> {
        let fields = [
            ("level_ratio", self.level_ratio),
            ("raw_floor_cost", self.raw_floor_cost),
            ("tax_cost", self.tax_cost),
            ("tolerance", self.tolerance),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0_f64 {
                return Err(PlanError::InvalidConfig(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )));
            }
        }
        //a ratio of one or less stops earlier priorities from weighing more
        if self.level_ratio <= 1.0_f64 {
            return Err(PlanError::InvalidConfig(format!(
                "level_ratio must be greater than 1, got {}",
                self.level_ratio
            )));
        }
        if self.tax_cost >= self.raw_floor_cost {
            return Err(PlanError::InvalidConfig(format!(
                "tax_cost ({}) must be below raw_floor_cost ({})",
                self.tax_cost, self.raw_floor_cost
            )));
        }
        Ok(())
    }
}
