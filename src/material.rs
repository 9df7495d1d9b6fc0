use crate::error::{CutPlanError, Result};
use serde::{Deserialize, Serialize};

/// One required cut: a length and how many pieces of it are needed.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CutRequirement {
    pub length: f64,
    pub quantity: u32,
}

/// One raw material to plan: fixed stock length, per-piece cost, saw kerf
/// and the cuts that have to come out of it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Material {
    pub name: String,
    pub stock_length: f64,
    pub stock_cost: f64,
    #[serde(default)]
    pub saw_kerf: f64,
    pub required_cuts: Vec<CutRequirement>,
}

impl Material {
    /// Structural validation, performed before any search starts.
    ///
    /// # Errors
    /// Returns `InvalidInput` for a non-positive stock length, a negative
    /// cost or kerf, a non-positive cut length or a zero quantity. An empty
    /// cut list is allowed (it has a trivial zero-piece plan).
    pub fn validate(&self) -> Result<()> {
        if !self.stock_length.is_finite() || self.stock_length <= 0.0 {
            return Err(self.invalid(format!(
                "stock_length must be positive, got {}",
                self.stock_length
            )));
        }
        if !self.stock_cost.is_finite() || self.stock_cost < 0.0 {
            return Err(self.invalid(format!(
                "stock_cost must be non-negative, got {}",
                self.stock_cost
            )));
        }
        if !self.saw_kerf.is_finite() || self.saw_kerf < 0.0 {
            return Err(self.invalid(format!(
                "saw_kerf must be non-negative, got {}",
                self.saw_kerf
            )));
        }
        for req in &self.required_cuts {
            if !req.length.is_finite() || req.length <= 0.0 {
                return Err(self.invalid(format!(
                    "cut length must be positive, got {}",
                    req.length
                )));
            }
            if req.quantity == 0 {
                return Err(self.invalid(format!(
                    "quantity for cut length {} must be at least 1",
                    req.length
                )));
            }
        }
        Ok(())
    }

    /// Total number of individual cut instances after quantity expansion.
    pub fn total_cut_count(&self) -> usize {
        self.required_cuts
            .iter()
            .map(|req| req.quantity as usize)
            .sum()
    }

    fn invalid(&self, reason: String) -> CutPlanError {
        CutPlanError::InvalidInput {
            material: self.name.clone(),
            reason,
        }
    }
}
