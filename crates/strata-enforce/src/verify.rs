//! Whole-graph verification.

use rayon::prelude::*;
use strata_model::ModulesGraph;

use crate::cycles::detect_cycles;
use crate::error::VerificationError;
use crate::rules::check_module;
use crate::violations::Violations;

/// Verification entry points on a [`ModulesGraph`].
pub trait VerifyGraph {
    /// Every violation of the graph. Cycles come first, then rule violations
    /// per module in name order. Never fails and never mutates the graph.
    fn detect_violations(&self) -> Violations;

    /// Fail with all violations, if any. Once a pass succeeds, later calls
    /// return immediately.
    fn verify(&self) -> Result<(), VerificationError>;
}

impl VerifyGraph for ModulesGraph {
    fn detect_violations(&self) -> Violations {
        let per_module: Vec<Violations> = self
            .modules()
            .par_iter()
            .map(|module| check_module(self, module))
            .collect();
        detect_cycles(self).and(per_module.into_iter().collect())
    }

    fn verify(&self) -> Result<(), VerificationError> {
        if self.is_verified() {
            return Ok(());
        }
        let violations = self.detect_violations();
        tracing::info!(
            modules = self.len(),
            violations = violations.len(),
            "verified modules graph"
        );
        violations.into_result()?;
        self.mark_verified();
        Ok(())
    }
}
