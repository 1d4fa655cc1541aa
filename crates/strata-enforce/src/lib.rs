//! Verification of strata module graphs.
//!
//! Checks a [`ModulesGraph`](strata_model::ModulesGraph) and accumulates violations:
//! - E101: cycle between modules of one root
//! - E102: dependency on a module the allow-list excludes
//! - E103: reference to a symbol outside the target's named interfaces
//! - W101: field injection outside a configuration context

pub mod cycles;
pub mod error;
pub mod rules;
pub mod types;
pub mod verify;
pub mod violations;

pub use error::VerificationError;
pub use types::{Severity, Violation, ViolationKind};
pub use verify::VerifyGraph;
pub use violations::Violations;
