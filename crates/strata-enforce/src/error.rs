use crate::violations::Violations;

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    /// The graph broke at least one rule. Displays one violation per line.
    #[error("{0}")]
    Violations(Violations),
}

impl VerificationError {
    pub fn violations(&self) -> &Violations {
        match self {
            VerificationError::Violations(v) => v,
        }
    }
}
