use strata_core::CoreError;

/// Fatal problems with the module layout or graph configuration.
///
/// These are raised while a [`ModulesGraph`](crate::graph::ModulesGraph) is
/// built and never end up in a violations report.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("No root namespace configured")]
    NoRoots,

    #[error("Root namespace '{0}' does not exist in the symbol universe")]
    UnknownRoot(String),

    #[error("Root namespaces '{outer}' and '{inner}' overlap")]
    OverlappingRoots { outer: String, inner: String },

    #[error("Duplicate module name '{name}' for namespaces '{first}' and '{second}'")]
    DuplicateModule {
        name: String,
        first: String,
        second: String,
    },

    #[error("Module '{inner}' is nested inside module '{outer}'")]
    NestedModules { outer: String, inner: String },

    #[error(
        "Namespace '{namespace}' declares a module but is not a direct sub-namespace of a root; \
         use explicit module detection instead"
    )]
    ConflictingDetection { namespace: String },

    #[error("Module for namespace '{0}' has a blank display name")]
    BlankDisplayName(String),

    #[error("Shared module '{0}' does not exist")]
    UnknownSharedModule(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
