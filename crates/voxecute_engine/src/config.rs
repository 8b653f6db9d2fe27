//! Configuration for chain evaluation.

use voxecute_foundation::DimensionId;

/// Configuration for an [`Evaluator`](crate::Evaluator).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecConfig {
    /// Seed for the random source used by randomly sorted selectors.
    pub seed: u64,

    /// Prefix of the transient tags used to point rendered commands at a
    /// bound entity.
    pub marker_prefix: String,

    /// Dimension of contexts whose sender has none (the server).
    pub default_dimension: DimensionId,

    /// First word of rendered commands.
    pub command_prefix: String,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            marker_prefix: "voxecute_marker_".to_string(),
            default_dimension: DimensionId::overworld(),
            command_prefix: "execute".to_string(),
        }
    }
}

impl ExecConfig {
    /// Default settings with a fixed seed, for reproducible walks.
    #[must_use]
    pub fn deterministic(seed: u64) -> Self {
        Self::default().with_seed(seed)
    }

    /// Builder method to set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method to set the marker tag prefix.
    #[must_use]
    pub fn with_marker_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.marker_prefix = prefix.into();
        self
    }

    /// Builder method to set the default dimension.
    #[must_use]
    pub fn with_default_dimension(mut self, dimension: DimensionId) -> Self {
        self.default_dimension = dimension;
        self
    }

    /// Builder method to set the command prefix.
    #[must_use]
    pub fn with_command_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.command_prefix = prefix.into();
        self
    }
}
