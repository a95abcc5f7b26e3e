//! Error types for crossbar instantiation generation.

/// Errors that abort instantiation generation before any text is produced.
#[derive(Debug, thiserror::Error)]
pub enum NetgenError {
    /// The request list was empty.
    #[error("no blocks specified")]
    NoBlocks,

    /// More blocks were requested than the crossbar has slots.
    #[error("trying to connect {requested} blocks, max is {capacity}")]
    CapacityExceeded {
        /// Number of blocks requested.
        requested: usize,
        /// Crossbar slot capacity.
        capacity: usize,
    },

    /// One or more requested blocks require special treatment and cannot be
    /// instantiated by this tool.
    #[error("reserved blocks cannot be instantiated here: {}", .0.join(", "))]
    ReservedBlocks(Vec<String>),
}
