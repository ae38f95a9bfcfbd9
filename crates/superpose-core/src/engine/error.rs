use thiserror::Error;

/// Validation failures raised when an engine is constructed or its
/// parameters are replaced.
///
/// Every variant is detected eagerly, before any state is mutated; the
/// evaluation path never produces one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error(
        "Number of reference positions ({actual}) does not equal number of particles in the system ({expected})"
    )]
    ReferenceCountMismatch { expected: usize, actual: usize },

    #[error("Illegal particle index for RMSD: {index} (system has {system_size} particles)")]
    IllegalParticleIndex { index: usize, system_size: usize },

    #[error("Duplicated particle index for RMSD: {index}")]
    DuplicatedParticleIndex { index: usize },

    #[error("The number of reference positions has changed: expected {expected}, got {actual}")]
    ReferenceLengthChanged { expected: usize, actual: usize },

    #[error("Particle selection is empty")]
    EmptySelection,
}
