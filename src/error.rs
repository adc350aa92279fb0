//! Error types for the frame engine

use thiserror::Error;

/// Main error type for frame engine operations
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Invalid section: {0}")]
    InvalidSection(String),

    #[error("Invalid material: {0}")]
    InvalidMaterial(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Node '{0}' not found in model")]
    NodeNotFound(String),

    #[error("Member '{0}' not found in model")]
    MemberNotFound(String),

    #[error("Material '{0}' not found in model")]
    MaterialNotFound(String),

    #[error("Section '{0}' not found in model")]
    SectionNotFound(String),

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error(
        "Singular stiffness system - structure is unsupported, disconnected, or ill-conditioned"
    )]
    SingularSystem,

    #[error("Model not analyzed - run analyze() first")]
    NotAnalyzed,

    #[error("Static equilibrium check failed: {0}")]
    EquilibriumCheckFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for frame engine operations
pub type FrameResult<T> = Result<T, FrameError>;
