//! Setup-time configuration errors
//!
//! The per-tick update never fails; everything that can go wrong is caught
//! when bodies and hitboxes are built.

/// Invalid body or geometry configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("body mass must be positive, got {0}")]
    NonPositiveMass(f32),
    #[error("rod length must be positive, got {0}")]
    NonPositiveLength(f32),
    #[error("rectangle size must be non-negative, got {w}x{h}")]
    NegativeSize { w: f32, h: f32 },
    #[error("non-finite value for {0}")]
    NonFinite(&'static str),
}
