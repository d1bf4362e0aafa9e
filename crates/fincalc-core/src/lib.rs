pub mod error;
pub mod format;
pub mod types;
pub mod validate;

#[cfg(feature = "emi")]
pub mod emi;

#[cfg(feature = "sip")]
pub mod sip;

#[cfg(any(feature = "emi", feature = "sip"))]
pub mod engine;

pub use error::EngineError;
pub use types::*;

/// Standard result type for all engine operations
pub type EngineResult<T> = Result<T, EngineError>;
