pub mod assumptions;
pub mod error;
pub mod snapshot;
pub mod time_value;
pub mod types;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "scenarios")]
pub mod scenarios;

#[cfg(feature = "behavioral")]
pub mod behavioral;

#[cfg(feature = "narrative")]
pub mod narrative;

pub use error::AdvisorError;
pub use types::*;

/// Standard result type for all advisor operations
pub type AdvisorResult<T> = Result<T, AdvisorError>;
