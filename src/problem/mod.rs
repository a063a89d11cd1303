//! Problem instances.
//!
//! [`Problem`] is the immutable input shared by every strategy;
//! [`ProblemLoader`] reads it from the plain-text instance format.

mod loader;
mod types;

pub use loader::ProblemLoader;
pub use types::Problem;
