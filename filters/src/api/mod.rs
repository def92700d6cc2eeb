//! Wire-level types shared with the query-execution side

pub mod types;

pub use types::{ErrorBody, FilterEnvelope};
