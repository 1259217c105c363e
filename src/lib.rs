pub mod data;
pub mod error;
pub mod exec;
pub mod launch;
pub mod sched;
pub mod select;
pub mod sys;
pub mod transfer;

#[cfg(test)]
mod fake;

pub use capctl::{Cap, CapSet, CapState, ParseCapStateError};
pub use data::{LaunchRequest, Target};
pub use error::{LaunchError, Result};
pub use fully_pub::fully_pub as public;
