//! CLI command implementations.

mod ask;
mod doctor;
mod serve;

pub use ask::run_ask;
pub use doctor::run_doctor;
pub use serve::run_serve;
