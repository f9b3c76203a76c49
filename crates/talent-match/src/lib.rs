//! Candidate to job compatibility matching.
//!
//! The [`matching`] module holds the engine: six independent factor scorers, a weighting policy,
//! the orchestrator that ranks an active candidate pool for one job, and the statistics
//! aggregator built on top of it. Configuration, telemetry, and the error umbrella mirror what
//! the service binary needs to expose the engine over HTTP and the command line.

pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
