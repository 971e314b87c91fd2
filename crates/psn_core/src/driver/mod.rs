//! Windowed verification driver.
//!
//! # Architecture
//!
//! ```text
//! WindowPlanner ──► ModelRenderer ──► CheckerClient ──► ProbabilityParser
//!       ▲                                                     │
//!       └──────────── ConvergenceMonitor ◄── Timeline ◄───────┘
//!                                               │
//!                                          ResultSink
//! ```
//!
//! One run is strictly sequential: the next window is planned only after
//! the previous invocation's output has been consumed.
//!
//! # Example
//!
//! ```ignore
//! use psn_core::checker::ModestClient;
//! use psn_core::driver::WindowedVerificationDriver;
//! use psn_core::models::{PropertyType, RunConfig, RunMode};
//! use psn_core::render::TemplateRenderer;
//! use psn_core::results::ResultSink;
//! use psn_core::trace::ModestTraceParser;
//!
//! let driver = WindowedVerificationDriver::new(
//!     TemplateRenderer::from_file("noc_2x2.template".as_ref())?,
//!     ModestClient::new("modest", ".work"),
//!     ModestTraceParser::new(),
//!     ResultSink::new("results/2x2"),
//! );
//! let config = RunConfig::builder(2, PropertyType::Resistive).build()?;
//! let outcome = driver.run(&config, RunMode::Simulate)?;
//! println!("{}", outcome.stop_reason);
//! ```

mod convergence;
mod errors;
mod planner;
mod runner;
mod types;

pub use convergence::{Convergence, ConvergenceMonitor, SATURATION_TOLERANCE};
pub use errors::{DriverError, DriverResult};
pub use planner::WindowPlanner;
pub use runner::WindowedVerificationDriver;
pub use types::{DriverOptions, RunOutcome, StopReason, DEFAULT_FAILURE_LIMIT};
