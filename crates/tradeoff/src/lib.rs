//! Command-line front end for the tradeoff engine
//!
//! Loads a request file, runs [`tradeoff_core::StrategyEvaluator`] and writes
//! the JSON response.

pub mod io;
pub mod logging;

pub use io::{RequestFormat, atomic_write, load_request, parse_request, render_output};
pub use logging::init_logging;
