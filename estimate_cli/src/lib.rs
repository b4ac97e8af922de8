//! Concrete Estimator CLI
//!
//! Command line front end for `estimate_core`. Collects text inputs the way
//! a form would, prints the breakdown and hands reports to a file sink.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
