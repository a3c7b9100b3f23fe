//! Investment projection, allocation and financial health calculations.
//!
//! [`core`] holds the pure calculators; [`api`] exposes them on the command line
//! and over HTTP.

pub mod api;
pub mod core;
