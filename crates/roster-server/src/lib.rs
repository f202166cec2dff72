//! # Roster Server Library
//!
//! Dependency wiring, logging setup and startup utilities for the Roster
//! server binary.

pub mod di;
pub mod logging;
pub mod startup;
