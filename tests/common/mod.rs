//! Common test utilities and helpers.
//!
//! This module provides shared functionality for all tests, including:
//! - Test fixtures and PDF builders
//! - An in-memory PDF backend
//! - Custom assertions

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod memory_backend;

pub use assertions::*;
pub use fixtures::*;
pub use memory_backend::*;
