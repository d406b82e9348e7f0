//! Test support utilities for the rock/paper/scissors backend.
//!
//! Shared by the backend's unit and integration tests: one-time logging
//! initialization, problem-details assertions and unique test data.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
