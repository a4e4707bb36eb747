//! Shared fixtures for the integration tests.

pub mod host_helpers;
