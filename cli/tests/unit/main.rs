//! Unit tests for tubedeck CLI
//!
//! These tests use mocked dependencies and run fast without external I/O
//! beyond temporary directories.

mod architecture;
mod bootstrap_service;
mod mocks;
mod property_tests;
