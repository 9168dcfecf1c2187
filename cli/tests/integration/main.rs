//! Integration tests for tubedeck CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! They never require docker or Python: commands either fail before touching
//! a tool, only read configuration, or run against a scripted stand-in.

mod cli_tests;
