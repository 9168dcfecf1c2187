//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, the
//! docker CLI, the Python toolchain, apt, filesystem access and config files.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod apt;
pub mod clock;
pub mod command_runner;
pub mod config;
pub mod docker;
pub mod fs;
pub mod python;
