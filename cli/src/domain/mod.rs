//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod bootstrap;
pub mod config;
pub mod deploy;
pub mod error;
pub mod health;
pub mod version;

pub use bootstrap::BootstrapPlan;
pub use config::{ToolConfig, validate_config};
pub use deploy::{
    BindMount, DeployOutcome, DeploymentTarget, InstanceState, InstanceStatus, LivenessPolicy,
};
pub use error::{BootstrapError, ConfigError, DeployError};
pub use health::{DoctorChecks, collect_issues};
pub use version::InterpreterVersion;
