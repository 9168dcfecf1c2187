//! Command implementations

pub mod bootstrap;
pub mod config;
pub mod deploy;
pub mod doctor;
pub mod logs;
pub mod status;
pub mod stop;
pub mod version;
