//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod attend;
pub mod catalog;
pub mod init;
pub mod queue;
pub mod register;
pub mod status;
pub mod validate;
