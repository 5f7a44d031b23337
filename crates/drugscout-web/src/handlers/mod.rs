//! HTTP handlers for all routes.

pub mod workflow;
pub mod monitor;
pub mod history;
pub mod engines;
