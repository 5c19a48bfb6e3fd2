//! DevOps top posts service.
//!
//! Proxies the top-posts listing of r/devops and reshapes it into a stable
//! JSON schema.

pub mod config;
pub mod constants;
pub mod reddit;
pub mod web;
