//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, init, show)
//! - [`estimate`] - Export preview without fetching
//! - [`export`] - Mosaic export of a drawn shape
//! - [`measure`] - Area and distance measurement
//! - [`serve`] - HTTP endpoints for the browser map panel
//! - [`snapshot`] - Single static map image

pub mod common;
pub mod config;
pub mod estimate;
pub mod export;
pub mod measure;
pub mod serve;
pub mod snapshot;
