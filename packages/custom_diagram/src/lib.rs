//! Plugin shell around the diagram engine.
//!
//! Reads the config file and game catalog, initializes the registered
//! generators, and exposes their groups through NEI-style handlers.

#[macro_use]
extern crate tracing;

pub mod logging;
pub mod config;
pub mod catalog;
pub mod registry;
pub mod nei;
pub mod generators;
