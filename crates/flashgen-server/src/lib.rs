//! Flashgen HTTP Server Library
//!
//! Provides the REST API components, configuration and generation pipeline
//! for testing and reuse.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod service;
