//! Khoj - a terminal client for the Khoj AI chat backend
//!
//! This library exposes modules for use in integration tests.

pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod progress;
pub mod sse;
