//! Core application module
//!
//! This module contains the application entry point and the Cosmic
//! Application implementation for the editor window.

pub mod app;
