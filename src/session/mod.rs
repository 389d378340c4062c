//! Card editing session
//!
//! This module contains:
//! - Card state and its transitions
//! - Drag tracking for moving text boxes
//! - The editor session behind the window
//! - Message types for editor interactions
//! - Message handlers

pub mod drag;
pub mod editor;
pub mod handlers;
pub mod messages;
pub mod state;
