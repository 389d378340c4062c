//! Message types for the card editor
//!
//! This module contains the Msg enum with nested sub-enums so each area of
//! the window (toolbar, style panel, text-box list, canvas) has its own
//! handler.

use std::path::PathBuf;

use cosmic::iced_widget::text_editor;

use crate::config::ExportLocation;
use crate::domain::{Point, TextBoxId};

// ============================================================================
// Canvas Pointer Types
// ============================================================================

/// Pointer events reported by the card canvas, in card coordinates
#[derive(Debug, Clone)]
pub enum PointerMsg {
    Moved(Point),
    Pressed,
    Released,
    Left,
}

// ============================================================================
// Text Box Types
// ============================================================================

/// Messages addressed to the text-box collection
#[derive(Debug, Clone)]
pub enum TextBoxMsg {
    Add,
    Remove(TextBoxId),
    Select(TextBoxId),
    /// Caption edited; sent on every input event
    Edit(TextBoxId, String),
}

// ============================================================================
// Style Types
// ============================================================================

/// Style input changes, applied to the active text box
#[derive(Debug, Clone)]
pub enum StyleMsg {
    /// Raw font-size field contents
    FontSize(String),
    /// Raw color field contents
    Color(String),
}

// ============================================================================
// Settings Types
// ============================================================================

#[derive(Debug, Clone)]
pub enum SettingsMsg {
    ExportLocation(ExportLocation),
    ExportScale(f32),
}

// ============================================================================
// Main Message Type
// ============================================================================

#[derive(Debug, Clone)]
pub enum Msg {
    /// Index into the background dropdown; 0 is "no background"
    Background(usize),
    TextBox(TextBoxMsg),
    Style(StyleMsg),
    Pointer(PointerMsg),
    /// Cursor or edit action from a caption editor in the text-box list
    CaptionEditor(TextBoxId, text_editor::Action),
    Settings(SettingsMsg),
    /// Start exporting the current card
    Export,
    /// Export finished with the written path or an error description
    ExportFinished(Result<PathBuf, String>),
}

impl From<TextBoxMsg> for Msg {
    fn from(msg: TextBoxMsg) -> Self {
        Msg::TextBox(msg)
    }
}

impl From<StyleMsg> for Msg {
    fn from(msg: StyleMsg) -> Self {
        Msg::Style(msg)
    }
}

impl From<PointerMsg> for Msg {
    fn from(msg: PointerMsg) -> Self {
        Msg::Pointer(msg)
    }
}

impl From<SettingsMsg> for Msg {
    fn from(msg: SettingsMsg) -> Self {
        Msg::Settings(msg)
    }
}
