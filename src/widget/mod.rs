//! Editor window widgets
//!
//! Each builder returns an Element wired to the editor's messages.

pub mod card_canvas;
pub mod style_panel;
pub mod text_box_list;
pub mod toolbar;
