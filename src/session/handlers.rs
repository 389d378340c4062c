//! Message handlers for the card editor
//!
//! Handlers mutate the [`Editor`] synchronously and return an [`Effect`]
//! describing any background work the application should start.

use crate::config::EXPORT_SCALE_RANGE;
use crate::domain::{BACKGROUNDS, Point};
use crate::export::ExportJob;
use crate::fl;
use crate::render::geometry::{Hit, hit_test};

use super::editor::Editor;
use super::messages::{Msg, PointerMsg, SettingsMsg, StyleMsg, TextBoxMsg};

/// Work requested by a handler that outlives the update call
#[derive(Debug)]
pub enum Effect {
    None,
    Export(ExportJob),
}

/// Handle a Msg, modifying the editor
pub fn update(editor: &mut Editor, msg: Msg) -> Effect {
    // Pointer motion only changes the picture while something is dragged
    let idle_motion = matches!(msg, Msg::Pointer(PointerMsg::Moved(_))) && !editor.drag.is_dragging();

    let effect = match msg {
        Msg::Background(index) => {
            handle_background(editor, index);
            Effect::None
        }
        Msg::TextBox(msg) => {
            handle_text_box(editor, msg);
            Effect::None
        }
        Msg::Style(msg) => {
            handle_style(editor, msg);
            Effect::None
        }
        Msg::Pointer(msg) => {
            handle_pointer(editor, msg);
            Effect::None
        }
        // Editor widget state lives in the window, which sends edits back as TextBoxMsg::Edit
        Msg::CaptionEditor(..) => Effect::None,
        Msg::Settings(msg) => {
            handle_settings(editor, msg);
            Effect::None
        }
        Msg::Export => handle_export(editor),
        Msg::ExportFinished(result) => {
            handle_export_finished(editor, result);
            Effect::None
        }
    };

    if !idle_motion {
        editor.refresh_preview();
    }
    effect
}

// ============================================================================
// Background handler
// ============================================================================

fn handle_background(editor: &mut Editor, index: usize) {
    // Entry 0 of the dropdown is "no background"
    let id = index
        .checked_sub(1)
        .and_then(|i| BACKGROUNDS.get(i))
        .map(|choice| choice.id);
    editor.card.select_background(id);
}

// ============================================================================
// Text box handlers
// ============================================================================

fn handle_text_box(editor: &mut Editor, msg: TextBoxMsg) {
    match msg {
        TextBoxMsg::Add => {
            editor.card.add();
        }
        TextBoxMsg::Remove(id) => {
            editor.card.remove(id);
            editor.sync_style_inputs();
        }
        TextBoxMsg::Select(id) => {
            editor.card.set_selection(id);
            editor.sync_style_inputs();
        }
        TextBoxMsg::Edit(id, text) => editor.card.update_text(id, text),
    }
}

// ============================================================================
// Style handlers
// ============================================================================

fn handle_style(editor: &mut Editor, msg: StyleMsg) {
    match msg {
        StyleMsg::FontSize(input) => {
            if let Ok(size) = input.trim().parse::<f32>() {
                editor.card.update_selected_font_size(size);
            }
            editor.font_size_input = input;
        }
        StyleMsg::Color(input) => {
            if let Ok(color) = input.parse() {
                editor.card.update_selected_color(color);
            }
            editor.color_input = input;
        }
    }
}

// ============================================================================
// Canvas pointer handlers
// ============================================================================

fn handle_pointer(editor: &mut Editor, msg: PointerMsg) {
    match msg {
        PointerMsg::Moved(point) => editor.drag.pointer_moved(point),
        PointerMsg::Pressed => handle_press(editor),
        PointerMsg::Released => finish_drag(editor),
        PointerMsg::Left => {
            finish_drag(editor);
            editor.drag.cancel();
        }
    }
}

fn handle_press(editor: &mut Editor) {
    let Some(point) = editor.drag.pointer() else {
        return;
    };

    let text_boxes = editor.card.text_boxes();
    match hit_test(text_boxes, point, editor.renderer.fonts()) {
        Some(Hit::RemoveHandle(index)) => {
            let id = text_boxes[index].id;
            handle_text_box(editor, TextBoxMsg::Remove(id));
        }
        Some(Hit::Caption(index)) => {
            let tb = &text_boxes[index];
            let (id, origin) = (tb.id, Point::new(tb.x, tb.y));
            handle_text_box(editor, TextBoxMsg::Select(id));
            editor.drag.press(id, origin);
        }
        None => {}
    }
}

fn finish_drag(editor: &mut Editor) {
    if let Some(end) = editor.drag.release() {
        editor.card.update_position(end.id, end.x, end.y);
    }
}

// ============================================================================
// Settings handlers
// ============================================================================

fn handle_settings(editor: &mut Editor, msg: SettingsMsg) {
    match msg {
        SettingsMsg::ExportLocation(location) => editor.config.export_location = location,
        SettingsMsg::ExportScale(scale) => {
            editor.config.export_scale = scale.clamp(EXPORT_SCALE_RANGE.0, EXPORT_SCALE_RANGE.1);
        }
    }
    editor.config.save();
}

// ============================================================================
// Export handlers
// ============================================================================

fn handle_export(editor: &mut Editor) -> Effect {
    let Some(dir) = editor.config.export_location.dir() else {
        log::warn!("No directory for {:?}, not exporting", editor.config.export_location);
        editor.status = Some(fl!("export-no-location"));
        return Effect::None;
    };

    editor.exports_in_flight += 1;
    editor.status = Some(fl!("export-running"));
    Effect::Export(ExportJob {
        card: editor.card.snapshot(),
        renderer: editor.renderer.clone(),
        dir,
        scale: editor.config.clamped_export_scale(),
    })
}

fn handle_export_finished(editor: &mut Editor, result: Result<std::path::PathBuf, String>) {
    editor.exports_in_flight = editor.exports_in_flight.saturating_sub(1);
    editor.status = Some(match result {
        Ok(path) => {
            log::info!("Saved card to {}", path.display());
            fl!("export-done", path = path.display().to_string())
        }
        Err(error) => {
            log::error!("Failed to export card: {error}");
            fl!("export-failed", error = error)
        }
    });
}
