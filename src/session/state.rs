//! Card editing state and its transitions
//!
//! `CardState` is the single writer of the three state slots (background,
//! text boxes, selection). Every mutation goes through [`CardState::apply`].

use crate::domain::{
    DEFAULT_COLOR, DEFAULT_FONT_SIZE, MAX_FONT_SIZE, TextBox, TextBoxId, TextColor, find_background,
};

/// What gets rasterized on export: the background plus all text boxes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardComposition {
    /// Image reference of the chosen background, relative to the asset directory
    pub background: Option<String>,
    /// Text boxes in insertion order (later boxes draw on top)
    pub text_boxes: Vec<TextBox>,
}

impl CardComposition {
    pub fn get(&self, id: TextBoxId) -> Option<&TextBox> {
        self.text_boxes.iter().find(|tb| tb.id == id)
    }

    fn get_mut(&mut self, id: TextBoxId) -> Option<&mut TextBox> {
        self.text_boxes.iter_mut().find(|tb| tb.id == id)
    }
}

/// A single state transition
#[derive(Clone, Debug, PartialEq)]
pub enum CardEvent {
    /// Choose a background by catalog id; `None` is the "no background" option
    SelectBackground(Option<String>),
    /// Append a text box with the given fresh id
    Add(TextBoxId),
    Remove(TextBoxId),
    /// Persist the rest position reported when a drag completes
    UpdatePosition(TextBoxId, f32, f32),
    UpdateText(TextBoxId, String),
    Select(TextBoxId),
    SetSelectedFontSize(f32),
    SetSelectedColor(TextColor),
}

#[derive(Clone, Debug, Default)]
pub struct CardState {
    pub composition: CardComposition,
    /// Lookup key of the active text box; not ownership
    pub selection: Option<TextBoxId>,
}

impl CardState {
    /// Apply one transition. Transitions never fail: missing ids are no-ops.
    pub fn apply(&mut self, event: CardEvent) {
        log::debug!("card event: {:?}", event);
        match event {
            CardEvent::SelectBackground(id) => {
                self.composition.background = id.as_deref().and_then(|id| {
                    let choice = find_background(id);
                    if choice.is_none() {
                        log::debug!("unknown background id {id:?}, clearing background");
                    }
                    choice.map(|c| c.image.to_string())
                });
            }
            CardEvent::Add(id) => {
                if self.composition.get(id).is_some() {
                    log::warn!("text box {id} already exists, not adding");
                    return;
                }
                self.composition.text_boxes.push(TextBox::new(id));
            }
            CardEvent::Remove(id) => {
                self.composition.text_boxes.retain(|tb| tb.id != id);
                if self.selection == Some(id) {
                    self.selection = None;
                }
            }
            CardEvent::UpdatePosition(id, x, y) => {
                if let Some(tb) = self.composition.get_mut(id) {
                    tb.x = x;
                    tb.y = y;
                }
            }
            CardEvent::UpdateText(id, text) => {
                if let Some(tb) = self.composition.get_mut(id) {
                    tb.text = text;
                }
            }
            CardEvent::Select(id) => self.selection = Some(id),
            CardEvent::SetSelectedFontSize(size) => {
                if !size.is_finite() || size <= 0.0 || size > MAX_FONT_SIZE {
                    log::debug!("ignoring font size {size} outside 0..={MAX_FONT_SIZE}");
                    return;
                }
                if let Some(tb) = self.selected_mut() {
                    tb.font_size = size;
                }
            }
            CardEvent::SetSelectedColor(color) => {
                if let Some(tb) = self.selected_mut() {
                    tb.color = color;
                }
            }
        }
    }

    /// Append a new text box and return its id. The new box is not selected.
    pub fn add(&mut self) -> TextBoxId {
        let id = TextBoxId::new();
        self.apply(CardEvent::Add(id));
        id
    }

    pub fn remove(&mut self, id: TextBoxId) {
        self.apply(CardEvent::Remove(id));
    }

    pub fn update_position(&mut self, id: TextBoxId, x: f32, y: f32) {
        self.apply(CardEvent::UpdatePosition(id, x, y));
    }

    pub fn update_text(&mut self, id: TextBoxId, text: String) {
        self.apply(CardEvent::UpdateText(id, text));
    }

    pub fn set_selection(&mut self, id: TextBoxId) {
        self.apply(CardEvent::Select(id));
    }

    pub fn update_selected_font_size(&mut self, size: f32) {
        self.apply(CardEvent::SetSelectedFontSize(size));
    }

    pub fn update_selected_color(&mut self, color: TextColor) {
        self.apply(CardEvent::SetSelectedColor(color));
    }

    pub fn select_background(&mut self, id: Option<&str>) {
        self.apply(CardEvent::SelectBackground(id.map(str::to_string)));
    }

    pub fn text_boxes(&self) -> &[TextBox] {
        &self.composition.text_boxes
    }

    /// The active text box, if the selection refers to an existing one
    pub fn selected(&self) -> Option<&TextBox> {
        self.selection.and_then(|id| self.composition.get(id))
    }

    fn selected_mut(&mut self) -> Option<&mut TextBox> {
        let id = self.selection?;
        self.composition.get_mut(id)
    }

    /// Font size shown in the style controls
    pub fn displayed_font_size(&self) -> f32 {
        self.selected().map_or(DEFAULT_FONT_SIZE, |tb| tb.font_size)
    }

    /// Color shown in the style controls
    pub fn displayed_color(&self) -> TextColor {
        self.selected().map_or(DEFAULT_COLOR, |tb| tb.color)
    }

    /// Owned copy of the composition for rendering off the UI thread
    pub fn snapshot(&self) -> CardComposition {
        self.composition.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PLACEHOLDER_TEXT;
    use std::collections::HashSet;

    #[test]
    fn add_creates_distinct_boxes_with_defaults() {
        let mut state = CardState::default();
        for _ in 0..5 {
            state.add();
        }

        assert_eq!(state.text_boxes().len(), 5);
        let ids: HashSet<_> = state.text_boxes().iter().map(|tb| tb.id).collect();
        assert_eq!(ids.len(), 5);
        for tb in state.text_boxes() {
            assert_eq!((tb.x, tb.y), (0.0, 0.0));
            assert_eq!(tb.text, PLACEHOLDER_TEXT);
            assert_eq!(tb.font_size, 20.0);
            assert_eq!(tb.color.to_string(), "#000000");
        }
        assert_eq!(state.selection, None);
    }

    #[test]
    fn add_keeps_insertion_order() {
        let mut state = CardState::default();
        let a = state.add();
        let b = state.add();
        let c = state.add();
        let order: Vec<_> = state.text_boxes().iter().map(|tb| tb.id).collect();
        assert_eq!(order, vec![a, b, c]);
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let mut state = CardState::default();
        state.add();
        state.add();
        let before = state.composition.clone();

        state.remove(TextBoxId::new());

        assert_eq!(state.composition, before);
    }

    #[test]
    fn remove_existing_id_shrinks_by_one() {
        let mut state = CardState::default();
        let a = state.add();
        let b = state.add();

        state.remove(a);

        assert_eq!(state.text_boxes().len(), 1);
        assert!(state.composition.get(a).is_none());
        assert!(state.composition.get(b).is_some());
    }

    #[test]
    fn remove_clears_matching_selection() {
        let mut state = CardState::default();
        let a = state.add();
        let b = state.add();

        state.set_selection(b);
        state.remove(a);
        assert_eq!(state.selection, Some(b));

        state.remove(b);
        assert_eq!(state.selection, None);
        assert_eq!(state.displayed_font_size(), DEFAULT_FONT_SIZE);
        assert_eq!(state.displayed_color(), DEFAULT_COLOR);
    }

    #[test]
    fn update_position_touches_only_target() {
        let mut state = CardState::default();
        let a = state.add();
        let b = state.add();
        state.update_position(b, 3.0, 4.0);

        state.update_position(a, 10.0, 20.0);

        let a_box = state.composition.get(a).unwrap();
        assert_eq!((a_box.x, a_box.y), (10.0, 20.0));
        let b_box = state.composition.get(b).unwrap();
        assert_eq!((b_box.x, b_box.y), (3.0, 4.0));
    }

    #[test]
    fn update_text_replaces_caption() {
        let mut state = CardState::default();
        let a = state.add();
        state.update_text(a, "Happy birthday".into());
        state.update_text(a, "Happy birthday!\nLove".into());
        assert_eq!(state.composition.get(a).unwrap().text, "Happy birthday!\nLove");
    }

    #[test]
    fn font_size_applies_to_selection_only() {
        let mut state = CardState::default();
        let a = state.add();
        let b = state.add();

        state.set_selection(a);
        state.set_selection(a);
        state.update_selected_font_size(30.0);

        assert_eq!(state.composition.get(a).unwrap().font_size, 30.0);
        assert_eq!(state.composition.get(b).unwrap().font_size, 20.0);
        assert_eq!(state.displayed_font_size(), 30.0);
    }

    #[test]
    fn non_positive_font_size_is_ignored() {
        let mut state = CardState::default();
        let a = state.add();
        state.set_selection(a);

        state.update_selected_font_size(0.0);
        state.update_selected_font_size(-4.0);
        state.update_selected_font_size(f32::NAN);

        assert_eq!(state.composition.get(a).unwrap().font_size, 20.0);
    }

    #[test]
    fn oversized_font_size_is_ignored() {
        let mut state = CardState::default();
        let a = state.add();
        state.set_selection(a);

        state.update_selected_font_size(MAX_FONT_SIZE);
        assert_eq!(state.composition.get(a).unwrap().font_size, MAX_FONT_SIZE);

        state.update_selected_font_size(20000.0);
        state.update_selected_font_size(200000.0);
        assert_eq!(state.composition.get(a).unwrap().font_size, MAX_FONT_SIZE);
    }

    #[test]
    fn dangling_selection_ignores_style_edits() {
        let mut state = CardState::default();
        let a = state.add();
        let b = state.add();
        state.remove(a);
        let before = state.composition.clone();

        state.set_selection(a);
        state.update_selected_color(TextColor::new(255, 0, 0));
        state.update_selected_font_size(42.0);

        assert_eq!(state.composition, before);
        assert!(state.selected().is_none());
        assert_eq!(state.composition.get(b).unwrap().color, DEFAULT_COLOR);
    }

    #[test]
    fn style_edits_without_selection_are_noops() {
        let mut state = CardState::default();
        state.add();
        let before = state.composition.clone();
        state.update_selected_color(TextColor::new(1, 2, 3));
        assert_eq!(state.composition, before);
    }

    #[test]
    fn add_select_and_recolor() {
        let mut state = CardState::default();
        let id = state.add();
        let tb = &state.text_boxes()[0];
        assert_eq!(tb.text, PLACEHOLDER_TEXT);
        assert_eq!(tb.font_size, 20.0);
        assert_eq!(tb.color.to_string(), "#000000");
        assert_eq!((tb.x, tb.y), (0.0, 0.0));

        state.set_selection(id);
        state.update_selected_color("#ff0000".parse().unwrap());

        assert_eq!(state.composition.get(id).unwrap().color.to_string(), "#ff0000");
    }

    #[test]
    fn background_selection() {
        let mut state = CardState::default();

        state.select_background(Some("2"));
        assert_eq!(state.composition.background.as_deref(), Some("images/image2.png"));

        state.select_background(None);
        assert_eq!(state.composition.background, None);

        state.select_background(Some("1"));
        state.select_background(Some("nope"));
        assert_eq!(state.composition.background, None);
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let mut state = CardState::default();
        let id = state.add();
        state.apply(CardEvent::Add(id));
        assert_eq!(state.text_boxes().len(), 1);
    }

    #[test]
    fn snapshot_is_detached_from_later_edits() {
        let mut state = CardState::default();
        let id = state.add();
        let snapshot = state.snapshot();
        state.update_text(id, "changed".into());
        assert_eq!(snapshot.get(id).unwrap().text, PLACEHOLDER_TEXT);
    }
}
