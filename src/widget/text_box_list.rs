//! Per-text-box controls: caption editor, select and remove

use std::collections::HashMap;

use cosmic::Element;
use cosmic::iced::Length;
use cosmic::iced_core::Alignment;
use cosmic::iced_widget::{column, row, text_editor};
use cosmic::widget::{button, scrollable, text};

use crate::domain::{TextBox, TextBoxId};
use crate::fl;
use crate::session::messages::{Msg, TextBoxMsg};

/// Height of each caption editor; room for about three lines
const CAPTION_EDITOR_HEIGHT: f32 = 72.0;

/// Build the list of text boxes in insertion order
pub fn build_text_box_list<'a>(
    text_boxes: &'a [TextBox],
    captions: &'a HashMap<TextBoxId, text_editor::Content>,
    selection: Option<TextBoxId>,
    space_s: u16,
    space_xs: u16,
) -> Element<'a, Msg> {
    let mut list = column![text::heading(fl!("text-boxes"))].spacing(space_s);

    if text_boxes.is_empty() {
        list = list.push(text::caption(fl!("no-text-boxes")));
    }

    for tb in text_boxes {
        let id = tb.id;
        let caption: Element<'a, Msg> = match captions.get(&id) {
            Some(content) => text_editor(content)
                .on_action(move |action| Msg::CaptionEditor(id, action))
                .height(Length::Fixed(CAPTION_EDITOR_HEIGHT))
                .into(),
            None => text::body(tb.text.as_str()).width(Length::Fill).into(),
        };

        let select = if selection == Some(id) {
            button::suggested(fl!("select-text-box"))
        } else {
            button::standard(fl!("select-text-box"))
        }
        .on_press(Msg::TextBox(TextBoxMsg::Select(id)));

        let remove =
            button::destructive(fl!("remove-text-box")).on_press(Msg::TextBox(TextBoxMsg::Remove(id)));

        list = list.push(
            row![caption, select, remove]
                .spacing(space_xs)
                .align_y(Alignment::Start),
        );
    }

    scrollable(list).width(Length::Fill).height(Length::Fill).into()
}
