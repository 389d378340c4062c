//! The card itself: a rendered preview that reports pointer activity
//!
//! Pointer positions are card-local, so they can be hit-tested directly
//! against text box coordinates.

use cosmic::Element;
use cosmic::iced::Length;
use cosmic::iced_core::ContentFit;
use cosmic::iced_widget::mouse_area;
use cosmic::widget::image;

use crate::domain::{CARD_HEIGHT, CARD_WIDTH, Point};
use crate::session::messages::{Msg, PointerMsg};

/// Build the card canvas from the latest preview render
pub fn build_card_canvas<'a>(preview: &image::Handle) -> Element<'a, Msg> {
    let card = image::Image::new(preview.clone())
        .content_fit(ContentFit::Fill)
        .width(Length::Fixed(CARD_WIDTH as f32))
        .height(Length::Fixed(CARD_HEIGHT as f32));

    mouse_area(card)
        .on_move(|position| Msg::Pointer(PointerMsg::Moved(Point::new(position.x, position.y))))
        .on_press(Msg::Pointer(PointerMsg::Pressed))
        .on_release(Msg::Pointer(PointerMsg::Released))
        .on_exit(Msg::Pointer(PointerMsg::Left))
        .into()
}
