//! Font size and color inputs for the active text box

use cosmic::Element;
use cosmic::iced::Length;
use cosmic::iced_core::{Alignment, Background, Border};
use cosmic::iced_widget::row;
use cosmic::widget::{container, text, text_input};

use crate::domain::TextColor;
use crate::fl;
use crate::session::messages::{Msg, StyleMsg};

/// Build the style row. The inputs show defaults when nothing is selected.
pub fn build_style_panel<'a>(
    font_size_input: &'a str,
    color_input: &'a str,
    swatch: TextColor,
    space_s: u16,
) -> Element<'a, Msg> {
    let font_size = text_input("20", font_size_input)
        .on_input(|value| Msg::Style(StyleMsg::FontSize(value)))
        .width(Length::Fixed(80.0));

    let color = text_input("#000000", color_input)
        .on_input(|value| Msg::Style(StyleMsg::Color(value)))
        .width(Length::Fixed(110.0));

    let [r, g, b] = swatch.to_rgb_f32();
    let swatch = container(cosmic::widget::horizontal_space())
        .width(Length::Fixed(24.0))
        .height(Length::Fixed(24.0))
        .class(cosmic::theme::Container::Custom(Box::new(move |_| {
            cosmic::iced_widget::container::Style {
                background: Some(Background::Color(cosmic::iced::Color::from_rgb(r, g, b))),
                border: Border {
                    radius: 4.0.into(),
                    width: 1.0,
                    color: cosmic::iced::Color::from_rgba(0.0, 0.0, 0.0, 0.4),
                },
                ..Default::default()
            }
        })));

    row![
        text::body(fl!("font-size")),
        font_size,
        text::body(fl!("text-color")),
        color,
        swatch,
    ]
    .spacing(space_s)
    .align_y(Alignment::Center)
    .into()
}
