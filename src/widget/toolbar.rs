//! Toolbar: background choice, adding text boxes, export and export settings

use cosmic::Element;
use cosmic::iced::Length;
use cosmic::iced_core::Alignment;
use cosmic::iced_widget::{column, row};
use cosmic::widget::{button, dropdown, text};

use crate::config::ExportLocation;
use crate::fl;
use crate::session::messages::{Msg, SettingsMsg, TextBoxMsg};

/// Export pixel ratios offered in the scale dropdown
pub const EXPORT_SCALES: [f32; 4] = [1.0, 2.0, 3.0, 4.0];

/// Build the toolbar element
#[allow(clippy::too_many_arguments)]
pub fn build_toolbar<'a>(
    background_options: &'a [String],
    selected_background: usize,
    location_options: &'a [String],
    selected_location: usize,
    scale_options: &'a [String],
    selected_scale: Option<usize>,
    status: Option<&'a str>,
    exporting: bool,
    space_s: u16,
    space_xs: u16,
) -> Element<'a, Msg> {
    let background_picker = dropdown(background_options, Some(selected_background), Msg::Background);

    let add_button = button::standard(fl!("add-text-box")).on_press(Msg::TextBox(TextBoxMsg::Add));

    let export_button = button::suggested(fl!("download-card")).on_press(Msg::Export);

    let location_picker = dropdown(location_options, Some(selected_location), |index| {
        let location = ExportLocation::ALL
            .get(index)
            .copied()
            .unwrap_or_default();
        Msg::Settings(SettingsMsg::ExportLocation(location))
    });

    let scale_picker = dropdown(scale_options, selected_scale, |index| {
        Msg::Settings(SettingsMsg::ExportScale(
            EXPORT_SCALES.get(index).copied().unwrap_or(1.0),
        ))
    });

    let actions = row![
        background_picker,
        add_button,
        export_button,
        cosmic::widget::horizontal_space(),
        text::body(fl!("export-location")),
        location_picker,
        text::body(fl!("export-scale")),
        scale_picker,
    ]
    .spacing(space_s)
    .align_y(Alignment::Center)
    .width(Length::Fill);

    let status_line = match (status, exporting) {
        (Some(status), _) => text::caption(status),
        (None, true) => text::caption(fl!("export-running")),
        (None, false) => text::caption(""),
    };

    column![actions, status_line].spacing(space_xs).into()
}

/// Labels for the scale dropdown, e.g. "2×"
pub fn scale_labels() -> Vec<String> {
    EXPORT_SCALES.iter().map(|s| format!("{s:.0}×")).collect()
}

/// Dropdown index of a configured scale, if it is one of the offered values
pub fn scale_index(scale: f32) -> Option<usize> {
    EXPORT_SCALES.iter().position(|s| (s - scale).abs() < f32::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_labels_and_indices_line_up() {
        let labels = scale_labels();
        assert_eq!(labels.len(), EXPORT_SCALES.len());
        assert_eq!(labels[1], "2×");
        assert_eq!(scale_index(3.0), Some(2));
        assert_eq!(scale_index(1.5), None);
    }
}
