use std::collections::HashMap;

use cosmic::iced::Length;
use cosmic::iced_widget::{column, row, text_editor};
use cosmic::widget::{container, image};
use cosmic::prelude::*;
use cosmic::{Task, app};

use crate::config::{CardPeaConfig, ExportLocation};
use crate::domain::{BACKGROUNDS, TextBoxId, background_index};
use crate::export::export_card;
use crate::fl;
use crate::session::editor::Editor;
use crate::session::handlers::{self, Effect};
use crate::session::messages::{Msg, TextBoxMsg};
use crate::widget::{card_canvas, style_panel, text_box_list, toolbar};

pub(crate) fn run() -> cosmic::iced::Result {
    let settings = cosmic::app::Settings::default().size(cosmic::iced::Size::new(1100.0, 900.0));
    cosmic::app::run::<App>(settings, ())
}

pub struct App {
    pub core: app::Core,
    pub editor: Editor,
    /// Preview image uploaded to the renderer, rebuilt after every update
    pub preview: image::Handle,
    preview_generation: u64,
    /// Multi-line caption editors, one per text box
    pub captions: HashMap<TextBoxId, text_editor::Content>,
    /// Dropdown labels: "no background" followed by the catalog
    pub background_options: Vec<String>,
    pub location_options: Vec<String>,
    pub scale_options: Vec<String>,
}

impl App {
    fn refresh_preview_handle(&mut self) {
        if self.preview_generation == self.editor.preview_generation {
            return;
        }
        self.preview_generation = self.editor.preview_generation;
        let preview = &self.editor.preview;
        self.preview =
            image::Handle::from_rgba(preview.width(), preview.height(), preview.clone().into_vec());
    }

    /// Give every text box a caption editor and drop editors of removed boxes
    fn sync_caption_editors(&mut self) {
        let text_boxes = self.editor.card.text_boxes();
        self.captions
            .retain(|id, _| text_boxes.iter().any(|tb| tb.id == *id));
        for tb in text_boxes {
            self.captions
                .entry(tb.id)
                .or_insert_with(|| text_editor::Content::with_text(&tb.text));
        }
    }

    /// Apply an editor action; edits become a caption update for the card
    fn caption_action(&mut self, id: TextBoxId, action: text_editor::Action) -> Option<Msg> {
        let content = self.captions.get_mut(&id)?;
        let is_edit = action.is_edit();
        content.perform(action);
        is_edit.then(|| TextBoxMsg::Edit(id, caption_text(content)).into())
    }

    fn update_title(&mut self) -> Task<cosmic::Action<Msg>> {
        let title = fl!("app-title");
        self.set_header_title(title.clone());
        match self.core.main_window_id() {
            Some(id) => self.set_window_title(title, id),
            None => Task::none(),
        }
    }

    fn selected_background(&self) -> usize {
        self.editor
            .card
            .composition
            .background
            .as_deref()
            .and_then(background_index)
            .map_or(0, |index| index + 1)
    }
}

impl cosmic::Application for App {
    type Executor = cosmic::executor::Default;

    type Flags = ();

    type Message = Msg;

    const APP_ID: &'static str = CardPeaConfig::ID;

    fn core(&self) -> &app::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut app::Core {
        &mut self.core
    }

    fn init(core: app::Core, _flags: Self::Flags) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let editor = Editor::new(CardPeaConfig::load());

        let background_options = std::iter::once(fl!("background-none"))
            .chain(BACKGROUNDS.iter().map(|choice| choice.name.to_string()))
            .collect();
        let location_options = ExportLocation::ALL.iter().map(|l| l.label()).collect();

        let mut app = Self {
            core,
            editor,
            preview: image::Handle::from_rgba(1, 1, vec![255; 4]),
            preview_generation: 0,
            captions: HashMap::new(),
            background_options,
            location_options,
            scale_options: toolbar::scale_labels(),
        };
        app.refresh_preview_handle();
        let task = app.update_title();

        (app, task)
    }

    fn view(&self) -> cosmic::Element<'_, Self::Message> {
        let spacing = self.core.system_theme().cosmic().spacing;
        let editor = &self.editor;

        let toolbar = toolbar::build_toolbar(
            &self.background_options,
            self.selected_background(),
            &self.location_options,
            editor.config.export_location.index(),
            &self.scale_options,
            toolbar::scale_index(editor.config.clamped_export_scale()),
            editor.status.as_deref(),
            editor.exports_in_flight > 0,
            spacing.space_s,
            spacing.space_xs,
        );

        let style = style_panel::build_style_panel(
            &editor.font_size_input,
            &editor.color_input,
            editor.card.displayed_color(),
            spacing.space_s,
        );

        let card = container(card_canvas::build_card_canvas(&self.preview))
            .padding(spacing.space_xxs);

        let list = text_box_list::build_text_box_list(
            editor.card.text_boxes(),
            &self.captions,
            editor.card.selection,
            spacing.space_s,
            spacing.space_xs,
        );

        let body = row![card, list]
            .spacing(spacing.space_m)
            .height(Length::Fill);

        container(
            column![toolbar, style, body]
                .spacing(spacing.space_s)
                .padding(spacing.space_s),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        let message = match message {
            Msg::CaptionEditor(id, action) => match self.caption_action(id, action) {
                Some(message) => message,
                None => return Task::none(),
            },
            message => message,
        };

        let effect = handlers::update(&mut self.editor, message);
        self.sync_caption_editors();
        self.refresh_preview_handle();

        match effect {
            Effect::None => Task::none(),
            Effect::Export(job) => cosmic::Task::perform(
                async move {
                    tokio::task::spawn_blocking(move || {
                        export_card(job).map_err(|err| format!("{err:#}"))
                    })
                    .await
                    .unwrap_or_else(|err| Err(format!("export task panicked: {err}")))
                },
                Msg::ExportFinished,
            )
            .map(cosmic::Action::App),
        }
    }
}

/// Editor contents as a caption, without the trailing newline the editor reports
fn caption_text(content: &text_editor::Content) -> String {
    let mut text = content.text();
    if text.ends_with('\n') {
        text.pop();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_text_keeps_inner_newlines() {
        let content = text_editor::Content::with_text("Happy\nbirthday");
        assert_eq!(caption_text(&content), "Happy\nbirthday");
    }
}
