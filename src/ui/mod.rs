use std::path::Path;

use eframe::egui::{self, RichText, Stroke};
use rfd::FileDialog;

use crate::controller::FormEvent;
use crate::localizations::Localizations;
use crate::models::{FileHandle, FormState, OutputType, UploadPrompt, SEPARATOR_HINTS};
use crate::theme::*;

/// Draws the upload box and returns its rect, which the drag tracker uses
/// to tell drops on the box from drops elsewhere in the window.
pub fn render_upload_box(
    ui: &mut egui::Ui,
    state: &FormState,
    localizer: &Localizations,
    events: &mut Vec<FormEvent>,
) -> egui::Rect {
    let (fill, border) = if state.drag_active {
        (UPLOAD_BG_DRAG, UPLOAD_BORDER_DRAG)
    } else {
        (UPLOAD_BG, UPLOAD_BORDER)
    };

    let frame = egui::Frame::group(ui.style())
        .fill(fill)
        .stroke(Stroke::new(1.5, border))
        .rounding(ROUNDING_FRAME)
        .show(ui, |ui| {
            ui.set_min_size(egui::vec2(ui.available_width(), UPLOAD_BOX_HEIGHT));
            ui.vertical_centered(|ui| {
                ui.add_space(UPLOAD_BOX_HEIGHT / 4.0);
                match &state.prompt {
                    UploadPrompt::Placeholder => {
                        ui.label(RichText::new(localizer.text("upload-placeholder")).size(18.0));
                        ui.label(RichText::new(localizer.text("upload-browse")).color(SECONDARY_TEXT));
                    }
                    UploadPrompt::Accepted(name) => {
                        ui.label(RichText::new(format!("✅ {}", name)).color(TEXT_SUCCESS));
                    }
                    UploadPrompt::Error(error) => {
                        ui.label(
                            RichText::new(format!("❌ {}", localizer.text(error.message_key())))
                                .color(TEXT_ERROR),
                        );
                    }
                }
            });
        });

    let response = frame.response.interact(egui::Sense::click());
    if response.clicked() {
        if let Some(path) = FileDialog::new().add_filter("Text", &["txt"]).pick_file() {
            events.push(FormEvent::FileSelected(Some(FileHandle::new(path))));
        }
    }

    response.rect
}

pub fn render_separator(
    ui: &mut egui::Ui,
    state: &FormState,
    localizer: &Localizations,
    focus: bool,
    events: &mut Vec<FormEvent>,
) {
    ui.label(localizer.text("separator-label"));

    let mut separator = state.separator.clone();
    let response = ui.add_sized(
        [ui.available_width(), 32.0],
        egui::TextEdit::singleline(&mut separator)
            .hint_text(localizer.text("separator-placeholder"))
            .font(egui::FontId::proportional(16.0)),
    );

    if focus {
        response.request_focus();
    }
    if response.changed() {
        events.push(FormEvent::SeparatorEdited(separator));
    }

    ui.horizontal_wrapped(|ui| {
        for (index, hint) in SEPARATOR_HINTS.iter().enumerate() {
            let active = state.active_hint == Some(index);

            let mut text = RichText::new(localizer.text(hint.label_key));
            if active {
                text = text.color(HINT_ACTIVE_TEXT);
            }

            let mut button = egui::Button::new(text).rounding(ROUNDING_BUTTON);
            if active {
                button = button.fill(HINT_ACTIVE_BG);
            }

            if ui.add(button).clicked() {
                events.push(FormEvent::HintSelected(index));
            }
        }
    });
}

fn output_label(localizer: &Localizations, output_type: OutputType) -> String {
    localizer.text(match output_type {
        OutputType::Csv => "output-csv",
        OutputType::Excel => "output-excel",
        OutputType::None => "output-none",
    })
}

pub fn render_output_type(
    ui: &mut egui::Ui,
    state: &FormState,
    localizer: &Localizations,
    events: &mut Vec<FormEvent>,
) {
    ui.horizontal(|ui| {
        ui.label(localizer.text("output-label"));

        let mut selected = state.output_type;
        egui::ComboBox::from_id_source("output-type")
            .selected_text(output_label(localizer, selected))
            .show_ui(ui, |ui| {
                for option in [OutputType::Csv, OutputType::Excel] {
                    ui.selectable_value(&mut selected, option, output_label(localizer, option));
                }
            });

        if selected != state.output_type {
            events.push(FormEvent::OutputTypeChanged(selected));
        }
    });
}

/// Returns true when the convert button was clicked.
pub fn render_convert_button(ui: &mut egui::Ui, state: &FormState, localizer: &Localizations) -> bool {
    let fill = if state.button.loading {
        LOADING_BUTTON_BG
    } else {
        PRIMARY_BUTTON_BG
    };

    let button = egui::Button::new(
        RichText::new(localizer.text(state.button.label.key()))
            .size(BUTTON_FONT_SIZE)
            .color(BUTTON_MAIN_TEXT),
    )
    .min_size(MIN_SIZE_BUTTON)
    .fill(fill)
    .rounding(ROUNDING_BUTTON);

    ui.horizontal(|ui| {
        let clicked = ui.add_enabled(state.button.enabled, button).clicked();
        if state.button.loading {
            ui.spinner();
        }
        clicked
    })
    .inner
}

pub fn render_status(ui: &mut egui::Ui, last_saved: Option<&Path>, localizer: &Localizations) {
    if let Some(path) = last_saved {
        ui.label(
            RichText::new(format!("{} {}", localizer.text("saved-to"), path.display()))
                .color(SECONDARY_TEXT),
        );
    }
}
