use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use eframe::egui;

use crate::config::AppConfig;
use crate::controller::{DropTarget, Effect, FormController, FormEvent};
use crate::convert::{ConvertTransport, PendingSubmission};
use crate::delivery::FolderSink;
use crate::localizations::Localizations;
use crate::models::FileHandle;
use crate::ui;

/// Turns egui's per-frame hovered/dropped file lists into drag events.
#[derive(Debug, Default)]
pub struct DragTracker {
    hovering: Option<DropTarget>,
}

impl DragTracker {
    pub fn update(
        &mut self,
        hovering: bool,
        target: DropTarget,
        dropped: Vec<FileHandle>,
    ) -> Vec<FormEvent> {
        let mut events = Vec::new();

        if !dropped.is_empty() {
            if let Some(previous) = self.hovering.take() {
                if previous != target {
                    events.push(FormEvent::DragLeave(previous));
                }
            }
            events.push(FormEvent::Drop {
                target,
                files: dropped,
            });
            return events;
        }

        match (self.hovering, hovering) {
            (None, true) => {
                events.push(FormEvent::DragEnter(target));
                self.hovering = Some(target);
            }
            (Some(previous), true) if previous != target => {
                events.push(FormEvent::DragLeave(previous));
                events.push(FormEvent::DragEnter(target));
                self.hovering = Some(target);
            }
            (Some(_), true) => events.push(FormEvent::DragOver(target)),
            (Some(previous), false) => {
                events.push(FormEvent::DragLeave(previous));
                self.hovering = None;
            }
            (None, false) => {}
        }

        events
    }
}

pub struct ConverterApp {
    form: FormController<FolderSink>,
    localizer: Localizations,
    transport: Arc<dyn ConvertTransport>,
    pending: Option<PendingSubmission>,
    drag: DragTracker,
    drop_zone: Option<egui::Rect>,
    focus_separator: bool,
    last_saved: Option<PathBuf>,
}

impl ConverterApp {
    pub fn new(config: &AppConfig, transport: Arc<dyn ConvertTransport>) -> Self {
        Self {
            form: FormController::new(FolderSink::new(&config.download_dir)),
            localizer: Localizations::new(config.lang.as_ref()),
            transport,
            pending: None,
            drag: DragTracker::default(),
            drop_zone: None,
            focus_separator: false,
            last_saved: None,
        }
    }

    fn apply(&mut self, event: FormEvent) {
        for effect in self.form.handle(event) {
            match effect {
                Effect::Dispatch(request) => {
                    self.last_saved = None;
                    self.pending = Some(PendingSubmission::start(self.transport.clone(), request));
                }
                Effect::FocusSeparator => self.focus_separator = true,
                Effect::Saved(path) => self.last_saved = Some(path),
            }
        }
    }

    fn process_submission(&mut self, ctx: &egui::Context) {
        let Some(pending) = &self.pending else {
            return;
        };

        match pending.poll() {
            Some(result) => {
                self.pending = None;
                self.apply(FormEvent::SubmitFinished(result));
                ctx.request_repaint();
            }
            None => ctx.request_repaint_after(Duration::from_millis(100)),
        }
    }

    fn process_drag(&mut self, ctx: &egui::Context) {
        let (hovering, dropped, pointer) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
                i.pointer.hover_pos(),
            )
        });

        // Some platforms report no pointer position during an OS drag; the
        // upload box is then the only sensible target.
        let target = match (pointer, self.drop_zone) {
            (Some(pos), Some(zone)) if !zone.contains(pos) => DropTarget::Page,
            _ => DropTarget::Zone,
        };

        let files = dropped
            .into_iter()
            .filter_map(|file| match file.path {
                Some(path) => Some(FileHandle::new(path)),
                None => {
                    log::warn!("dropped file {} has no path, ignoring", file.name);
                    None
                }
            })
            .collect();

        for event in self.drag.update(hovering, target, files) {
            self.apply(event);
        }
    }

    pub fn update_ui(&mut self, ctx: &egui::Context) {
        self.process_submission(ctx);
        self.process_drag(ctx);

        let mut events = Vec::new();
        let mut convert_clicked = false;
        let focus = std::mem::take(&mut self.focus_separator);

        egui::CentralPanel::default().show(ctx, |ui| {
            let state = self.form.state();

            ui.heading(self.localizer.text("app-title"));
            ui.add_space(20.0);

            self.drop_zone = Some(ui::render_upload_box(ui, state, &self.localizer, &mut events));
            ui.add_space(16.0);

            ui::render_separator(ui, state, &self.localizer, focus, &mut events);
            ui.add_space(16.0);

            ui::render_output_type(ui, state, &self.localizer, &mut events);
            ui.add_space(24.0);

            convert_clicked = ui::render_convert_button(ui, state, &self.localizer);
            ui.add_space(10.0);

            ui::render_status(ui, self.last_saved.as_deref(), &self.localizer);
        });

        for event in events {
            self.apply(event);
        }
        if convert_clicked {
            self.apply(FormEvent::SubmitRequested);
        }
        if self.focus_separator {
            ctx.request_repaint();
        }
    }
}

impl eframe::App for ConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_ui(ctx);
    }
}
