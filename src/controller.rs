//! The upload form as an explicit state machine.
//!
//! Every user action becomes a [`FormEvent`]. [`FormController::handle`]
//! applies it to the owned [`FormState`] and returns the [`Effect`]s the
//! shell has to carry out (start the network call, move focus, report a
//! saved file). The only work done inline is delivering a finished download,
//! because the form must not reset unless the file was actually saved.
//!
//! A submission is bracketed by [`FormEvent::SubmitRequested`], which locks
//! the form, and [`FormEvent::SubmitFinished`], which always unlocks it.

use std::path::PathBuf;

use crate::convert::{SubmitRequest, SubmitResult};
use crate::delivery::DownloadSink;
use crate::error::FormError;
use crate::models::{
    ButtonLabel, FileHandle, FormState, OutputType, UploadPrompt, SEPARATOR_HINTS,
};

/// Where a drag event happened. Drops on the page outside the zone are
/// swallowed and never select a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Zone,
    Page,
}

#[derive(Debug)]
pub enum FormEvent {
    FileSelected(Option<FileHandle>),
    DragEnter(DropTarget),
    DragOver(DropTarget),
    DragLeave(DropTarget),
    Drop {
        target: DropTarget,
        files: Vec<FileHandle>,
    },
    SeparatorEdited(String),
    OutputTypeChanged(OutputType),
    HintSelected(usize),
    SubmitRequested,
    SubmitFinished(SubmitResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start the network call. The form stays locked until the matching
    /// `SubmitFinished` comes back.
    Dispatch(SubmitRequest),
    FocusSeparator,
    Saved(PathBuf),
}

pub struct FormController<S: DownloadSink> {
    state: FormState,
    sink: S,
}

impl<S: DownloadSink> FormController<S> {
    pub fn new(sink: S) -> Self {
        let mut controller = Self {
            state: FormState::default(),
            sink,
        };
        controller.validate();
        controller
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn can_submit(&self) -> bool {
        self.state.can_submit()
    }

    pub fn handle(&mut self, event: FormEvent) -> Vec<Effect> {
        match event {
            FormEvent::FileSelected(Some(file)) => {
                self.accept_file(file);
                Vec::new()
            }
            FormEvent::FileSelected(None) => {
                self.state.selected_file = None;
                self.validate();
                Vec::new()
            }
            FormEvent::DragEnter(target) | FormEvent::DragOver(target) => {
                if target == DropTarget::Zone {
                    self.state.drag_active = true;
                }
                Vec::new()
            }
            FormEvent::DragLeave(target) => {
                if target == DropTarget::Zone {
                    self.state.drag_active = false;
                }
                Vec::new()
            }
            FormEvent::Drop { target, files } => {
                self.drop_files(target, files);
                Vec::new()
            }
            FormEvent::SeparatorEdited(separator) => {
                self.state.separator = separator;
                self.validate();
                Vec::new()
            }
            FormEvent::OutputTypeChanged(output_type) => {
                self.state.output_type = output_type;
                self.validate();
                Vec::new()
            }
            FormEvent::HintSelected(index) => self.select_hint(index),
            FormEvent::SubmitRequested => self.submit(),
            FormEvent::SubmitFinished(result) => self.finish(result),
        }
    }

    /// Mirrors the predicate onto the convert button.
    fn validate(&mut self) {
        self.state.button.enabled = !self.state.submitting && self.state.can_submit();
    }

    fn show_error(&mut self, error: FormError) {
        self.state.prompt = UploadPrompt::Error(error);
        self.validate();
    }

    fn accept_file(&mut self, file: FileHandle) {
        if !file.is_txt() {
            log::info!("rejected {}: not a .txt file", file.name);
            self.state.selected_file = None;
            self.show_error(FormError::InvalidFileType);
            return;
        }

        self.state.prompt = UploadPrompt::Accepted(file.name.clone());
        self.state.selected_file = Some(file);
        self.validate();
    }

    fn drop_files(&mut self, target: DropTarget, files: Vec<FileHandle>) {
        if target == DropTarget::Page {
            log::debug!("ignored {} file(s) dropped outside the upload box", files.len());
            return;
        }

        self.state.drag_active = false;

        if let Some(file) = files.into_iter().next() {
            self.accept_file(file);
        }
    }

    fn select_hint(&mut self, index: usize) -> Vec<Effect> {
        let Some(hint) = SEPARATOR_HINTS.get(index) else {
            log::warn!("no separator hint at index {index}");
            return Vec::new();
        };

        self.state.active_hint = Some(index);
        self.state.separator = hint.value();
        self.validate();

        vec![Effect::FocusSeparator]
    }

    fn submit(&mut self) -> Vec<Effect> {
        if self.state.submitting {
            log::debug!("conversion already running, ignoring submit");
            return Vec::new();
        }

        self.validate();
        let Some(request) = SubmitRequest::from_state(&self.state) else {
            return Vec::new();
        };

        self.state.submitting = true;
        self.state.button.enabled = false;
        self.state.button.label = ButtonLabel::Converting;
        self.state.button.loading = true;

        log::info!(
            "converting {} to {} (separator {:?})",
            request.file.name,
            request.output_type,
            request.separator
        );

        vec![Effect::Dispatch(request)]
    }

    fn finish(&mut self, result: SubmitResult) -> Vec<Effect> {
        if !self.state.submitting {
            log::warn!("conversion result arrived with no submission running");
            return Vec::new();
        }

        let mut effects = Vec::new();

        match result.and_then(|file| self.sink.deliver(&file)) {
            Ok(path) => {
                log::info!("saved converted file to {}", path.display());
                self.reset_fields();
                effects.push(Effect::Saved(path));
            }
            Err(err) => {
                log::warn!("conversion failed: {err}");
                self.show_error(FormError::SubmissionFailed);
            }
        }

        self.unlock();
        effects
    }

    fn reset_fields(&mut self) {
        self.state.selected_file = None;
        self.state.separator.clear();
        self.state.output_type = OutputType::None;
        self.state.prompt = UploadPrompt::Placeholder;
        self.state.active_hint = None;
    }

    fn unlock(&mut self) {
        self.state.submitting = false;
        self.state.button.label = ButtonLabel::Idle;
        self.state.button.loading = false;
        self.validate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConvertedFile;
    use crate::error::ConvertError;
    use bytes::Bytes;

    #[derive(Default)]
    struct Recorder {
        saved: Vec<ConvertedFile>,
    }

    impl DownloadSink for Recorder {
        fn deliver(&mut self, file: &ConvertedFile) -> Result<PathBuf, ConvertError> {
            self.saved.push(file.clone());
            Ok(PathBuf::from("/downloads").join(&file.filename))
        }
    }

    struct BrokenDisk;

    impl DownloadSink for BrokenDisk {
        fn deliver(&mut self, _file: &ConvertedFile) -> Result<PathBuf, ConvertError> {
            Err(ConvertError::WriteOutput {
                path: PathBuf::from("/downloads"),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    fn ready<S: DownloadSink>(sink: S) -> FormController<S> {
        let mut form = FormController::new(sink);
        form.handle(FormEvent::FileSelected(Some(FileHandle::new("/tmp/data.txt"))));
        form.handle(FormEvent::SeparatorEdited(";".into()));
        form.handle(FormEvent::OutputTypeChanged(OutputType::Csv));
        form
    }

    #[test]
    fn starts_disabled() {
        let form = FormController::new(Recorder::default());
        assert!(!form.state().button.enabled);
        assert_eq!(form.state().prompt, UploadPrompt::Placeholder);
    }

    #[test]
    fn button_follows_every_edit() {
        let mut form = ready(Recorder::default());
        assert!(form.state().button.enabled);

        form.handle(FormEvent::SeparatorEdited("  ".into()));
        assert!(!form.state().button.enabled);

        form.handle(FormEvent::SeparatorEdited(",".into()));
        form.handle(FormEvent::OutputTypeChanged(OutputType::None));
        assert!(!form.state().button.enabled);
    }

    #[test]
    fn invalid_submit_is_silent() {
        let mut form = FormController::new(Recorder::default());
        assert!(form.handle(FormEvent::SubmitRequested).is_empty());
        assert!(!form.state().submitting);
        assert_eq!(form.state().prompt, UploadPrompt::Placeholder);
    }

    #[test]
    fn lock_sets_busy_button() {
        let mut form = ready(Recorder::default());
        let effects = form.handle(FormEvent::SubmitRequested);

        assert!(matches!(effects.as_slice(), [Effect::Dispatch(_)]));
        assert!(form.state().submitting);
        assert!(!form.state().button.enabled);
        assert!(form.state().button.loading);
        assert_eq!(form.state().button.label, ButtonLabel::Converting);
    }

    #[test]
    fn edits_while_busy_keep_button_disabled() {
        let mut form = ready(Recorder::default());
        form.handle(FormEvent::SubmitRequested);
        form.handle(FormEvent::SeparatorEdited("|".into()));
        assert!(!form.state().button.enabled);
    }

    #[test]
    fn failed_delivery_keeps_fields() {
        let mut form = ready(BrokenDisk);
        form.handle(FormEvent::SubmitRequested);
        let effects = form.handle(FormEvent::SubmitFinished(Ok(ConvertedFile {
            bytes: Bytes::from_static(b"x"),
            filename: "out.csv".into(),
        })));

        assert!(effects.is_empty());
        assert_eq!(
            form.state().prompt,
            UploadPrompt::Error(FormError::SubmissionFailed)
        );
        assert_eq!(form.state().separator, ";");
        assert!(!form.state().submitting);
        assert!(form.state().button.enabled);
    }

    #[test]
    fn stray_result_is_ignored() {
        let mut form = ready(Recorder::default());
        let effects = form.handle(FormEvent::SubmitFinished(Err(ConvertError::WorkerLost)));
        assert!(effects.is_empty());
        assert!(form.state().button.enabled);
    }

    #[test]
    fn drag_highlight_toggles_only_on_zone() {
        let mut form = FormController::new(Recorder::default());

        form.handle(FormEvent::DragEnter(DropTarget::Page));
        assert!(!form.state().drag_active);

        form.handle(FormEvent::DragEnter(DropTarget::Zone));
        form.handle(FormEvent::DragOver(DropTarget::Zone));
        assert!(form.state().drag_active);

        form.handle(FormEvent::DragLeave(DropTarget::Zone));
        assert!(!form.state().drag_active);

        form.handle(FormEvent::DragOver(DropTarget::Zone));
        form.handle(FormEvent::Drop {
            target: DropTarget::Zone,
            files: vec![FileHandle::new("image.png")],
        });
        assert!(!form.state().drag_active);
    }

    #[test]
    fn page_drop_selects_nothing() {
        let mut form = FormController::new(Recorder::default());
        form.handle(FormEvent::Drop {
            target: DropTarget::Page,
            files: vec![FileHandle::new("data.txt")],
        });
        assert!(form.state().selected_file.is_none());
        assert_eq!(form.state().prompt, UploadPrompt::Placeholder);
    }

    #[test]
    fn empty_drop_changes_nothing() {
        let mut form = ready(Recorder::default());
        form.handle(FormEvent::Drop {
            target: DropTarget::Zone,
            files: Vec::new(),
        });
        assert!(form.state().selected_file.is_some());
    }

    #[test]
    fn cleared_selection_disables() {
        let mut form = ready(Recorder::default());
        form.handle(FormEvent::FileSelected(None));
        assert!(form.state().selected_file.is_none());
        assert!(!form.state().button.enabled);
    }

    #[test]
    fn hint_out_of_range_is_ignored() {
        let mut form = FormController::new(Recorder::default());
        assert!(form.handle(FormEvent::HintSelected(99)).is_empty());
        assert_eq!(form.state().active_hint, None);
    }

    #[test]
    fn typing_keeps_active_hint() {
        let mut form = FormController::new(Recorder::default());
        form.handle(FormEvent::HintSelected(0));
        form.handle(FormEvent::SeparatorEdited("::".into()));
        assert_eq!(form.state().active_hint, Some(0));
    }
}
