use std::path::PathBuf;

use crate::error::FormError;

pub const ALLOWED_EXTENSION: &str = ".txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputType {
    Csv,
    Excel,
    #[default]
    None,
}

impl OutputType {
    /// Parses a select value. Anything but `csv` or `excel` is `None`.
    pub fn from_value(value: &str) -> Self {
        match value {
            "csv" => Self::Csv,
            "excel" => Self::Excel,
            _ => Self::None,
        }
    }

    /// The form value sent to the server, `None` has no value.
    pub fn as_value(&self) -> Option<&'static str> {
        match self {
            Self::Csv => Some("csv"),
            Self::Excel => Some("excel"),
            Self::None => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.as_value().is_some()
    }
}

/// A file the user picked or dropped. Only the name is ever inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub path: PathBuf,
    pub name: String,
}

impl FileHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self { path, name }
    }

    pub fn is_txt(&self) -> bool {
        self.name.to_lowercase().ends_with(ALLOWED_EXTENSION)
    }
}

/// Quick-pick separator. `raw` uses `\t` for a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorHint {
    pub label_key: &'static str,
    pub raw: &'static str,
}

pub const TAB_ESCAPE: &str = "\\t";

impl SeparatorHint {
    pub fn value(&self) -> String {
        decode_hint_value(self.raw)
    }
}

pub fn decode_hint_value(raw: &str) -> String {
    if raw == TAB_ESCAPE {
        "\t".to_string()
    } else {
        raw.to_string()
    }
}

pub const SEPARATOR_HINTS: [SeparatorHint; 4] = [
    SeparatorHint { label_key: "hint-comma", raw: "," },
    SeparatorHint { label_key: "hint-semicolon", raw: ";" },
    SeparatorHint { label_key: "hint-tab", raw: TAB_ESCAPE },
    SeparatorHint { label_key: "hint-pipe", raw: "|" },
];

/// What the upload box currently says.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadPrompt {
    #[default]
    Placeholder,
    Accepted(String),
    Error(FormError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonLabel {
    #[default]
    Idle,
    Converting,
}

impl ButtonLabel {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Idle => "convert-button",
            Self::Converting => "convert-button-busy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertButton {
    pub enabled: bool,
    pub label: ButtonLabel,
    pub loading: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub selected_file: Option<FileHandle>,
    pub separator: String,
    pub output_type: OutputType,
    pub submitting: bool,
    pub prompt: UploadPrompt,
    pub active_hint: Option<usize>,
    pub drag_active: bool,
    pub button: ConvertButton,
}

impl FormState {
    /// True iff the form may be submitted right now, ignoring `submitting`.
    pub fn can_submit(&self) -> bool {
        let has_txt_file = self.selected_file.as_ref().is_some_and(FileHandle::is_txt);
        let has_separator = !self.separator.trim().is_empty();

        has_txt_file && has_separator && self.output_type.is_valid()
    }
}
