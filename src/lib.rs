//! Desktop client for a text-to-CSV/Excel conversion server.
//!
//! The upload form lives in [`controller`] as a plain state machine so it can
//! be driven without a window; [`app`] and [`ui`] wire it to egui.

pub mod app;
pub mod config;
pub mod controller;
pub mod convert;
pub mod delivery;
pub mod error;
pub mod localizations;
pub mod models;
pub mod theme;
pub mod ui;

pub use controller::{DropTarget, Effect, FormController, FormEvent};
pub use convert::{ConvertTransport, ConvertedFile, HttpTransport, SubmitRequest, SubmitResult};
pub use delivery::{DownloadSink, FolderSink};
pub use error::{ConvertError, FormError};
pub use models::{FileHandle, FormState, OutputType};
