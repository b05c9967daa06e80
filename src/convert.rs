use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bytes::Bytes;
use reqwest::blocking::{multipart, Client};
use reqwest::header::CONTENT_DISPOSITION;

use crate::error::ConvertError;
use crate::models::{FileHandle, FormState};

pub const CONVERT_PATH: &str = "/convert";
pub const DEFAULT_FILENAME: &str = "converted-file";

/// Snapshot of the form taken when the submission is locked in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub file: FileHandle,
    pub separator: String,
    pub output_type: &'static str,
}

impl SubmitRequest {
    /// Returns `None` unless the form currently passes validation.
    pub fn from_state(state: &FormState) -> Option<Self> {
        if !state.can_submit() {
            return None;
        }
        Some(Self {
            file: state.selected_file.clone()?,
            separator: state.separator.clone(),
            output_type: state.output_type.as_value()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    pub bytes: Bytes,
    pub filename: String,
}

pub type SubmitResult = Result<ConvertedFile, ConvertError>;

/// The parts of an HTTP response the form looks at.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_disposition: Option<String>,
    pub body: Bytes,
}

pub trait ConvertTransport: Send + Sync {
    fn post(&self, request: &SubmitRequest) -> Result<RawResponse, ConvertError>;
}

pub fn convert_endpoint(server: &str) -> String {
    format!("{}{}", server.trim_end_matches('/'), CONVERT_PATH)
}

pub struct HttpTransport {
    client: Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// No client timeout: a request waits as long as the server needs.
    pub fn new(server: &str) -> Result<Self, ConvertError> {
        Self::with_timeout(server, None)
    }

    pub fn with_timeout(server: &str, timeout: Option<Duration>) -> Result<Self, ConvertError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: convert_endpoint(server),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Header bytes as text: UTF-8 when valid, otherwise Latin-1.
pub fn decode_header_value(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(text) => text.to_string(),
        Err(_) => raw.iter().map(|&b| char::from(b)).collect(),
    }
}

impl ConvertTransport for HttpTransport {
    fn post(&self, request: &SubmitRequest) -> Result<RawResponse, ConvertError> {
        let file_part = multipart::Part::file(&request.file.path)
            .map_err(|source| ConvertError::ReadFile {
                path: request.file.path.clone(),
                source,
            })?
            .file_name(request.file.name.clone());

        let form = multipart::Form::new()
            .part("file", file_part)
            .text("separator", request.separator.clone())
            .text("type", request.output_type);

        log::debug!("POST {} ({})", self.endpoint, request.file.name);
        let response = self.client.post(&self.endpoint).multipart(form).send()?;

        let status = response.status();
        let content_disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .map(|value| decode_header_value(value.as_bytes()));

        // The body of a failed conversion is never shown.
        let body = if status.is_success() {
            response.bytes()?
        } else {
            Bytes::new()
        };

        Ok(RawResponse {
            status: status.as_u16(),
            content_disposition,
            body,
        })
    }
}

/// Pulls the suggested filename out of a `Content-Disposition` value.
pub fn parse_content_disposition(value: &str) -> Option<String> {
    let (_, rest) = value.split_once("filename=")?;
    let name = rest.split(';').next().unwrap_or_default().replace('"', "");
    let name = name.trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

pub fn interpret_response(response: RawResponse) -> SubmitResult {
    if !(200..300).contains(&response.status) {
        return Err(ConvertError::HttpStatus {
            status: response.status,
        });
    }

    let filename = response
        .content_disposition
        .as_deref()
        .and_then(parse_content_disposition)
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string());

    Ok(ConvertedFile {
        bytes: response.body,
        filename,
    })
}

/// Runs one submission off the UI thread and reports back on `tx`.
pub fn spawn_submission(
    transport: Arc<dyn ConvertTransport>,
    request: SubmitRequest,
    tx: Sender<SubmitResult>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let result = transport.post(&request).and_then(interpret_response);
        if tx.send(result).is_err() {
            log::warn!("form went away before the conversion of {} finished", request.file.name);
        }
    })
}

/// A submission running on a worker thread.
pub struct PendingSubmission {
    receiver: Receiver<SubmitResult>,
}

impl PendingSubmission {
    pub fn start(transport: Arc<dyn ConvertTransport>, request: SubmitRequest) -> Self {
        let (tx, rx) = mpsc::channel();
        spawn_submission(transport, request, tx);
        Self { receiver: rx }
    }

    /// Non-blocking check. A worker that died without reporting counts as
    /// a failed submission.
    pub fn poll(&self) -> Option<SubmitResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ConvertError::WorkerLost)),
        }
    }

    /// Blocks until the worker reports.
    pub fn wait(self) -> SubmitResult {
        self.receiver.recv().unwrap_or(Err(ConvertError::WorkerLost))
    }
}
