//! Startup configuration, from command-line flags with environment fallbacks.

use std::path::PathBuf;

use clap::Parser;
use unic_langid::LanguageIdentifier;

use crate::error::ConfigError;

pub const DEFAULT_SERVER: &str = "http://localhost:8080";

#[derive(Debug, Parser)]
#[command(name = "txt-convert-gui", version, about = "Convert .txt files to CSV or Excel")]
pub struct Args {
    /// Base URL of the conversion server.
    #[arg(long, env = "TXT_CONVERT_SERVER", default_value = DEFAULT_SERVER)]
    pub server: String,

    /// Folder converted files are saved to. Defaults to the user's download folder.
    #[arg(long, env = "TXT_CONVERT_DOWNLOAD_DIR")]
    pub download_dir: Option<PathBuf>,

    /// UI language, e.g. `en-US` or `es`.
    #[arg(long, env = "TXT_CONVERT_LANG")]
    pub lang: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: String,
    pub download_dir: PathBuf,
    pub lang: Option<LanguageIdentifier>,
}

impl AppConfig {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let server = args.server.trim().to_string();
        validate_server(&server)?;

        let lang = args
            .lang
            .map(|l| {
                l.parse::<LanguageIdentifier>()
                    .map_err(|_| ConfigError::InvalidLanguage(l))
            })
            .transpose()?;

        let download_dir = args.download_dir.unwrap_or_else(default_download_dir);

        Ok(Self {
            server,
            download_dir,
            lang,
        })
    }
}

pub fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| std::env::current_dir().unwrap_or_default())
}

fn validate_server(server: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidServerUrl {
        url: server.to_string(),
        reason: reason.to_string(),
    };

    let rest = server
        .strip_prefix("http://")
        .or_else(|| server.strip_prefix("https://"))
        .ok_or_else(|| invalid("must start with http:// or https://"))?;

    if rest.trim_end_matches('/').is_empty() {
        return Err(invalid("missing host"));
    }

    Ok(())
}
