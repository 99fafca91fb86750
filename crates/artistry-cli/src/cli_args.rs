use std::path::PathBuf;

use clap::{Parser, ValueHint};

/// Apply the style of one image to another using the style transfer backend.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Content image: a file path or an http(s) URL.
    #[arg(short, long, value_name = "PATH|URL", value_hint = ValueHint::AnyPath)]
    pub content: String,

    /// Style image: a file path or an http(s) URL.
    #[arg(short, long, value_name = "PATH|URL", value_hint = ValueHint::AnyPath)]
    pub style: String,

    /// Where to write the stylized image (defaults to stylized.<ext>).
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Override the backend endpoint from config.toml.
    #[arg(long, value_name = "URL", value_hint = ValueHint::Url)]
    pub endpoint: Option<String>,

    /// Whole-request timeout in seconds (no timeout by default).
    #[arg(long = "timeout-secs", value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,
}

/// A command-line image argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceArg {
    Path(PathBuf),
    Url(String),
}

impl SourceArg {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceArg::Url(trimmed.to_string())
        } else {
            SourceArg::Path(PathBuf::from(raw))
        }
    }
}
