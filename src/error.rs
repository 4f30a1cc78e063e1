// Error taxonomy for the CLI. Every failure the operator can see maps to
// one of these variants, and each variant maps to a process exit code so
// scripts can tell a bad invocation from a dead network or a full disk.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = ScraperError> = std::result::Result<T, E>;

/// Exit code for anything not covered by a more specific variant.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for bad or missing arguments (also what `clap` uses).
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_NETWORK: i32 = 3;
pub const EXIT_HTTP: i32 = 4;
pub const EXIT_FILESYSTEM: i32 = 5;

/// Maximum number of characters of a failed response body kept in an
/// `Http` error.
const BODY_SNIPPET_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("{0}")]
    Usage(String),
    #[error("request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("server responded with {status}: {body}")]
    Http { status: u16, body: String },
    #[error("cannot write {}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("invalid config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
    #[error("{0}")]
    Io(#[from] io::Error),
}

impl ScraperError {
    /// Build an `Http` error, keeping only the head of the response body.
    pub fn http(status: u16, body: &str) -> Self {
        let body = body.chars().take(BODY_SNIPPET_LEN).collect();
        ScraperError::Http { status, body }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ScraperError::Usage(_) => EXIT_USAGE,
            ScraperError::Network { .. } | ScraperError::Client(_) => EXIT_NETWORK,
            ScraperError::Http { .. } => EXIT_HTTP,
            ScraperError::Filesystem { .. } => EXIT_FILESYSTEM,
            ScraperError::Config { .. } | ScraperError::Io(_) => EXIT_FAILURE,
        }
    }
}

/// One-line report of an error and its causes, joined with `: `. A cause
/// whose text already appears earlier in the line is skipped, since
/// `reqwest` and `hyper` errors repeat their source in their own message.
pub fn report(err: &(dyn std::error::Error + 'static)) -> String {
    let mut line = err.to_string();
    let mut cause = err.source();
    while let Some(e) = cause {
        let msg = e.to_string();
        if !msg.is_empty() && !line.contains(&msg) {
            line.push_str(": ");
            line.push_str(&msg);
        }
        cause = e.source();
    }
    line
}
