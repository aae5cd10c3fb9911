//! Error types for the envmeld environment state management system.

use thiserror::Error;

/// Wire codec errors
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Invalid base64 armor: {0}")]
    Armor(#[from] base64::DecodeError),

    #[error("Invalid compressed stream: {0}")]
    Stream(#[from] std::io::Error),

    #[error("Invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Shell dialect errors, including the expected "capability absent" cases.
///
/// `HookUnsupported` and `AliasesUnsupported` are not failures: callers that
/// probe a dialect's capabilities match on them explicitly.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("unknown target shell '{0}'")]
    UnknownShell(String),

    #[error("the {0} shell doesn't support hooking")]
    HookUnsupported(&'static str),

    #[error("aliases are not supported in {0}")]
    AliasesUnsupported(&'static str),

    #[error("'{separator}' not found in alias line: {line}")]
    AliasParse { separator: char, line: String },

    #[error("Reading alias list failed: {0}")]
    AliasListRead(#[source] std::io::Error),
}

/// Top-level errors surfaced at the invocation boundary
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Shell error: {0}")]
    Shell(#[from] ShellError),

    #[error("Decoding recorded state failed: {0}")]
    Codec(#[from] CodecError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment error: {0}")]
    Environment(String),
}
