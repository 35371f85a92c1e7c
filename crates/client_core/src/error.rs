use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("login rejected with status {status}: {body}")]
    LoginRejected { status: u16, body: String },
    #[error("token store '{path}' io failure: {source}")]
    TokenStoreIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("token store '{path}' is not valid json: {source}")]
    TokenStoreFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}
