//! Client error types

use thiserror::Error;

/// Errors surfaced by [`SessionClient`](crate::SessionClient) operations.
///
/// The panel has no machine-readable error contract, so HTTP-level failures
/// (4xx/5xx status codes, unexpected page content) are not errors here: the
/// raw body is handed back to the caller unchanged. The only failure the
/// client can actually decode is the transport failing underneath it.
#[derive(Error, Debug)]
pub enum RoyaleError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, RoyaleError>;
