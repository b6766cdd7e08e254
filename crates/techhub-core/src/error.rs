//! Gateway-level error types.

use thiserror::Error;

/// Failures raised by a [`RemoteStore`](crate::ports::RemoteStore) call.
///
/// Gateways never hand these to their callers; they are logged and the
/// accessor degrades to an empty or absent result.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Remote store unreachable: {0}")]
    Transport(String),

    #[error("Remote store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Remote store returned a malformed payload: {0}")]
    Malformed(String),

    #[error("Unknown remote procedure: {0}")]
    UnknownProcedure(String),
}

/// A persisted row could not be turned into a domain entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("{entity} row is missing required field `{field}`")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("{entity} row has an invalid `{field}`: {reason}")]
    InvalidField {
        entity: &'static str,
        field: &'static str,
        reason: String,
    },
}
