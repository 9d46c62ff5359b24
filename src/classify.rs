//! Maps raw transport failures onto the small set of error kinds users see.

use std::error::Error as StdError;
use std::io;

use serde::Serialize;

use crate::api::errors::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Timeout,
    ConnectionClosed,
    ConnectionFailed,
    EmptyResponse,
    Unknown,
}

impl ErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout while connecting",
            ErrorKind::ConnectionClosed => "connection closed unexpectedly",
            ErrorKind::ConnectionFailed => "failed to connect",
            ErrorKind::EmptyResponse => "device reported no lights",
            ErrorKind::Unknown => "unknown error",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::ConnectionClosed => "connection_closed",
            ErrorKind::ConnectionFailed => "connection_failed",
            ErrorKind::EmptyResponse => "empty_response",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Classify an error. First match wins: timeout, closed, failed, empty.
pub fn classify(err: &TransportError) -> ErrorKind {
    let err = err.last_error();

    if is_timeout(err) {
        ErrorKind::Timeout
    } else if is_connection_closed(err) {
        ErrorKind::ConnectionClosed
    } else if is_connection_failed(err) {
        ErrorKind::ConnectionFailed
    } else if matches!(err, TransportError::EmptyResponse) {
        ErrorKind::EmptyResponse
    } else {
        ErrorKind::Unknown
    }
}

fn is_timeout(err: &TransportError) -> bool {
    match err {
        TransportError::Http(e) => {
            e.is_timeout()
                || has_io_kind(e, &[io::ErrorKind::TimedOut])
                || has_hyper_error(e, hyper::Error::is_canceled)
        }
        _ => false,
    }
}

fn is_connection_closed(err: &TransportError) -> bool {
    match err {
        TransportError::Http(e) => {
            e.is_body()
                || e.is_decode()
                || has_hyper_error(e, hyper::Error::is_incomplete_message)
                || has_io_kind(
                    e,
                    &[
                        io::ErrorKind::UnexpectedEof,
                        io::ErrorKind::ConnectionReset,
                        io::ErrorKind::ConnectionAborted,
                        io::ErrorKind::BrokenPipe,
                    ],
                )
        }
        _ => false,
    }
}

fn is_connection_failed(err: &TransportError) -> bool {
    match err {
        TransportError::Http(e) => {
            e.is_connect()
                || has_io_kind(
                    e,
                    &[
                        io::ErrorKind::ConnectionRefused,
                        io::ErrorKind::AddrNotAvailable,
                        io::ErrorKind::NotConnected,
                    ],
                )
        }
        _ => false,
    }
}

fn source_chain<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |&e| e.source())
}

/// Walk the source chain looking for an I/O error of one of `kinds`.
fn has_io_kind(err: &(dyn StdError + 'static), kinds: &[io::ErrorKind]) -> bool {
    source_chain(err)
        .filter_map(|e| e.downcast_ref::<io::Error>())
        .any(|io_err| kinds.contains(&io_err.kind()))
}

/// Walk the source chain looking for a hyper error matching `pred`.
///
/// A peer hanging up before a complete response surfaces here, with no
/// I/O error underneath.
fn has_hyper_error(err: &(dyn StdError + 'static), pred: fn(&hyper::Error) -> bool) -> bool {
    source_chain(err)
        .filter_map(|e| e.downcast_ref::<hyper::Error>())
        .any(pred)
}
