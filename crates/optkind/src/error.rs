//! Error types for value extraction and canonical decoding.

use thiserror::Error;

use crate::kind::Kind;

/// Failures raised when an option's value is materialized or constructed.
///
/// Construction-time violations surface at the constructor; absence is only
/// reported at the point of extraction, never while options are combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum OptionError {
    /// A value was requested from an empty option, or a value accessor was
    /// used on an option holding null.
    #[error("option holds no value")]
    ValueAbsent,
    /// A null was passed where a non-null value is required.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The held value is of a different kind than the one requested.
    #[error("kind mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },
}

/// Errors produced while writing the canonical byte form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A reference payload does not fit the `u32` length prefix.
    #[error("reference payload of {0} bytes exceeds the u32 length prefix")]
    PayloadTooLarge(usize),
}

/// Errors produced while decoding the canonical byte form.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected EOF")]
    UnexpectedEof,
    #[error("unsupported encoding version: {0}")]
    UnsupportedVersion(u8),
    #[error("unknown kind tag: {0:#04x}")]
    UnknownTag(u8),
    #[error("expected kind {expected}, found tag for {found}")]
    WrongKind { expected: Kind, found: Kind },
    #[error("invalid bool byte: {0:#04x}")]
    InvalidBool(u8),
    #[error("invalid char scalar value: {0:#x}")]
    InvalidChar(u32),
    #[error("invalid reference payload: {0}")]
    InvalidPayload(String),
    #[error("trailing bytes after option")]
    TrailingBytes,
}

/// Crate-wide result alias.
pub type Result<T, E = OptionError> = core::result::Result<T, E>;
