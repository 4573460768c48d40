//! Payload sources for signing.

use crate::hash::{hex_sha256, hex_sha256_reader};
use crate::Result;
use bytes::Bytes;
use std::fmt::{self, Debug};
use std::io::Read;

/// The request body a signature covers.
///
/// Signing only needs the body's SHA-256 digest, so a payload is consumed
/// exactly once by [`into_hash`](Self::into_hash); the caller keeps its own
/// copy of the body for transmission.
pub enum Payload {
    /// No request body. Hashes to the empty-string digest, not a sentinel.
    Empty,
    /// An in-memory body.
    Bytes(Bytes),
    /// A file-like stream, hashed in 64 KiB chunks so memory stays bounded
    /// for large bodies.
    Reader(Box<dyn Read + Send>),
}

impl Payload {
    /// Wrap an in-memory body.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Payload::Bytes(bytes.into())
    }

    /// Wrap a file-like stream.
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Payload::Reader(Box::new(reader))
    }

    /// Consume the payload and produce its lowercase hex SHA-256 digest.
    ///
    /// A reader that cannot be fully read fails the whole signing call;
    /// no digest over a truncated body is ever produced.
    pub fn into_hash(self) -> Result<String> {
        match self {
            Payload::Empty => Ok(hex_sha256(b"")),
            Payload::Bytes(bytes) => Ok(hex_sha256(&bytes)),
            Payload::Reader(mut reader) => hex_sha256_reader(&mut reader),
        }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Empty
    }
}

impl Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Empty => f.write_str("Payload::Empty"),
            Payload::Bytes(bytes) => write!(f, "Payload::Bytes({} bytes)", bytes.len()),
            Payload::Reader(_) => f.write_str("Payload::Reader"),
        }
    }
}

impl From<Bytes> for Payload {
    fn from(bytes: Bytes) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes.into())
    }
}

impl From<&'static str> for Payload {
    fn from(s: &'static str) -> Self {
        Payload::Bytes(Bytes::from_static(s.as_bytes()))
    }
}
