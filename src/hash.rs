// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Hash related utils.

use crate::{Error, Result};
use hmac::Hmac;
use hmac::Mac;
use sha2::Digest;
use sha2::Sha256;
use std::io::Read;

/// Chunk size for streaming payload hashing.
///
/// Bounds memory use to O(chunk) regardless of payload size.
const CHUNK_SIZE: usize = 64 * 1024;

/// Hex encoded SHA256 hash.
///
/// Use this function instead of `hex::encode(sha256(content))` can reduce
/// extra copy.
pub fn hex_sha256(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content).as_slice())
}

/// Hex encoded SHA256 hash of everything a reader yields.
///
/// The reader is consumed in 64 KiB chunks. A short read error aborts the
/// whole computation; no digest over a truncated payload is ever returned.
pub fn hex_sha256_reader(reader: &mut dyn Read) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize().as_slice()))
}

/// HMAC with SHA256 hash.
pub fn hmac_sha256(key: &[u8], content: &[u8]) -> Result<Vec<u8>> {
    let mut h = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|e| Error::crypto("hmac key setup failed").with_source(anyhow::anyhow!(e)))?;
    h.update(content);

    Ok(h.finalize().into_bytes().to_vec())
}

/// Hex encoded HMAC with SHA256 hash.
///
/// Use this function instead of `hex::encode(hmac_sha256(key, content))` can
/// reduce extra copy.
pub fn hex_hmac_sha256(key: &[u8], content: &[u8]) -> Result<String> {
    let mut h = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|e| Error::crypto("hmac key setup failed").with_source(anyhow::anyhow!(e)))?;
    h.update(content);

    Ok(hex::encode(h.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_hex_sha256_empty() {
        assert_eq!(hex_sha256(b""), EMPTY_SHA256);
    }

    #[test]
    fn test_hex_sha256_reader_matches_oneshot() {
        let content = b"Welcome to Amazon S3.";
        let streamed = hex_sha256_reader(&mut Cursor::new(content)).unwrap();
        assert_eq!(streamed, hex_sha256(content));
    }

    #[test]
    fn test_hex_sha256_reader_multiple_chunks() {
        // Larger than one chunk so the loop runs more than once.
        let content = vec![0xabu8; CHUNK_SIZE * 2 + 17];
        let streamed = hex_sha256_reader(&mut Cursor::new(&content)).unwrap();
        assert_eq!(streamed, hex_sha256(&content));
    }

    #[test]
    fn test_hex_sha256_reader_failure() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionAborted,
                    "stream closed",
                ))
            }
        }

        let err = hex_sha256_reader(&mut Broken).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Io);
    }

    #[test]
    fn test_hmac_sha256_raw_and_hex_agree() {
        let raw = hmac_sha256(b"key", b"content").unwrap();
        let hexed = hex_hmac_sha256(b"key", b"content").unwrap();
        assert_eq!(hex::encode(raw), hexed);
    }
}
