//! Zlib compression of text payloads.
//!
//! Compressed messages are stored as the hex encoding of the zlib stream so
//! they stay valid JSON strings inside the entry.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use tracing::debug;

use crate::error::{AuditError, AuditResult};

/// Compress a text payload and return it as a hex string.
pub fn deflate_text(text: &str) -> AuditResult<String> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes())?;
    let bytes = encoder.finish()?;
    debug!(
        original = text.len(),
        compressed = bytes.len(),
        "Compressed message payload"
    );
    Ok(hex::encode(bytes))
}

/// Decode a hex string produced by [`deflate_text`] back to the original text.
pub fn inflate_text(encoded: &str) -> AuditResult<String> {
    let bytes = hex::decode(encoded).map_err(|e| AuditError::Decode {
        message: format!("Invalid hex payload: {}", e),
    })?;

    let mut decoder = ZlibDecoder::new(bytes.as_slice());
    let mut text = String::new();
    decoder
        .read_to_string(&mut text)
        .map_err(|e| AuditError::Decode {
            message: format!("Failed to inflate payload: {}", e),
        })?;

    Ok(text)
}
