//! Wire codec for embedding state inside a single environment variable.
//!
//! A value is serialized to JSON, compressed with zlib, and armored as
//! URL-safe base64. The result is byte-safe, NUL-free, and small enough to
//! survive the platform's environment-variable size limit, which makes it the
//! only persistence layer this tool has: whatever the parent shell hands the
//! next invocation must decode back bit-for-bit.

use crate::error::CodecError;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Write};

/// Encode a value into the wire format.
pub fn encode<T: Serialize>(value: &T) -> String {
    // The payloads used here are maps of strings; serialization and the
    // in-memory compression sink cannot fail for them.
    let json = serde_json::to_vec(value).expect("value serializes to JSON");
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&json)
        .expect("write to in-memory encoder");
    let compressed = encoder.finish().expect("finish in-memory encoder");
    URL_SAFE.encode(compressed)
}

/// Decode a value from the wire format.
pub fn decode<T: DeserializeOwned>(input: &str) -> Result<T, CodecError> {
    let compressed = URL_SAFE.decode(input.trim())?;
    let mut decoder = ZlibDecoder::new(compressed.as_slice());
    let mut json = Vec::new();
    decoder.read_to_end(&mut json)?;
    Ok(serde_json::from_slice(&json)?)
}
