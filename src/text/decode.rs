//! UTF-8 to UTF-16 message decoding

/// Decode a UTF-8 message into UTF-16 code units
///
/// Bytes from the first NUL onwards are ignored, so host buffers that carry a
/// C-style terminator decode the same as their trimmed form. The output buffer is
/// sized from the encoded length before it is filled.
///
/// Invalid UTF-8 decodes to an empty sequence.
#[must_use]
pub fn decode_utf8(bytes: &[u8]) -> Vec<u16> {
    let bytes = bytes.split(|b| *b == 0).next().unwrap_or_default();

    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(error = %e, len = bytes.len(), "message is not valid UTF-8");
            return Vec::new();
        }
    };

    let wide_len = text.encode_utf16().count();
    let mut buffer = Vec::with_capacity(wide_len);
    buffer.extend(text.encode_utf16());
    buffer
}
