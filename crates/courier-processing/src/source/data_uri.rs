use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;
use std::sync::LazyLock;

use super::AcquisitionError;

static DATA_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:(.*?);base64,(.*)$").expect("data URI pattern is valid")
});

/// Extract the base64 payload of `data:<mediatype>;base64,<payload>`.
///
/// Returns `None` for anything else, including URIs without the `;base64` marker and
/// payloads spanning several lines.
pub fn parse_data_uri(uri: &str) -> Option<&str> {
    DATA_URI
        .captures(uri)
        .and_then(|captures| captures.get(2))
        .map(|payload| payload.as_str())
}

/// Decode standard (padded) base64, ignoring ASCII whitespace.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, AcquisitionError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(STANDARD.decode(compact)?)
}
