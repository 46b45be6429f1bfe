use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use digest_logging::{digest_debug, digest_warn};

/// Path that marks an aggregator redirect link, matched case-insensitively.
pub const AGGREGATOR_MARKER: &str = "news.google.com/rss/articles/";

/// Field tag that follows the embedded URL in the decoded payload (byte 0xD2).
const URL_TERMINATOR: char = '\u{D2}';

const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn is_aggregator_redirect(url: &str) -> bool {
    marker_end(url).is_some()
}

/// Number of `=` needed to bring a base64 blob of `len` to a multiple of 4.
pub fn padding_len(len: usize) -> usize {
    (4 - len % 4) % 4
}

/// Recovers the source article URL from an aggregator redirect link.
///
/// Links that are not aggregator redirects pass through unchanged, as do
/// redirect links whose payload cannot be decoded.
pub fn decode_redirect(url: &str) -> String {
    let Some(start) = marker_end(url) else {
        return url.to_string();
    };

    let blob = url[start..].split('?').next().unwrap_or_default();
    match decode_payload(blob) {
        Some(target) => {
            digest_debug!("Decoded redirect {} -> {}", url, target);
            target
        }
        None => {
            digest_warn!("Could not decode redirect payload, keeping {}", url);
            url.to_string()
        }
    }
}

fn marker_end(url: &str) -> Option<usize> {
    // ASCII lowercasing keeps byte offsets aligned with the original string.
    url.to_ascii_lowercase()
        .find(AGGREGATOR_MARKER)
        .map(|idx| idx + AGGREGATOR_MARKER.len())
}

fn decode_payload(blob: &str) -> Option<String> {
    let mut standard: String = blob
        .chars()
        .map(|c| match c {
            '_' => '/',
            '-' => '+',
            other => other,
        })
        .collect();
    standard.push_str(&"=".repeat(padding_len(standard.len())));

    let bytes = LENIENT_STANDARD.decode(standard.as_bytes()).ok()?;
    let latin1: String = bytes.iter().map(|&b| char::from(b)).collect();

    let from_scheme = &latin1[latin1.find("http")?..];
    let target = from_scheme
        .split(URL_TERMINATOR)
        .next()
        .unwrap_or(from_scheme);
    Some(target.to_string())
}
