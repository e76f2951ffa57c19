//! Content-based file-type and encoding detection.
//!
//! Classification never trusts the filename: a mis-named upload must still
//! be caught by the MIME rules, while extension checks are applied
//! separately as naming rules. Detection reads only a bounded prefix of the
//! content except for the archive-aware second pass, which needs the full
//! buffer to distinguish zip-based office containers from plain zips.

use chardetng::EncodingDetector;

/// Number of leading bytes the primary sniffer inspects.
pub const SNIFF_LIMIT: usize = 1024;

/// MIME types accepted for CSV data and metadata files. Magic-number
/// sniffers have no signature for CSV, so well-formed uploads classify as
/// plain text.
pub const CSV_MIME_TYPES: &[&str] = &["text/csv", "text/plain", "application/csv"];

/// Encodings accepted for CSV data and metadata files.
pub const CSV_ENCODINGS: &[&str] = &["us-ascii", "UTF-8"];

/// MIME types accepted for uploaded data archives.
pub const ZIP_MIME_TYPES: &[&str] = &["application/zip"];

/// Detect the MIME type of a file from its content.
///
/// The primary pass sniffs magic numbers in the leading bytes. When it
/// reports a zip container, a second pass re-sniffs the whole buffer, since
/// office and OpenDocument formats are zips whose distinguishing entries sit
/// past the first kilobyte. Content matching no signature classifies as
/// plain text when it decodes as text, otherwise as unknown binary.
pub fn detect_mime_type(content: &[u8]) -> &'static str {
    let sample = &content[..content.len().min(SNIFF_LIMIT)];

    match infer::get(sample) {
        Some(kind) if kind.mime_type() == "application/zip" => infer::get(content)
            .map(|kind| kind.mime_type())
            .unwrap_or("application/zip"),
        Some(kind) => kind.mime_type(),
        None => {
            if decodes_as_text(sample) {
                "text/plain"
            } else {
                "application/octet-stream"
            }
        }
    }
}

/// Detect the text encoding of a file from its leading bytes.
///
/// Returns the encoding label: `us-ascii` for pure ASCII, otherwise the
/// detector's guess (e.g. `UTF-8`, `windows-1252`, `UTF-16LE`).
pub fn detect_encoding(content: &[u8]) -> &'static str {
    let sample = &content[..content.len().min(SNIFF_LIMIT)];

    if sample.is_ascii() {
        return "us-ascii";
    }
    if std::str::from_utf8(sample).is_ok() || has_utf8_bom(sample) {
        return encoding_rs::UTF_8.name();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, true);
    detector.guess(None, true).name()
}

/// True when the sniffed MIME type matches any of the given patterns.
pub fn matches_any_mime_type(content: &[u8], patterns: &[impl AsRef<str>]) -> bool {
    let detected = detect_mime_type(content);
    patterns
        .iter()
        .any(|p| p.as_ref().eq_ignore_ascii_case(detected))
}

/// True when the sniffed encoding is in the allowed set.
pub fn matches_encoding(content: &[u8], allowed: &[impl AsRef<str>]) -> bool {
    let detected = detect_encoding(content);
    allowed
        .iter()
        .any(|enc| enc.as_ref().eq_ignore_ascii_case(detected))
}

fn has_utf8_bom(sample: &[u8]) -> bool {
    sample.starts_with(&[0xEF, 0xBB, 0xBF])
}

/// Heuristic for signature-less content: NUL bytes mean binary; otherwise
/// the detected encoding must decode the sample without errors.
fn decodes_as_text(sample: &[u8]) -> bool {
    if sample.is_empty() || sample.contains(&0) {
        return false;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(sample, true);
    let encoding = detector.guess(None, true);
    let (_, _, had_errors) = encoding.decode(sample);
    !had_errors
}
