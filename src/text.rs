// @module: Caption text normalization

/// Normalize a caption text body.
///
/// Trailing whitespace (line breaks included) is removed from the end only,
/// `\r\n` and lone `\r` line breaks become `\n`. Everything else, interior
/// blank lines and leading whitespace included, is left as is.
pub fn normalize(text_body: &str) -> String {
    text_body
        .trim_end()
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}
