//! Line-boundary splitting for uploaded text bodies.
//!
//! Splitting is terminator-based, not separator-based: `\n`, `\r\n`, and a
//! lone `\r` each end a line, a trailing terminator does not produce a
//! trailing empty element, and content without a final terminator still
//! yields its last partial line. Blank lines become empty-string elements;
//! nothing is filtered.

/// Split `text` into lines on `\n`, `\r\n`, and lone `\r` boundaries.
///
/// `"a\nb\n"` yields `["a", "b"]`; `"\n\n\n"` yields three empty strings.
pub fn split_lines(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;

    // `\n` and `\r` are ASCII and never appear inside a multi-byte UTF-8
    // sequence, so a byte scan keeps every slice on a char boundary.
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                out.push(text[start..i].to_string());
                i += 1;
                start = i;
            }
            b'\r' => {
                out.push(text[start..i].to_string());
                i += 1;
                if i < bytes.len() && bytes[i] == b'\n' {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }

    if start < bytes.len() {
        out.push(text[start..].to_string());
    }

    out
}
