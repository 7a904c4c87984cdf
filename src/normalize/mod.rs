// src/normalize/mod.rs
//! Text cleanup shared by the normalized-text output and the row parser.
//!
//! Everything here works line by line and keeps each line's character
//! columns where they were, so the fixed-width layout survives.

use std::borrow::Cow;
use tracing::warn;

/// Tab stops used when expanding stray tabs (older revisions had them).
pub const TAB_WIDTH: usize = 8;

/// The one placeholder written to text outputs for an absent field.
pub const PLACEHOLDER: char = '-';

/// Characters that denote an absent field in some catalog revision.
pub const PLACEHOLDERS: [char; 3] = ['-', '*', '_'];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode raw catalog bytes. Lines that are not valid UTF-8 are read as
/// Latin-1 instead of failing the run.
pub fn decode_bytes(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_owned();
    }

    let mut out = String::with_capacity(bytes.len());
    for (idx, chunk) in bytes.split(|&b| b == b'\n').enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        match std::str::from_utf8(chunk) {
            Ok(s) => out.push_str(s),
            Err(_) => {
                warn!(line = idx + 1, "line is not valid UTF-8; decoding as Latin-1");
                out.extend(chunk.iter().map(|&b| b as char));
            }
        }
    }
    out
}

/// Convert legacy `\uXXXX` escapes (including surrogate pairs) into the
/// characters they name. Malformed escapes are left untouched.
pub fn unescape_unicode(line: &str) -> Cow<'_, str> {
    if !line.contains("\\u") {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(pos) = rest.find("\\u") {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 2..];
        match decode_escape(after) {
            Some((ch, used)) => {
                out.push(ch);
                rest = &after[used..];
            }
            None => {
                out.push_str("\\u");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn hex4(s: &str) -> Option<u32> {
    let digits = s.get(..4)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Returns the decoded char and how many bytes of `s` it consumed.
fn decode_escape(s: &str) -> Option<(char, usize)> {
    let hi = hex4(s)?;
    if (0xD800..0xDC00).contains(&hi) {
        let lo = hex4(s[4..].strip_prefix("\\u")?)?;
        if !(0xDC00..0xE000).contains(&lo) {
            return None;
        }
        let cp = 0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00);
        return char::from_u32(cp).map(|c| (c, 10));
    }
    char::from_u32(hi).map(|c| (c, 4))
}

/// Expand tabs to the next multiple of [`TAB_WIDTH`], counting characters.
pub fn expand_tabs(line: &str) -> Cow<'_, str> {
    if !line.contains('\t') {
        return Cow::Borrowed(line);
    }
    let mut out = String::with_capacity(line.len() + TAB_WIDTH);
    let mut col = 0usize;
    for c in line.chars() {
        if c == '\t' {
            let pad = TAB_WIDTH - col % TAB_WIDTH;
            out.extend(std::iter::repeat(' ').take(pad));
            col += pad;
        } else {
            out.push(c);
            col += 1;
        }
    }
    Cow::Owned(out)
}

/// Comment lines start with `#`; `$` shows up in some revisions as a typo for it.
pub fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with('$')
}

/// Expand tabs, drop trailing whitespace and repair a `$` comment marker.
pub fn clean_line(line: &str) -> String {
    let expanded = expand_tabs(line);
    let trimmed = expanded.trim_end();
    match trimmed.strip_prefix('$') {
        Some(rest) => format!("#{rest}"),
        None => trimmed.to_string(),
    }
}

/// Replace every standalone `_` or `*` with `-`. Widths are unchanged.
fn unify_placeholders(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let standalone = |i: usize| {
        (i == 0 || chars[i - 1].is_whitespace())
            && chars.get(i + 1).map_or(true, |c| c.is_whitespace())
    };
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            if c != PLACEHOLDER && PLACEHOLDERS.contains(&c) && standalone(i) {
                PLACEHOLDER
            } else {
                c
            }
        })
        .collect()
}

/// Split on any of `\r\n`, `\r` or `\n`. A final terminator does not
/// produce a trailing empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Produce the normalized catalog text. Running it on its own output is a
/// no-op.
pub fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for line in split_lines(raw) {
        let cleaned = clean_line(line);
        if is_comment(&cleaned) || cleaned.is_empty() {
            out.push_str(&cleaned);
        } else {
            out.push_str(&unify_placeholders(&cleaned));
        }
        out.push('\n');
    }
    out
}

/// A line whose content changed beyond trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChange {
    /// 1-based line number.
    pub line: usize,
    pub before: String,
    pub after: String,
}

/// Compare the raw and normalized texts line by line, ignoring trailing
/// whitespace.
pub fn changed_lines(raw: &str, normalized: &str) -> Vec<LineChange> {
    split_lines(raw)
        .into_iter()
        .zip(split_lines(normalized))
        .enumerate()
        .filter(|(_, (before, after))| before.trim_end() != after.trim_end())
        .map(|(idx, (before, after))| LineChange {
            line: idx + 1,
            before: before.trim_end().to_string(),
            after: after.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::SAMPLE;

    #[test]
    fn test_line_endings_collapse_to_lf() {
        let raw = "# a\r\nrow one  \rrow two\t\n\nlast";
        assert_eq!(normalize_text(raw), "# a\nrow one\nrow two\n\nlast\n");
    }

    #[test]
    fn test_tabs_expand_to_tab_stops() {
        assert_eq!(expand_tabs("ab\tc"), "ab      c");
        assert_eq!(expand_tabs("abcdefgh\tc"), "abcdefgh        c");
        assert_eq!(expand_tabs("ñ\tx"), "ñ       x");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let messy = SAMPLE.replace('\n', "\r\n").replace("Sirius            ", "Sirius\t\t  ");
        let once = normalize_text(&messy);
        let twice = normalize_text(&once);
        assert_eq!(once, twice);

        let clean_once = normalize_text(SAMPLE);
        assert_eq!(clean_once, normalize_text(&clean_once));
    }

    #[test]
    fn test_placeholders_unified_in_data_lines_only() {
        let raw = "# keep _ and * here\nLich  _  *  -  a_b  @\n";
        assert_eq!(
            normalize_text(raw),
            "# keep _ and * here\nLich  -  -  -  a_b  @\n"
        );
    }

    #[test]
    fn test_dollar_comment_repaired() {
        assert_eq!(clean_line("$ typo comment   "), "# typo comment");
        assert!(is_comment("$ typo"));
    }

    #[test]
    fn test_columns_keep_their_positions() {
        let normalized = normalize_text(SAMPLE);
        for (raw, norm) in split_lines(SAMPLE).iter().zip(split_lines(&normalized)) {
            assert_eq!(raw.trim_end().chars().count(), norm.chars().count());
        }
    }

    #[test]
    fn test_unescape_unicode() {
        assert_eq!(unescape_unicode("A\\u00f1a\\u00f1uca"), "Añañuca");
        assert_eq!(unescape_unicode("star \\ud83c\\udf1f"), "star 🌟");
        assert_eq!(unescape_unicode("bad \\u00zz"), "bad \\u00zz");
        assert!(matches!(unescape_unicode("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_decode_mixed_encodings() {
        let mut bytes = b"\xEF\xBB\xBFTup\xc3\xa3\n".to_vec();
        bytes.extend_from_slice(b"Tup\xe3\n");
        assert_eq!(decode_bytes(&bytes), "Tupã\nTupã\n");
    }

    #[test]
    fn test_changed_lines_ignores_trailing_whitespace() {
        let raw = "# head   \nLich  _  V\n";
        let normalized = normalize_text(raw);
        let changes = changed_lines(raw, &normalized);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].line, 2);
        assert_eq!(changes[0].after, "Lich  -  V");
    }
}
