//! XML 1.0 character rules.

/// Whether `c` matches the XML 1.0 `Char` production.
///
/// `char` already excludes surrogates, so only the C0 controls other than
/// tab, LF and CR, plus U+FFFE and U+FFFF, are left out.
#[inline]
pub const fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

/// First character of `s` that XML cannot represent, with its byte offset.
pub fn find_invalid_char(s: &str) -> Option<(usize, char)> {
    s.char_indices().find(|&(_, c)| !is_xml_char(c))
}
