use unicode_width::UnicodeWidthStr;

/// Terminal-style cell width of a string (wide glyphs count as two).
pub fn display_width(s: &str) -> usize {
    s.width()
}
