//! Pure text wrapping utilities and dimensional constants for the InputBox.
//!
//! These are stateless helpers with no dependency on InputBox or CursorState.

/// Left + right borders consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 2;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from area edge to content (border width)
pub(super) const BORDER_OFFSET: u16 = 1;

/// Build textwrap options configured for the input box inner width.
pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Calculate the inner content width after subtracting the borders.
/// Returns 0 if the area is too narrow.
pub(super) fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Count wrapped lines for the given text. Empty text still occupies one line.
pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }
    (textwrap::wrap(text, wrap_options(width)).len() as u16).max(1)
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_line_count_empty_string() {
        assert_eq!(wrap_line_count("", 10), 1);
    }

    #[test]
    fn wrap_line_count_zero_width() {
        assert_eq!(wrap_line_count("hello", 0), 1);
    }

    #[test]
    fn wrap_line_count_single_line_fits() {
        assert_eq!(wrap_line_count("hello", 10), 1);
    }

    #[test]
    fn wrap_line_count_wraps_long_text() {
        // "hello world" at width 5 → "hello" | "world"
        assert_eq!(wrap_line_count("hello world", 5), 2);
    }

    #[test]
    fn wrap_line_count_wide_chars() {
        // Each CJK char is 2 columns wide: 4 chars at width 4 → 2 lines
        assert_eq!(wrap_line_count("你好你好", 4), 2);
    }

    #[test]
    fn prev_char_boundary_ascii() {
        assert_eq!(prev_char_boundary("abc", 3), 2);
    }

    #[test]
    fn prev_char_boundary_at_start() {
        assert_eq!(prev_char_boundary("abc", 0), 0);
    }

    #[test]
    fn prev_char_boundary_multibyte() {
        // "你好" = 2 chars × 3 bytes
        assert_eq!(prev_char_boundary("你好", 6), 3);
        assert_eq!(prev_char_boundary("你好", 3), 0);
    }

    #[test]
    fn next_char_boundary_ascii() {
        assert_eq!(next_char_boundary("abc", 0), 1);
    }

    #[test]
    fn next_char_boundary_at_end() {
        assert_eq!(next_char_boundary("abc", 3), 3);
    }

    #[test]
    fn next_char_boundary_multibyte() {
        assert_eq!(next_char_boundary("你好", 0), 3);
        assert_eq!(next_char_boundary("你好", 3), 6);
    }
}
