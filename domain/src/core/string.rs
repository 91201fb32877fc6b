//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Keep at most `max_chars` characters of `s`, without any ellipsis.
///
/// Counts `char`s rather than bytes, so a 300 character budget holds the
/// same amount of Korean text as ASCII text.
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Collapse all whitespace runs (including newlines) into single spaces.
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // Each Hangul syllable is 3 bytes
        assert_eq!(truncate("안녕하세요", 30), "안녕하세요");
        assert_eq!(truncate("안녕하세요", 10), "안녕...");
    }

    #[test]
    fn test_take_chars_counts_characters() {
        assert_eq!(take_chars("hello", 3), "hel");
        assert_eq!(take_chars("hello", 10), "hello");
        assert_eq!(take_chars("안녕하세요", 2), "안녕");
        assert_eq!(take_chars("", 5), "");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("  a\n b\t\tc  "), "a b c");
        assert_eq!(single_line(""), "");
    }
}
