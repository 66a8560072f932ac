const PREVIEW_CHARS: usize = 35;

pub const TITLE_PLACEHOLDER: &str = "%TITLE%";
pub const URL_PLACEHOLDER: &str = "%URL%";

/// True for strings made only of whitespace, including the empty string.
pub fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

/// Strip leading and trailing `\n` and turn non-breaking spaces into
/// regular ones. Other whitespace is kept as typed.
pub fn normalize_selection(s: &str) -> String {
    s.trim_matches('\n').replace('\u{a0}', " ")
}

pub fn substitute_placeholders(template: &str, title: &str, url: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(URL_PLACEHOLDER, url)
}

/// Single-line preview shown in the copy notification: the first 35
/// characters, cut at the first newline, always followed by `...`.
pub fn notification_preview(s: &str) -> String {
    let head: String = s.chars().take(PREVIEW_CHARS).collect();
    let first_line = head.split('\n').next().unwrap_or_default();
    format!("{first_line}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \n  "));
        assert!(is_blank("\t\u{a0}\n"));
        assert!(!is_blank("  a "));
    }

    #[test]
    fn test_normalize_selection() {
        assert_eq!(normalize_selection("\n\nhello\n"), "hello");
        assert_eq!(normalize_selection("a\u{a0}b"), "a b");
        assert_eq!(normalize_selection("  keep spaces  "), "  keep spaces  ");
        assert_eq!(normalize_selection("line one\nline two"), "line one\nline two");
    }

    #[test]
    fn test_substitute_placeholders() {
        assert_eq!(
            substitute_placeholders("%TITLE% - %URL%", "Ex", "http://e.com"),
            "Ex - http://e.com"
        );
        assert_eq!(
            substitute_placeholders("%TITLE%|%TITLE%", "x", "y"),
            "x|x"
        );
        assert_eq!(substitute_placeholders("no placeholders", "x", "y"), "no placeholders");
    }

    #[test]
    fn test_preview_truncates_long_line() {
        let text = "a".repeat(50);
        let preview = notification_preview(&text);
        assert_eq!(preview, format!("{}...", "a".repeat(35)));
    }

    #[test]
    fn test_preview_keeps_first_line_only() {
        assert_eq!(notification_preview("first\nsecond"), "first...");
        assert_eq!(notification_preview("short"), "short...");
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let text = "ö".repeat(40);
        assert_eq!(notification_preview(&text), format!("{}...", "ö".repeat(35)));
    }
}
