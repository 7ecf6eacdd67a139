use serde::{Deserialize, Serialize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextMetrics {
    pub char_width: f64,
    pub padding_x: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            padding_x: 12.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    /// Truncate `text` with a trailing ellipsis so it fits in `max_width`.
    pub fn fit(&self, text: &str, max_width: f64) -> String {
        if self.text_width(text) <= max_width {
            return text.to_string();
        }

        let ellipsis_width = self.char_width;
        if max_width < ellipsis_width {
            return String::new();
        }

        let mut out = String::new();
        let mut used = ellipsis_width;
        for c in text.chars() {
            let w = UnicodeWidthChar::width(c).unwrap_or(0) as f64 * self.char_width;
            if used + w > max_width {
                break;
            }
            used += w;
            out.push(c);
        }
        out.push(ELLIPSIS);
        out
    }

    /// Width available for text inside a node of the given width.
    pub fn inner_width(&self, node_width: f64) -> f64 {
        (node_width - self.padding_x * 2.0).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        let m = TextMetrics::default();
        assert_eq!(m.text_width("User"), 4.0 * 8.0);
    }

    #[test]
    fn test_unicode_width() {
        let m = TextMetrics::default();
        // 全角文字は幅2
        assert_eq!(m.text_width("ユーザー"), 8.0 * 8.0);
    }

    #[test]
    fn test_fit_short_text_unchanged() {
        let m = TextMetrics::default();
        assert_eq!(m.fit("users", 100.0), "users");
    }

    #[test]
    fn test_fit_truncates_with_ellipsis() {
        let m = TextMetrics::default();
        // 5 columns available: 4 characters plus the ellipsis.
        assert_eq!(m.fit("customer_addresses", 40.0), "cust…");
    }

    #[test]
    fn test_fit_wide_characters() {
        let m = TextMetrics::default();
        // Each kana is 2 columns; 40px = 5 columns leaves room for two kana.
        assert_eq!(m.fit("ユーザー名", 40.0), "ユー…");
    }

    #[test]
    fn test_fit_too_narrow() {
        let m = TextMetrics::default();
        assert_eq!(m.fit("users", 4.0), "");
    }

    #[test]
    fn test_inner_width() {
        let m = TextMetrics::default();
        assert_eq!(m.inner_width(280.0), 256.0);
        assert_eq!(m.inner_width(10.0), 0.0);
    }
}
