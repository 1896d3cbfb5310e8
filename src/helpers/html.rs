//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Decode the entities rich-text editors put into placeholder bodies
///
/// `&amp;` is decoded last so `&amp;lt;` becomes `&lt;`, not `<`.
pub fn html_unescape(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    s.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape("<script></script>"),
            "&lt;script&gt;&lt;/script&gt;"
        );
        assert_eq!(html_escape(r#"a & "b" 'c'"#), "a &amp; &quot;b&quot; &#39;c&#39;");
    }

    #[test]
    fn test_html_unescape() {
        assert_eq!(html_unescape("&quot;x&quot; + &#39;y&#39;"), r#""x" + 'y'"#);
        assert_eq!(html_unescape("a&nbsp;+&nbsp;b"), "a + b");
        assert_eq!(html_unescape("&amp;lt;"), "&lt;");
        assert_eq!(html_unescape("plain"), "plain");
    }

    #[test]
    fn test_unescape_inverts_escape() {
        let raw = r#"<b title="x">Tom & 'Jerry'</b>"#;
        assert_eq!(html_unescape(&html_escape(raw)), raw);
    }
}
