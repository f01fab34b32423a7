//! Text and URL sanitization for rendered HTML.
//!
//! Everything here is a pure function: no I/O, no state. The renderer calls
//! these for every user-controlled value it places into the page.
//!
//! ## Link safety
//!
//! Link URLs pass [`sanitize_href`] before they reach an `href` attribute.
//! Relative references (`/`, `./`, `../`, `#`) cannot carry a scheme and
//! pass through unchanged; everything else must parse as an absolute URL
//! with a scheme on the allow-list. Scheme validation only — the original
//! string is returned un-normalized on success.
//!
//! A rejected URL fails the whole build rather than rendering a broken or
//! unsafe anchor.

use thiserror::Error;
use url::Url;

/// Schemes a link is allowed to use.
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("link URL is empty")]
    EmptyUrl,
    #[error("link URL {0:?} could not be parsed: {1}")]
    InvalidUrl(String, url::ParseError),
    #[error("link URL {0:?} uses disallowed scheme {1:?}")]
    DisallowedScheme(String, String),
}

/// Escape `&`, `<`, `>`, `"` and `'` as HTML entity references.
///
/// One routine serves both element content and attribute values; attributes
/// in the template are always double-quoted.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// Reduce an icon-class string to tokens that are safe inside a `class`
/// attribute: split on whitespace, keep `[A-Za-z0-9_-]+` tokens, rejoin
/// with single spaces. Everything else is dropped silently.
pub fn sanitize_icon_class(raw: &str) -> String {
    raw.split_whitespace()
        .filter(|token| {
            token
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validate a link URL, returning the trimmed original on success.
pub fn sanitize_href(raw: &str) -> Result<&str, LinkError> {
    let href = raw.trim();
    if href.is_empty() {
        return Err(LinkError::EmptyUrl);
    }
    // Relative references cannot smuggle a scheme.
    if href.starts_with('/')
        || href.starts_with("./")
        || href.starts_with("../")
        || href.starts_with('#')
    {
        return Ok(href);
    }
    let parsed = Url::parse(href).map_err(|e| LinkError::InvalidUrl(href.to_string(), e))?;
    if ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        Ok(href)
    } else {
        Err(LinkError::DisallowedScheme(
            href.to_string(),
            parsed.scheme().to_string(),
        ))
    }
}

/// Whether a URL is a `mailto:` or `tel:` reference (case-insensitive).
///
/// Those anchors get neither `target="_blank"` nor a `rel` attribute —
/// both are meaningless for mail and dialer handlers.
pub fn is_mail_or_tel(href: &str) -> bool {
    let href = href.trim();
    starts_with_ignore_case(href, "mailto:") || starts_with_ignore_case(href, "tel:")
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Heuristic for profile-verification links.
///
/// A link whose title or icon mentions Mastodon, or whose URL is an http(s)
/// address with a `/@handle` path, gets `rel="me"` so the linked profile
/// can confirm ownership of this page. False positives and negatives are
/// acceptable.
pub fn is_verification_link(url: &str, title: &str, icon: &str) -> bool {
    if title.to_ascii_lowercase().contains("mastodon")
        || icon.to_ascii_lowercase().contains("mastodon")
    {
        return true;
    }
    match Url::parse(url.trim()) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.path().starts_with("/@")
                && parsed.path().len() > 2
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_covers_all_specials() {
        let escaped = escape_html(r#"Tom & "Jerry" <script>'hi'</script>"#);
        for ch in ['<', '>', '"', '\''] {
            assert!(!escaped.contains(ch), "unescaped {ch:?} in {escaped:?}");
        }
        // Ampersands may only appear as part of an entity reference.
        for (i, _) in escaped.match_indices('&') {
            let tail = &escaped[i..];
            assert!(
                tail.find(';').is_some_and(|end| end <= 8),
                "bare ampersand in {escaped:?}"
            );
        }
    }

    #[test]
    fn escape_html_round_trips() {
        let original = r#"a & b < c > d "e" 'f'"#;
        let escaped = escape_html(original);
        let decoded = html_escape::decode_html_entities(&escaped);
        assert_eq!(decoded, original);
    }

    #[test]
    fn escape_html_leaves_plain_text_alone() {
        assert_eq!(escape_html("Jane Burns"), "Jane Burns");
    }

    #[test]
    fn icon_class_keeps_safe_tokens() {
        assert_eq!(
            sanitize_icon_class("fa-brands  fa-github"),
            "fa-brands fa-github"
        );
        assert_eq!(sanitize_icon_class("link_icon2"), "link_icon2");
    }

    #[test]
    fn icon_class_drops_hostile_tokens() {
        assert_eq!(sanitize_icon_class(r#"fa-link" onmouseover="x"#), "fa-link");
        assert_eq!(sanitize_icon_class("a<b c>d"), "");
        assert_eq!(sanitize_icon_class(""), "");
    }

    #[test]
    fn href_accepts_allowed_schemes() {
        for url in [
            "https://example.com",
            "http://example.com/path?q=1",
            "mailto:doug@example.com",
            "tel:+15555550123",
            "MAILTO:doug@example.com",
        ] {
            assert!(sanitize_href(url).is_ok(), "{url} should be accepted");
        }
    }

    #[test]
    fn href_accepts_relative_references() {
        for url in ["/about", "./assets/cv.pdf", "../up", "#contact"] {
            assert_eq!(sanitize_href(url).unwrap(), url);
        }
    }

    #[test]
    fn href_rejects_disallowed_schemes() {
        for url in [
            "javascript:alert(1)",
            "data:text/html,<script>",
            "ftp://example.com/file",
            "vbscript:x",
        ] {
            assert!(matches!(
                sanitize_href(url),
                Err(LinkError::DisallowedScheme(..))
            ));
        }
    }

    #[test]
    fn href_rejects_empty_and_unparseable() {
        assert!(matches!(sanitize_href(""), Err(LinkError::EmptyUrl)));
        assert!(matches!(sanitize_href("   "), Err(LinkError::EmptyUrl)));
        assert!(matches!(
            sanitize_href("example.com"),
            Err(LinkError::InvalidUrl(..))
        ));
    }

    #[test]
    fn href_returns_original_spelling() {
        assert_eq!(
            sanitize_href(" https://Example.com/A?b=C ").unwrap(),
            "https://Example.com/A?b=C"
        );
    }

    #[test]
    fn mail_and_tel_detection_is_case_insensitive() {
        assert!(is_mail_or_tel("mailto:a@b.c"));
        assert!(is_mail_or_tel("MailTo:a@b.c"));
        assert!(is_mail_or_tel("tel:+1555"));
        assert!(!is_mail_or_tel("https://example.com"));
        assert!(!is_mail_or_tel("été"));
    }

    #[test]
    fn verification_matches_title_icon_or_path() {
        assert!(is_verification_link("https://x.test", "My Mastodon", ""));
        assert!(is_verification_link("https://x.test", "", "fa-brands fa-mastodon"));
        assert!(is_verification_link("https://hachyderm.io/@doug", "Social", ""));
    }

    #[test]
    fn verification_ignores_plain_links() {
        assert!(!is_verification_link("https://example.com/blog", "Blog", "fa-link"));
        assert!(!is_verification_link("https://example.com/@", "Profile", ""));
        assert!(!is_verification_link("mailto:a@b.c", "Email", ""));
    }
}
