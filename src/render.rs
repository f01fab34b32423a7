//! HTML page rendering.
//!
//! Produces the final `index.html` text from a template and a
//! [`SiteConfig`]. Two halves:
//!
//! - **Links fragment** — one anchor per [`LinkEntry`], in display order,
//!   built with [maud](https://maud.lambda.xyz/) so titles and attribute
//!   values are escaped automatically. An entry shows its `image` when
//!   present and non-blank, otherwise its icon glyph.
//! - **Slot substitution** — the template carries `{{TOKEN}}` markers, each
//!   backed by a slot with an explicit encoding mode. Substitution is one
//!   left-to-right pass: inserted values are never rescanned, so a bio
//!   containing `{{NAME}}` stays literal. Unknown tokens are left in place.
//!
//! ## Slots
//!
//! | Token | Mode |
//! |-------|------|
//! | `NAME`, `BIO` | Text (HTML-escaped) |
//! | `AVATAR_URL`, `SITE_URL`, `SHARE_MAILTO` | Attribute (HTML-escaped) |
//! | `NAME_JSON`, `SITE_URL_JSON` | JSON string literal |
//! | `BG_COLOR`, `BUTTON_COLOR`, `BUTTON_HOVER_COLOR`, `BUTTON_BORDER`, `TEXT_COLOR`, `FONT_FAMILY`, `BACKGROUND_STYLE` | CSS, verbatim |
//! | `FONT_STYLESHEET`, `LINKS` | Pre-rendered HTML fragment |
//!
//! The only required marker is `{{LINKS}}` — a template without it cannot
//! be a links page. Slots the template does not reference are unused, not
//! errors.

use crate::config::{Background, BackgroundKind, LinkEntry, SiteConfig};
use crate::sanitize::{self, LinkError};
use maud::{Markup, html};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("unsafe link {title:?}: {source}")]
    UnsafeLink { title: String, source: LinkError },
    #[error("template is missing the {{{{{0}}}}} placeholder")]
    MissingPlaceholder(&'static str),
}

/// How a slot value is encoded before insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encode {
    /// Element content, HTML-escaped.
    Text,
    /// Double-quoted attribute value, HTML-escaped (same escaping as Text).
    Attribute,
    /// JSON string literal, quotes included.
    Json,
    /// CSS context, verbatim. Theme values are build-time trusted config,
    /// not end-user input.
    Css,
    /// Pre-rendered HTML, inserted as-is.
    Fragment,
}

impl Encode {
    fn apply(self, value: &str) -> String {
        match self {
            Encode::Text | Encode::Attribute => sanitize::escape_html(value),
            Encode::Json => {
                serde_json::to_string(value).expect("strings always serialize to JSON")
            }
            Encode::Css | Encode::Fragment => value.to_string(),
        }
    }
}

/// The one marker every template must carry.
const REQUIRED_TOKEN: &str = "LINKS";

/// Render a full page: links fragment, slot table, one substitution pass.
pub fn render_page(template: &str, config: &SiteConfig) -> Result<String, RenderError> {
    let links = render_links(&config.links)?;
    let slots = slot_table(config, &links);
    substitute(template, &slots)
}

/// Render the links fragment: one anchor per entry, in input order.
///
/// Any link that fails URL sanitization fails the whole render — one bad
/// link invalidates the page rather than shipping an unsafe anchor.
pub fn render_links(links: &[LinkEntry]) -> Result<String, RenderError> {
    let mut fragment = String::new();
    for link in links {
        let markup = render_link(link).map_err(|source| RenderError::UnsafeLink {
            title: link.title.clone(),
            source,
        })?;
        fragment.push_str(&markup.into_string());
        fragment.push('\n');
    }
    Ok(fragment)
}

fn render_link(link: &LinkEntry) -> Result<Markup, LinkError> {
    let href = sanitize::sanitize_href(&link.url)?;
    // target/rel are meaningless for mail and dialer handlers.
    let external = !sanitize::is_mail_or_tel(href);
    let rel = if sanitize::is_verification_link(href, &link.title, &link.icon) {
        "me noopener noreferrer"
    } else {
        "noopener noreferrer"
    };
    let image = link.image.as_deref().map(str::trim).filter(|v| !v.is_empty());
    let icon_class = match sanitize::sanitize_icon_class(&link.icon) {
        classes if classes.is_empty() => "link-icon".to_string(),
        classes => format!("link-icon {classes}"),
    };
    Ok(html! {
        a.link-item href=(href)
            target=[external.then_some("_blank")]
            rel=[external.then_some(rel)] {
            @if let Some(image) = image {
                img.link-image src=(image) alt=(link.title);
            } @else {
                i class=(icon_class) {}
            }
            span.link-title { (link.title) }
        }
    })
}

fn slot_table(config: &SiteConfig, links_fragment: &str) -> Vec<(&'static str, Encode, String)> {
    let profile = &config.profile;
    let theme = &profile.theme;
    vec![
        ("NAME", Encode::Text, profile.name.clone()),
        ("BIO", Encode::Text, profile.bio.clone()),
        ("AVATAR_URL", Encode::Attribute, profile.avatar.clone()),
        ("SITE_URL", Encode::Attribute, config.site_url.clone()),
        (
            "SHARE_MAILTO",
            Encode::Attribute,
            share_mailto(&profile.name, &config.site_url),
        ),
        ("NAME_JSON", Encode::Json, profile.name.clone()),
        ("SITE_URL_JSON", Encode::Json, config.site_url.clone()),
        (
            "BACKGROUND_STYLE",
            Encode::Css,
            background_style(&profile.background),
        ),
        ("BG_COLOR", Encode::Css, theme.background_color.clone()),
        ("BUTTON_COLOR", Encode::Css, theme.button_color.clone()),
        (
            "BUTTON_HOVER_COLOR",
            Encode::Css,
            theme.button_hover_color.clone(),
        ),
        ("BUTTON_BORDER", Encode::Css, theme.button_border.clone()),
        ("TEXT_COLOR", Encode::Css, theme.text_color.clone()),
        ("FONT_FAMILY", Encode::Css, theme.font_family.clone()),
        ("FONT_STYLESHEET", Encode::Fragment, font_stylesheet(config)),
        ("LINKS", Encode::Fragment, links_fragment.to_string()),
    ]
}

/// One left-to-right pass over the template. Inserted values go straight to
/// the output buffer and are never rescanned.
fn substitute(
    template: &str,
    slots: &[(&'static str, Encode, String)],
) -> Result<String, RenderError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut saw_required = false;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str("{{");
            rest = after;
            continue;
        };
        let token = &after[..end];
        match slots.iter().find(|(name, _, _)| *name == token) {
            Some((_, mode, value)) => {
                if token == REQUIRED_TOKEN {
                    saw_required = true;
                }
                out.push_str(&mode.apply(value));
                rest = &after[end + 2..];
            }
            None => {
                // Unknown token: keep it verbatim.
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    if !saw_required {
        return Err(RenderError::MissingPlaceholder(REQUIRED_TOKEN));
    }
    Ok(out)
}

/// CSS declarations for the page background.
///
/// The value is CSS, not HTML, and is inserted verbatim: escaping would
/// break legitimate gradient syntax. Config files are operator-authored at
/// build time; this is a documented trust boundary.
fn background_style(background: &Background) -> String {
    match background.kind {
        BackgroundKind::Image => format!(
            "background-image: url('{}');\n            \
             background-size: cover;\n            \
             background-position: center;\n            \
             background-attachment: fixed;\n            \
             background-repeat: no-repeat;",
            background.value
        ),
        BackgroundKind::Gradient => format!("background: {};", background.value),
        BackgroundKind::Color => format!("background-color: {};", background.value),
    }
}

/// `mailto:` share link with percent-encoded subject and body. The slot's
/// Attribute mode handles HTML escaping of the result.
fn share_mailto(name: &str, site_url: &str) -> String {
    let subject = utf8_percent_encode(&format!("Check out {name}"), NON_ALPHANUMERIC).to_string();
    let body = utf8_percent_encode(site_url, NON_ALPHANUMERIC).to_string();
    format!("mailto:?subject={subject}&body={body}")
}

/// Stylesheet link for localized fonts; empty when fonts are not configured.
fn font_stylesheet(config: &SiteConfig) -> String {
    if config.fonts.is_some() {
        r#"<link rel="stylesheet" href="assets/fonts.css">"#.to_string()
    } else {
        String::new()
    }
}
