//! Webfont localization.
//!
//! Fetches a font stylesheet from a fonts-CDN css2 endpoint, downloads
//! every font file it references, and rewrites the stylesheet so the page
//! serves fonts from its own output tree instead of the CDN:
//!
//! ```text
//! dist/assets/
//! ├── fonts.css        # rewritten stylesheet, url(...) → fonts/<file>
//! └── fonts/
//!     ├── inter-400.woff2
//!     └── inter-700.woff2
//! ```
//!
//! Requests are sequential, one at a time, in stylesheet order. There are
//! no retries: the first failure aborts the build rather than shipping a
//! page that falls back to remote font URLs.

use crate::config::FontsConfig;
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("font request failed for {url}: {source}")]
    Http {
        url: String,
        source: Box<ureq::Error>,
    },
    #[error("failed to read font response from {url}: {source}")]
    Response {
        url: String,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("stylesheet at {url} references no font files")]
    NoFontReferences { url: String },
}

const STYLESHEET_ENDPOINT: &str = "https://fonts.googleapis.com/css2";

/// The CDN varies its CSS by user agent; a modern one gets woff2 sources.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) linkpage";

/// Result of a successful localization.
#[derive(Debug, Clone, Copy)]
pub struct LocalizedFonts {
    /// Font files downloaded into `assets/fonts/`.
    pub files: usize,
}

/// Stylesheet request URL for a family/weights query.
pub fn stylesheet_url(fonts: &FontsConfig) -> String {
    let family = fonts.family.replace(' ', "+");
    if fonts.weights.is_empty() {
        return format!("{STYLESHEET_ENDPOINT}?family={family}&display=swap");
    }
    let weights = fonts
        .weights
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(";");
    format!("{STYLESHEET_ENDPOINT}?family={family}:wght@{weights}&display=swap")
}

/// Download the stylesheet and every font it references into `assets_dir`,
/// writing the rewritten stylesheet as `fonts.css` alongside a `fonts/`
/// directory of binaries.
pub fn localize(fonts: &FontsConfig, assets_dir: &Path) -> Result<LocalizedFonts, FontError> {
    let url = stylesheet_url(fonts);
    let css = fetch_text(&url)?;
    let references = extract_urls(&css);
    if references.is_empty() {
        return Err(FontError::NoFontReferences { url });
    }

    let fonts_dir = assets_dir.join("fonts");
    fs::create_dir_all(&fonts_dir).map_err(|source| FontError::Write {
        path: fonts_dir.clone(),
        source,
    })?;

    let mut rewritten = css;
    let mut used_names = HashSet::new();
    let mut files = 0;
    for (index, font_url) in references.iter().enumerate() {
        let mut name = local_name(font_url, index);
        if !used_names.insert(name.clone()) {
            name = format!("{index}-{name}");
            used_names.insert(name.clone());
        }
        let bytes = fetch_bytes(font_url)?;
        let path = fonts_dir.join(&name);
        fs::write(&path, &bytes).map_err(|source| FontError::Write {
            path: path.clone(),
            source,
        })?;
        rewritten = rewritten.replace(font_url.as_str(), &format!("fonts/{name}"));
        files += 1;
    }

    let css_path = assets_dir.join("fonts.css");
    fs::write(&css_path, rewritten).map_err(|source| FontError::Write {
        path: css_path,
        source,
    })?;
    Ok(LocalizedFonts { files })
}

/// Extract absolute http(s) `url(...)` references from a stylesheet, in
/// order of first appearance, deduplicated. Quoting styles (`url(x)`,
/// `url('x')`, `url("x")`) are all accepted; non-http references (data:
/// URIs, already-local paths) are left untouched.
pub fn extract_urls(css: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut rest = css;
    while let Some(pos) = rest.find("url(") {
        rest = &rest[pos + 4..];
        let Some(end) = rest.find(')') else { break };
        let reference = rest[..end].trim().trim_matches(|c| c == '"' || c == '\'');
        if (reference.starts_with("http://") || reference.starts_with("https://"))
            && !out.iter().any(|u| u == reference)
        {
            out.push(reference.to_string());
        }
        rest = &rest[end + 1..];
    }
    out
}

/// Derive a safe local filename from a font URL: final path segment,
/// query/fragment stripped, filtered to `[A-Za-z0-9._-]`. Falls back to an
/// indexed name when nothing usable remains.
fn local_name(font_url: &str, index: usize) -> String {
    let base = font_url
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    if cleaned.is_empty() || !cleaned.contains('.') {
        format!("font-{index}.woff2")
    } else {
        cleaned
    }
}

fn fetch_text(url: &str) -> Result<String, FontError> {
    let response = ureq::get(url)
        .set("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| FontError::Http {
            url: url.to_string(),
            source: Box::new(e),
        })?;
    response.into_string().map_err(|source| FontError::Response {
        url: url.to_string(),
        source,
    })
}

fn fetch_bytes(url: &str) -> Result<Vec<u8>, FontError> {
    let response = ureq::get(url)
        .set("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| FontError::Http {
            url: url.to_string(),
            source: Box::new(e),
        })?;
    let mut bytes = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|source| FontError::Response {
            url: url.to_string(),
            source,
        })?;
    Ok(bytes)
}
