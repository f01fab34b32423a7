//! # Linkpage
//!
//! A minimal static site generator for link-in-bio landing pages. One JSON
//! config per site describes a profile, a theme, and an ordered list of
//! links; one build invocation turns it into a self-contained output
//! directory with an `index.html`, copied assets, optionally localized
//! webfonts, and a QR code pointing at the site URL.
//!
//! # Architecture: A Linear Pipeline
//!
//! There is no server, no cache, and no incremental state. A build is eight
//! sequential steps (see [`build`]):
//!
//! ```text
//! validate name → load config → render HTML → reset dist/
//!     → copy assets → localize fonts → write index.html → write qrcode.png
//! ```
//!
//! Every step either completes or aborts the build with a contextual error;
//! there are no retries and no best-effort fallbacks.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`build`] | The pipeline itself — step sequencing and the top-level error type |
//! | [`config`] | `config.json` schema, loading, and validation |
//! | [`render`] | Template slots with per-slot encoding, links fragment, background CSS |
//! | [`sanitize`] | HTML escaping, icon-class filtering, URL scheme allow-listing |
//! | [`paths`] | Traversal-safe validation of user-supplied path names |
//! | [`assets`] | Recursive asset copy restricted to validated entry names |
//! | [`fonts`] | Webfont stylesheet fetch, font download, CSS rewrite |
//! | [`qr`] | Deterministic QR code PNG for the site URL |
//! | [`output`] | CLI output formatting — pure functions, printed by the pipeline |
//!
//! # Design Decisions
//!
//! ## Security Boundaries Abort, Never Degrade
//!
//! Two checks are treated as hard boundaries: path containment (the config
//! name and every copied asset entry must stay inside their base
//! directories) and link safety (every `href` must carry an allow-listed
//! scheme). A violation fails the build. The one deliberate exception is
//! asset entries with unsafe *names*, which are skipped with a warning so a
//! single stray file cannot brick a site — skipped, not copied unchecked.
//!
//! ## Escaping Is Declared Per Slot
//!
//! The template is plain HTML with `{{TOKEN}}` markers. Each token is
//! backed by a slot that declares its encoding: HTML-escaped text or
//! attribute, JSON string literal, verbatim CSS, or pre-rendered fragment.
//! Substitution is a single pass, so slot values containing other tokens
//! are never re-expanded. Theme and background values are verbatim CSS by
//! design — the config is operator-authored, and escaping would break
//! gradient syntax.
//!
//! ## Deterministic Output
//!
//! Building the same config twice produces byte-identical files. The QR
//! renderer writes module pixels only (no metadata), and nothing in the
//! pipeline embeds timestamps. Deploys can rsync with checksums and get
//! clean no-op pushes.

pub mod assets;
pub mod build;
pub mod config;
pub mod fonts;
pub mod output;
pub mod paths;
pub mod qr;
pub mod render;
pub mod sanitize;

#[cfg(test)]
pub(crate) mod test_helpers;
