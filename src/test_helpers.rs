//! Shared test utilities.
//!
//! A canonical sample config (exercising every field, including a `fonts`
//! block) plus an on-disk site fixture for pipeline tests. The fixture
//! deliberately omits `fonts` so tests never touch the network.

use crate::config::SiteConfig;
use std::fs;
use tempfile::TempDir;

/// Full-featured config: gradient background, icon link, image link,
/// mailto link, fonts block. `https://doug.example` appears only as the
/// site URL so tests can rewrite it surgically.
pub const SAMPLE_CONFIG_JSON: &str = r##"{
  "siteUrl": "https://doug.example",
  "profile": {
    "name": "Doug",
    "bio": "I make things.",
    "avatar": "assets/avatar.jpg",
    "background": { "type": "gradient", "value": "linear-gradient(#333, #111)" },
    "theme": {
      "backgroundColor": "#1e1e2e",
      "buttonColor": "#313244",
      "buttonHoverColor": "#45475a",
      "buttonBorder": "1px solid #585b70",
      "textColor": "#cdd6f4",
      "fontFamily": "'Inter', sans-serif"
    }
  },
  "links": [
    { "url": "https://github.com/doug", "title": "GitHub", "icon": "fa-brands fa-github" },
    { "url": "https://photos.example.net/doug", "title": "Photos", "image": "assets/camera.png" },
    { "url": "mailto:doug@example.net", "title": "Email me", "icon": "fa-solid fa-envelope" }
  ],
  "fonts": { "family": "Inter", "weights": [400, 700] }
}"##;

/// Parse [`SAMPLE_CONFIG_JSON`].
pub fn sample_config() -> SiteConfig {
    serde_json::from_str(SAMPLE_CONFIG_JSON).expect("sample config must parse")
}

/// Write a buildable site fixture and return its root:
///
/// ```text
/// <tmp>/config/example/
/// ├── config.json      # no fonts block — builds must stay offline
/// └── assets/
///     ├── avatar.jpg
///     └── icons/camera.png
/// ```
pub fn write_site_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let site = tmp.path().join("config/example");
    fs::create_dir_all(site.join("assets/icons")).unwrap();
    let offline = SAMPLE_CONFIG_JSON.replace(
        ",\n  \"fonts\": { \"family\": \"Inter\", \"weights\": [400, 700] }",
        "",
    );
    assert!(
        !offline.contains("\"fonts\""),
        "fixture config must not enable font localization"
    );
    fs::write(site.join("config.json"), offline).unwrap();
    fs::write(site.join("assets/avatar.jpg"), b"jpeg bytes").unwrap();
    fs::write(site.join("assets/icons/camera.png"), b"png bytes").unwrap();
    tmp
}
