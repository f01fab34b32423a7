//! Build orchestration.
//!
//! One-shot pipeline, strictly sequential — each step completes before the
//! next starts, and the first failure aborts the rest:
//!
//! ```text
//! 1. Validate the config name against the config root   (paths)
//! 2. Load and validate config.json                      (config)
//! 3. Render index.html in memory                        (render)
//! 4. Delete and recreate the output directory
//! 5. Copy <config>/assets/ into the output tree         (assets)
//! 6. Localize webfonts, if configured                   (fonts)
//! 7. Write index.html
//! 8. Write qrcode.png for the site URL                  (qr)
//! ```
//!
//! Rendering happens before the destructive reset on purpose: a bad link
//! must fail the build while the previous output is still intact. Partial
//! output from a failure after step 4 is accepted and not cleaned up.

use crate::{assets, config, fonts, output, paths, qr, render};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("invalid config name: {0}")]
    Path(#[from] paths::PathError),
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("render error: {0}")]
    Render(#[from] render::RenderError),
    #[error("asset copy error: {0}")]
    Copy(#[from] assets::CopyError),
    #[error("font localization error: {0}")]
    Fonts(#[from] fonts::FontError),
    #[error("QR code error: {0}")]
    Qr(#[from] qr::QrError),
    #[error("failed to read template {path}: {source}")]
    Template {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to reset output directory {path}: {source}")]
    OutputReset {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The built-in page template. Override per build with
/// [`BuildOptions::template`].
pub const DEFAULT_TEMPLATE: &str = include_str!("../static/template.html");

/// Inputs for one build invocation.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory holding per-site config folders.
    pub config_root: PathBuf,
    /// Site folder name under the config root. User input — validated
    /// before use.
    pub name: String,
    /// Output directory. Deleted and recreated on every build.
    pub output: PathBuf,
    /// Template file overriding [`DEFAULT_TEMPLATE`].
    pub template: Option<PathBuf>,
}

/// What a completed build produced.
#[derive(Debug)]
pub struct BuildReport {
    pub config_dir: PathBuf,
    pub links: usize,
    pub assets: Option<assets::CopyStats>,
    pub font_files: Option<usize>,
}

/// Run the full pipeline for one site.
pub fn build(options: &BuildOptions) -> Result<BuildReport, BuildError> {
    // 1. Admit the config name before touching anything else.
    let config_dir = locate_config_dir(&options.config_root, &options.name)?;

    // 2.
    let site = config::load_config(&config_dir)?;
    println!("{}", output::format_build_header(&config_dir));

    // 3.
    let template = match &options.template {
        Some(path) => fs::read_to_string(path).map_err(|source| BuildError::Template {
            path: path.clone(),
            source,
        })?,
        None => DEFAULT_TEMPLATE.to_string(),
    };
    let html = render::render_page(&template, &site)?;
    println!("{}", output::format_render_line(site.links.len()));

    // 4. Destructive: no backup, no merge with a previous build.
    if options.output.exists() {
        fs::remove_dir_all(&options.output).map_err(|source| BuildError::OutputReset {
            path: options.output.clone(),
            source,
        })?;
    }
    fs::create_dir_all(&options.output).map_err(|source| BuildError::OutputReset {
        path: options.output.clone(),
        source,
    })?;

    // 5.
    let assets_source = config_dir.join("assets");
    let copied = if assets_source.is_dir() {
        let stats = assets::copy_tree(&assets_source, &options.output.join("assets"))?;
        println!("{}", output::format_assets_line(&stats));
        Some(stats)
    } else {
        None
    };

    // 6.
    let font_files = match &site.fonts {
        Some(fonts_config) => {
            let localized = fonts::localize(fonts_config, &options.output.join("assets"))?;
            println!("{}", output::format_fonts_line(localized.files));
            Some(localized.files)
        }
        None => None,
    };

    // 7.
    let index_path = options.output.join("index.html");
    fs::write(&index_path, &html).map_err(|source| BuildError::Write {
        path: index_path,
        source,
    })?;

    // 8.
    qr::write_qr_png(&site.site_url, &options.output.join("qrcode.png"))?;
    println!("{}", output::format_build_footer(&options.output));

    Ok(BuildReport {
        config_dir,
        links: site.links.len(),
        assets: copied,
        font_files,
    })
}

/// Validate the config name and resolve the per-site directory.
fn locate_config_dir(config_root: &Path, name: &str) -> Result<PathBuf, BuildError> {
    paths::validate_relative(name)?;
    let dir = config_root.join(name);
    if !dir.is_dir() {
        return Err(config::ConfigError::NotFound(dir).into());
    }
    Ok(paths::resolve_under(config_root, name)?)
}
