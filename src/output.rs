//! CLI output formatting.
//!
//! Format functions are pure — they return strings and have no side
//! effects — so tests can assert on exact output. Callers (the build
//! orchestrator) decide when to print.

use crate::assets::CopyStats;
use std::path::Path;

/// Header line announcing which config folder a build uses.
pub fn format_build_header(config_dir: &Path) -> String {
    format!("==> Building from {}", config_dir.display())
}

/// Summary line for the rendered page.
pub fn format_render_line(link_count: usize) -> String {
    format!("Rendered index.html with {} {}", link_count, plural(link_count, "link"))
}

/// Summary line for the asset copy step.
pub fn format_assets_line(stats: &CopyStats) -> String {
    let copied = format!("Copied {} asset {}", stats.files, plural(stats.files, "file"));
    if stats.skipped == 0 {
        copied
    } else {
        format!(
            "{copied} (skipped {} unsafe {})",
            stats.skipped,
            plural(stats.skipped, "entry")
        )
    }
}

/// Summary line for the font localization step.
pub fn format_fonts_line(files: usize) -> String {
    format!(
        "Localized {} font {} → assets/fonts.css",
        files,
        plural(files, "file")
    )
}

/// Final line of a successful build.
pub fn format_build_footer(output_dir: &Path) -> String {
    format!("==> Build complete: {}", output_dir.display())
}

fn plural(count: usize, noun: &str) -> String {
    match (count, noun) {
        (1, _) => noun.to_string(),
        (_, "entry") => "entries".to_string(),
        _ => format!("{noun}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_line_pluralizes() {
        assert_eq!(format_render_line(1), "Rendered index.html with 1 link");
        assert_eq!(format_render_line(3), "Rendered index.html with 3 links");
    }

    #[test]
    fn assets_line_mentions_skips_only_when_present() {
        let clean = CopyStats { files: 2, skipped: 0 };
        assert_eq!(format_assets_line(&clean), "Copied 2 asset files");

        let dirty = CopyStats { files: 2, skipped: 1 };
        assert_eq!(
            format_assets_line(&dirty),
            "Copied 2 asset files (skipped 1 unsafe entry)"
        );
    }

    #[test]
    fn fonts_line_counts_files() {
        assert_eq!(
            format_fonts_line(2),
            "Localized 2 font files → assets/fonts.css"
        );
    }
}
