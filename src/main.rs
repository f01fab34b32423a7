use clap::Parser;
use linkpage::build::{self, BuildOptions};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "linkpage", version)]
#[command(about = "Static site generator for link-in-bio landing pages")]
#[command(long_about = "\
Static site generator for link-in-bio landing pages

Each site lives in its own folder under the config directory:

  config/
  └── example/
      ├── config.json              # Profile, theme, and links
      └── assets/                  # Optional static files → dist/assets/

A build renders index.html from the built-in template (override with
--template), copies assets, localizes webfonts when the config asks for
them, and writes a QR code pointing at the site URL. The output directory
is deleted and recreated on every build.")]
struct Cli {
    /// Name of a site folder under the config directory
    config: String,

    /// Directory holding per-site config folders
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    /// Output directory (deleted and recreated on every build)
    #[arg(long, default_value = "dist")]
    output: PathBuf,

    /// HTML template to use instead of the built-in one
    #[arg(long)]
    template: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let options = BuildOptions {
        config_root: cli.config_dir,
        name: cli.config,
        output: cli.output,
        template: cli.template,
    };
    match build::build(&options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
