//! polish-check - design-token consistency checker for token-driven
//! CSS and bilingual static pages.

mod checks;
mod cli;
mod config;
mod css;
mod html;
mod report;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::PolishConfig;
use css::CssIndex;
use html::collect_html;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    match execute(root, &cli.config) {
        Ok((rendered, code)) => {
            print!("{rendered}");
            ExitCode::from(code)
        }
        Err(error) => {
            crate::log!("error"; "polish-check failed with error: {error:#}");
            ExitCode::from(1)
        }
    }
}

/// Run the full battery for one project root.
///
/// Returns the rendered report and the process exit code. An `Err`
/// here is a genuinely unexpected failure (unreadable source files,
/// malformed config); in-check problems surface as FAIL rows instead.
fn execute(root: &Path, config_file: &Path) -> Result<(String, u8)> {
    let config = PolishConfig::load(root, config_file)?;

    let index = CssIndex::build(config.read_css_sources(root)?);
    let html_files = collect_html(root, &config.sources.html)?;
    let parser = html::select_parser();
    crate::log!(
        "check";
        "checking {} css sources and {} html pages",
        index.sources().len(),
        html_files.len()
    );

    let results = checks::run_all(&index, &html_files, parser.as_ref());
    let rendered = report::render(&results, parser.is_heuristic());
    Ok((rendered, report::exit_code(&results) as u8))
}
