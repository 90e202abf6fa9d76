use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use rand::{SeedableRng, rngs::StdRng};
use textrain_config::Config;
use textrain_core::{Dimensions, RainPalette};

mod app;
mod logging;
mod menu;
mod source;

use app::App;
use source::{DocumentLibrary, TextSource};

/// Matrix-style character rain made from the text of a document.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Document to animate right away, skipping the list.
    document: Option<String>,

    /// Seed for the random generator, for repeatable runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Color palette: matrix, rainbow, amber or ice.
    #[arg(long)]
    palette: Option<RainPalette>,

    /// Print the available documents and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .wrap_err("failed to load configuration")?;

    let library = DocumentLibrary::standard(config.documents_dir.as_deref());
    if cli.list {
        for name in library.list_documents() {
            println!("{name}");
        }
        return Ok(());
    }

    logging::init();

    let palette = cli.palette.unwrap_or(config.palette);
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (width, height) = crossterm::terminal::size()?;
    let dims = Dimensions::new(width, height);
    tracing::debug!(?palette, width, height, "starting");

    let app = match &cli.document {
        Some(document) => App::with_document(
            Box::new(library),
            palette,
            rng,
            dims,
            document,
            Instant::now(),
        ),
        None => App::new(Box::new(library), palette, rng, dims),
    };

    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from(["textrain", "--seed", "9", "--palette", "ice", "raven.txt"]);
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.palette, Some(RainPalette::Ice));
        assert_eq!(cli.document.as_deref(), Some("raven.txt"));
        assert!(!cli.list);
    }

    #[test]
    fn test_cli_rejects_unknown_palette() {
        assert!(Cli::try_parse_from(["textrain", "--palette", "plaid"]).is_err());
    }
}
