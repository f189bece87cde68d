use anyhow::Context;
use clap::Parser;
use quire::{BookSpec, BookSpecBuilder, Pipeline};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "quire",
    version,
    about = "Assemble a manuscript from scene fragments",
    long_about = "Assemble a manuscript from many small text fragments.\n\n\
    The book is described by a YAML file listing sections, chapters and \
    scenes, each scene being an ordered list of source files. Any level \
    can write its own output file and number its paragraphs.\n\n\
    USAGE EXAMPLES:\n  \
      # Build the book described by book.yaml\n  \
      quire --config book.yaml\n\n  \
      # Override the manuscript path and number paragraphs\n  \
      quire --config book.yaml --output draft.md --number-paragraphs\n\n  \
      # Also write word statistics\n  \
      quire --config book.yaml --summary stats.yaml"
)]
struct Cli {
    /// Path to the book configuration file
    #[arg(short, long, value_name = "FILE", env = "QUIRE_CONFIG")]
    config: PathBuf,

    /// Manuscript output file (overrides output_filename)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Summary report file (overrides summary_filename)
    #[arg(short, long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Number paragraphs in the manuscript output
    #[arg(short, long)]
    number_paragraphs: bool,

    /// Strip [[wiki link]] markup from source fragments
    #[arg(long)]
    strip_wiki_links: bool,

    /// Don't print the build summary
    #[arg(short, long)]
    quiet: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose)?;

    let loaded = BookSpec::from_file(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    let mut builder = BookSpecBuilder::from_spec(loaded);
    if let Some(output) = cli.output {
        builder = builder.output_filename(output);
    }
    if let Some(summary) = cli.summary {
        builder = builder.summary_filename(summary);
    }
    if cli.number_paragraphs {
        builder = builder.number_paragraphs(true);
    }
    if cli.strip_wiki_links {
        builder = builder.strip_wiki_links(true);
    }

    let spec = builder.build().context("Invalid book configuration")?;

    let stats = Pipeline::new(spec)
        .context("Failed to create pipeline")?
        .run()
        .context("Manuscript assembly failed")?;

    if !cli.quiet {
        stats.print_summary();
    }

    Ok(())
}

fn setup_tracing(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("quire=info"),
        1 => EnvFilter::new("quire=debug"),
        _ => EnvFilter::new("quire=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
