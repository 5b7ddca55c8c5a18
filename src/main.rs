use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use tracing::{info, Level};

use circuit_diagrams::{
    diagrams::{self, Diagram},
    draw::DrawSpec,
};

#[derive(Parser, Debug)]
#[command(name = "circuit-diagrams", version, about = "Render the documentation's circuit diagrams to SVG")]
struct Cli {
    /// Log more; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render diagrams as `<name>.svg` files.
    Render(RenderArgs),
    /// Print the file name of every diagram.
    List,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Output directory.
    #[arg(long, default_value = "assets")]
    out: PathBuf,

    /// Render only the named diagrams.
    #[arg(long, num_args = 1..)]
    only: Vec<String>,

    /// JSON file overriding the default drawing style.
    #[arg(long)]
    style: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::List => {
            diagrams::all().iter().for_each(|d| println!("{}", d.file_name()));
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn selected(only: &[String]) -> anyhow::Result<Vec<Diagram>> {
    if only.is_empty() {
        return Ok(diagrams::all());
    }
    only.iter()
        .map(|name| diagrams::find(name).with_context(|| format!("no diagram named '{name}' (see `list`)")))
        .collect()
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let spec = match &args.style {
        Some(path) => DrawSpec::load(path).with_context(|| format!("read style '{}'", path.display()))?,
        None => DrawSpec::default(),
    };

    let chosen = selected(&args.only)?;
    for diagram in &chosen {
        let path = args.out.join(diagram.file_name());
        let drawing = diagram.render(&spec).with_context(|| format!("draw '{}'", diagram.name))?;
        drawing.save(&path).with_context(|| format!("write '{}'", path.display()))?;
    }
    info!(count = chosen.len(), out = %args.out.display(), "rendered");
    Ok(())
}
