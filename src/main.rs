//! incgraph CLI entry point

use clap::{Args, Parser, Subcommand};
use incgraph_core::Relation;
use incgraph_indexer::Settings;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "incgraph")]
#[command(about = "Visualize the #include graph of a C/C++ source tree", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML settings file; command line options override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan and serve the visualization
    Serve {
        #[command(flatten)]
        scan: ScanArgs,

        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Open the page in a browser once the server is up
        #[arg(short, long)]
        open: bool,

        /// Also write the graph JSON to this file
        #[arg(long)]
        write: Option<PathBuf>,
    },
    /// Scan and print the graph JSON (or write it to a file)
    Export {
        #[command(flatten)]
        scan: ScanArgs,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Scan and report what was found
    Index {
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// Show version
    Version,
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// The directories to look at
    directories: Vec<PathBuf>,

    /// Additional file (glob) patterns to look for
    #[arg(short = 'p', long = "pattern")]
    patterns: Vec<String>,

    /// An include path for headers to recognize
    #[arg(short = 'I', short_alias = 'i', long = "prefix")]
    prefixes: Vec<PathBuf>,

    /// Edge direction: includes or included-by
    #[arg(long)]
    relation: Option<Relation>,

    /// How many trailing directories form a node's group
    #[arg(long)]
    group_granularity: Option<usize>,

    /// Label nodes with their full path
    #[arg(long)]
    full_path: bool,

    /// Base RGB color, comma separated
    #[arg(long)]
    colors: Option<String>,

    /// Random variation in RGB around the base color
    #[arg(long)]
    color_variation: Option<u32>,

    /// Minimum alpha value for node colors
    #[arg(long)]
    color_alpha_min: Option<f64>,

    /// Seed for colors and initial placement
    #[arg(long)]
    seed: Option<u64>,

    /// Skip files excluded by .gitignore/.ignore and hidden entries
    #[arg(long)]
    respect_ignore: bool,
}

impl ScanArgs {
    /// Layer command line values over file settings: lists extend, scalars replace.
    fn apply(self, settings: &mut Settings) {
        let scan = &mut settings.scan;
        scan.roots.extend(self.directories);
        scan.patterns.extend(self.patterns);
        scan.prefixes.extend(self.prefixes);
        scan.respect_ignore_files |= self.respect_ignore;

        let graph = &mut settings.graph;
        if let Some(relation) = self.relation {
            graph.relation = relation;
        }
        if let Some(granularity) = self.group_granularity {
            graph.group_granularity = granularity;
        }
        graph.full_path |= self.full_path;
        if let Some(colors) = self.colors {
            graph.colors = colors;
        }
        if let Some(variation) = self.color_variation {
            graph.color_variation = variation;
        }
        if let Some(alpha_min) = self.color_alpha_min {
            graph.color_alpha_min = alpha_min;
        }
        if self.seed.is_some() {
            graph.seed = self.seed;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries exported JSON
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("incgraph={}", log_level)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut settings = commands::load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve {
            scan,
            port,
            host,
            open,
            write,
        } => {
            scan.apply(&mut settings);
            commands::serve(settings, host, port, open, write).await
        }
        Commands::Export { scan, output } => {
            scan.apply(&mut settings);
            commands::export(settings, output)
        }
        Commands::Index { scan } => {
            scan.apply(&mut settings);
            commands::index(settings)
        }
        Commands::Version => {
            println!("incgraph v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
