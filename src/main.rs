//! CLI entry point for blog-reader

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blog-reader")]
#[command(version)]
#[command(about = "A small blog reader for posts stored in Supabase", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Serve posts from a JSON fixture instead of Supabase
    #[arg(short, long, global = true)]
    fixture: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the reader server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// List posts, newest first
    List,

    /// Render one post as HTML to stdout
    Show {
        /// Post id
        id: i64,
    },

    /// Export a static snapshot of every page, linked with relative URLs
    Export {
        /// Output directory
        #[arg(short, long, default_value = "public")]
        output: PathBuf,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_reader=debug,info"
    } else {
        "blog_reader=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("resolving current directory")?,
    };

    let fixture = cli.fixture.as_deref();
    let load = || blog_reader::Reader::new(&base_dir, fixture);

    match cli.command {
        Commands::Serve { port, ip, open } => {
            let reader = load()?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            blog_reader::server::start(&reader, &ip, port, open).await?;
        }

        Commands::List => {
            let reader = load()?;
            blog_reader::commands::list::run(&reader).await?;
        }

        Commands::Show { id } => {
            let reader = load()?;
            blog_reader::commands::show::run(&reader, id).await?;
        }

        Commands::Export { output } => {
            let reader = load()?;
            let target_dir = if output.is_absolute() {
                output
            } else {
                base_dir.join(output)
            };
            tracing::info!("Exporting pages to {:?}", target_dir);
            let count = blog_reader::commands::export::run(&reader, &target_dir).await?;
            println!("Exported {} posts to {:?}", count, target_dir);
        }

        Commands::Version => {
            println!("blog-reader version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
