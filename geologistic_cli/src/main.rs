use clap::{Parser, Subcommand};

mod build_day;
mod build_index;
mod consolidate;
mod generate;
mod route;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize per-day delivery orders plus the warehouse file
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: generate::GenerateArgs,
    },
    /// Union every per-day file into the silver dataset
    Consolidate {
        #[command(flatten)]
        args: consolidate::ConsolidateArgs,
    },
    /// Compute one day's delivery sequence and render its map page
    Route {
        #[command(flatten)]
        args: route::RouteArgs,
    },
    /// Publish one day under the site root and record it in the manifest
    BuildDay {
        #[command(flatten)]
        args: build_day::BuildDayArgs,
    },
    /// Render the landing page from the publish manifest
    BuildIndex {
        #[command(flatten)]
        args: build_index::BuildIndexArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Generate { args } => generate::run(args)?,
        Commands::Consolidate { args } => consolidate::run(args)?,
        Commands::Route { args } => route::run(args).await?,
        Commands::BuildDay { args } => build_day::run(args).await?,
        Commands::BuildIndex { args } => build_index::run(args)?,
    }

    Ok(())
}
