//! glueop CLI - Companion for the IT Glue documentation platform

use clap::{CommandFactory, Parser};

mod cli;
mod client;
mod config;
mod error;
mod output;

use cli::{AssetCommands, Cli, Commands, ConfigCommands, GlobalOptions, OrgCommands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

/// Logging is best-effort: a sink that fails to initialize must never
/// abort an operation.
fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    if debug {
        builder.filter_module("glueop", log::LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("glueop version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Org(org_cmd) => match org_cmd {
            OrgCommands::List { filters, pagination } => {
                cli::org::list(&opts, &filters, &pagination).await
            }
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::List { filters, pagination } => {
                cli::configuration::list(&opts, &filters, &pagination).await
            }
        },
        Commands::Asset(asset_cmd) => match asset_cmd {
            AssetCommands::List {
                type_id,
                filters,
                pagination,
            } => cli::asset::list(&opts, type_id, &filters, &pagination).await,
            AssetCommands::Get { id } => cli::asset::get(&opts, id).await,
            AssetCommands::Create {
                type_id,
                org_id,
                traits,
            } => cli::asset::create(&opts, type_id, org_id, &traits).await,
            AssetCommands::Update { id, traits } => cli::asset::update(&opts, id, &traits).await,
            AssetCommands::Delete { id, yes } => cli::asset::delete(&opts, id, yes).await,
        },
        Commands::Completion { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "glueop", &mut std::io::stdout());
            Ok(())
        }
    }
}
