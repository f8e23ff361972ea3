mod lexicon;
mod score;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::lexicon::LexiconCommands;

#[derive(Debug, Parser)]
#[command(name = "veta")]
#[command(about = "Score emotional-awareness survey answers against a lexicon")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score a JSON survey and print per-subject results
    Score {
        /// Survey document: `{"subjects": [{"userid": .., "responses": [{"self": .., "other": ..}]}]}`
        input: PathBuf,

        /// Lexicon file (json, yaml or txt); defaults to `VETA_LEXICON_PATH`
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// YAML scoring plan; defaults to `VETA_PLAN_PATH`, then the standard plan
        #[arg(long)]
        plan: Option<PathBuf>,

        /// Write results here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Parallel scoring workers; defaults to `VETA_WORKERS`
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Inspect or convert lexicon files
    Lexicon {
        #[command(subcommand)]
        command: LexiconCommands,
    },
    /// List the protocol ids a plan produces
    Protocols {
        /// YAML scoring plan; defaults to `VETA_PLAN_PATH`, then the standard plan
        #[arg(long)]
        plan: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = veta_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    let cli = Cli::parse();
    match cli.command {
        Commands::Score {
            input,
            lexicon,
            plan,
            output,
            workers,
        } => {
            let options = score::ScoreOptions {
                input,
                lexicon: lexicon.or_else(|| config.lexicon_path.clone()),
                plan: plan.or_else(|| config.plan_path.clone()),
                output,
                workers: workers.unwrap_or(config.workers),
                language: config.language.clone(),
            };
            score::run_score(&options).await?;
        }
        Commands::Lexicon { command } => lexicon::run_lexicon(&command, &config)?,
        Commands::Protocols { plan } => {
            let plan = plan.or_else(|| config.plan_path.clone());
            let registry = score::build_registry(plan.as_deref())?;
            for protocol in registry.protocols() {
                let scope = match protocol.scope() {
                    veta_core::Scope::PerResponse => "per-response",
                    veta_core::Scope::PerSubject => "per-subject",
                };
                println!("{}\t{scope}", protocol.id());
            }
        }
    }

    Ok(())
}
