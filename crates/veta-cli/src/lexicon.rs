//! `veta lexicon` command handlers.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use veta_core::{AppConfig, Lexicon, Matcher};

/// Sub-commands available under `lexicon`.
#[derive(Debug, Subcommand)]
pub enum LexiconCommands {
    /// Load a lexicon, compile it and print a summary
    Check {
        /// Lexicon file (json, yaml or txt)
        path: PathBuf,
    },
    /// Normalize a lexicon and write it in the format of the output extension
    Convert {
        input: PathBuf,
        output: PathBuf,
    },
}

pub(crate) fn run_lexicon(command: &LexiconCommands, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        LexiconCommands::Check { path } => {
            let lexicon = load(path, &config.language)?;
            let summary = summarize(&lexicon);
            let matcher = Matcher::new(lexicon);
            matcher.compile()?;
            println!("{summary}");
        }
        LexiconCommands::Convert { input, output } => {
            let lexicon = load(input, &config.language)?;
            veta_core::save_lexicon(&lexicon, output)?;
            tracing::info!(input = %input.display(), output = %output.display(), entries = lexicon.len(), "lexicon converted");
            println!("wrote {} entries to {}", lexicon.len(), output.display());
        }
    }
    Ok(())
}

pub(crate) fn load(path: &Path, language: &str) -> anyhow::Result<Lexicon> {
    veta_core::load_lexicon(path, language)
        .map_err(|e| anyhow::anyhow!("failed to load lexicon {}: {e}", path.display()))
}

fn summarize(lexicon: &Lexicon) -> String {
    let mut levels: Vec<f64> = lexicon.entries().iter().map(|e| e.score).collect();
    levels.sort_by(f64::total_cmp);
    levels.dedup();
    let levels: Vec<String> = levels.iter().map(ToString::to_string).collect();
    format!(
        "{} by {} ({}): {} entries, score levels [{}]",
        lexicon.name(),
        lexicon.creator(),
        lexicon.language(),
        lexicon.len(),
        levels.join(", ")
    )
}
