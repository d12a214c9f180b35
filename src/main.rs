//! tts-lang-it CLI
//!
//! Command-line access to the POS sequence validator and the selection
//! prosody feature

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tts_lang_it::{
    config::TaggerConfig,
    prosody::{classify_document, Document, Endtones, CATEGORY_NAMES},
    text::PosSequenceValidator,
    Config, Error, Result,
};

#[derive(Parser)]
#[command(
    name = "tts-lang-it",
    about = "Italian POS sequence validation and prosody features for TTS",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a label is admissible for one token of a sequence
    Validate {
        /// Input tokens (one per tagging position)
        #[arg(short, long, num_args = 1.., required = true)]
        tokens: Vec<String>,

        /// Zero-based position of the token to label
        #[arg(short, long, default_value = "0")]
        position: usize,

        /// Candidate label
        #[arg(short, long)]
        label: String,

        /// General tag dictionary (`token TAG1 TAG2 ...`)
        #[arg(long)]
        tag_dict: Option<PathBuf>,

        /// Deterministic symbols dictionary (`LABEL token1 token2 ...`)
        #[arg(long)]
        det_dict: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Compute the selection prosody of every syllable in a document
    Classify {
        /// Document file (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        document: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate default configuration file
    InitConfig {
        /// Output path for config file
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },

    /// Show version and feature value table
    Info,
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.validate()?;
    Ok(config)
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            tokens,
            position,
            label,
            tag_dict,
            det_dict,
            config,
        } => {
            let cfg = load_config(config)?;
            let tagger = TaggerConfig {
                tag_dictionary: tag_dict.or(cfg.tagger.tag_dictionary),
                deterministic_dictionary: det_dict.or(cfg.tagger.deterministic_dictionary),
            };

            if position >= tokens.len() {
                return Err(Error::Config(format!(
                    "Position {} is outside the {} input tokens",
                    position,
                    tokens.len()
                )));
            }

            let validator = PosSequenceValidator::from_config(&tagger)?;
            log::info!("Token: {}", tokens[position]);
            log::info!("Label: {}", label);

            if validator.is_valid(position, tokens.as_slice(), &[], &label) {
                println!("valid");
            } else {
                println!("invalid");
            }
        }

        Commands::Classify { document, config } => {
            let cfg = load_config(config)?;
            let doc = if is_json(&document) {
                Document::load_json(&document)?
            } else {
                Document::load(&document)?
            };
            log::info!(
                "Classifying {} syllables in {} sentences",
                doc.syllable_count(),
                doc.sentences.len()
            );

            let endtones = Endtones::from_config(&cfg.prosody);
            for (target, category) in classify_document(&doc, &endtones) {
                println!("{}\t{}\t{}", target.phone, category.code(), category);
            }
        }

        Commands::InitConfig { output } => {
            log::info!("Creating default configuration...");

            Config::create_default(&output)?;

            println!("✓ Configuration saved to: {}", output.display());
        }

        Commands::Info => {
            println!("tts-lang-it - Italian linguistic plugins for TTS");
            println!("================================================");
            println!("Version: {}", tts_lang_it::VERSION);
            println!();
            println!("Feature: {}", tts_lang_it::SELECTION_PROSODY_FEATURE);
            for (code, name) in CATEGORY_NAMES.iter().enumerate() {
                println!("  {}  {}", code, name);
            }
        }
    }

    Ok(())
}
