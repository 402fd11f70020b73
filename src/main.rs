// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use analysis::SessionState;
use app_config::{Config, LogLevel};
use app_controller::{ReadingController, SaveOutcome, ScreenPosition, SelectionEvent};

mod analysis;
mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod providers;
mod vocabulary;
mod word_key;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up a word and show its meaning and usage
    Lookup(LookupArgs),

    /// Manage the saved vocabulary
    Vocab {
        #[command(subcommand)]
        action: VocabAction,
    },

    /// Generate shell completions for lexiread
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct LookupArgs {
    /// The word to analyze
    #[arg(value_name = "WORD")]
    word: String,

    /// Surrounding text the word was read in
    #[arg(short = 'x', long, default_value = "")]
    context: String,

    /// Run the deeper etymology/usage analysis instead of the quick lookup
    #[arg(short, long)]
    deep: bool,

    /// Save the analyzed word to the vocabulary on success
    #[arg(short, long)]
    save: bool,
}

#[derive(Subcommand, Debug)]
enum VocabAction {
    /// List saved words, most recently added first
    List,

    /// Remove a word from the vocabulary
    Remove {
        /// The word to remove
        word: String,
    },

    /// Export the vocabulary as CSV
    Export {
        /// Directory to write the export into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
}

/// lexiread - Lexical companion for reading documents
///
/// Looks up words you select while reading, using pluggable analysis
/// providers, and keeps the ones you save in a persistent vocabulary.
#[derive(Parser, Debug)]
#[command(name = "lexiread")]
#[command(version = "1.0.0")]
#[command(about = "On-demand word analysis with a personal vocabulary")]
#[command(long_about = "lexiread analyzes words in their reading context using a configurable
provider (dictionary API, local Ollama server, or the Anthropic API) and
maintains a deduplicated, persisted vocabulary of saved words.

EXAMPLES:
    lexiread lookup whale                          # Quick definition
    lexiread lookup whale -x \"the whale breached\"  # Definition in context
    lexiread lookup whale --deep                   # Etymology/usage analysis
    lexiread lookup whale --save                   # Look up and save
    lexiread vocab list                            # Saved words, newest first
    lexiread vocab export -o ~/exports             # Write vocabulary CSV
    lexiread completions bash > lexiread.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config. If the config file doesn't exist,
    a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "lexiread", &mut std::io::stdout());
            Ok(())
        }
        command => {
            let mut config = Config::load_or_create(&cli.config_path)?;
            if let Some(level) = cli.log_level {
                config.log_level = level.into();
            }
            log::set_max_level(level_filter(config.log_level));

            match command {
                Commands::Lookup(args) => run_lookup(&config, args).await,
                Commands::Vocab { action } => run_vocab(&config, action).await,
                Commands::Completions { .. } => unreachable!("handled above"),
            }
        }
    }
}

async fn run_lookup(config: &Config, args: LookupArgs) -> Result<()> {
    let controller = ReadingController::new(config)?;

    let handle = if args.deep {
        controller
            .request_deep_context(&args.word, &args.context)
            .await
    } else {
        let event = SelectionEvent {
            raw_text: args.word.clone(),
            context: args.context.clone(),
            position: ScreenPosition::default(),
        };
        controller.handle_selection(&event).await
    };

    let Some(handle) = handle else {
        println!("\"{}\" is not a lookable word.", args.word);
        return Ok(());
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message("Analyzing...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    handle.await?;
    spinner.finish_and_clear();

    let state = if args.deep {
        controller.deep_state().await
    } else {
        controller.quick_state().await
    };

    match state {
        SessionState::Success { word, analysis, .. } => {
            println!("{}", word);
            println!("  Meaning: {}", analysis.meaning);
            println!("  Context: {}", analysis.context);

            if args.save {
                if args.deep {
                    println!("(--save applies to quick lookups; deep analyses are not saved)");
                } else {
                    match controller.save_current().await? {
                        SaveOutcome::Saved => {
                            println!("\"{}\" has been added to your vocabulary.", word)
                        }
                        SaveOutcome::AlreadyExists => {
                            println!("\"{}\" is already in your vocabulary.", word)
                        }
                    }
                }
            }
        }
        SessionState::Failed { word, error } => {
            println!("Failed to get word analysis for \"{}\": {}", word, error);
        }
        SessionState::Idle | SessionState::Loading { .. } => {
            // The lookup task completed, so neither state should remain
            println!("The lookup did not produce a result.");
        }
    }

    Ok(())
}

async fn run_vocab(config: &Config, action: VocabAction) -> Result<()> {
    let controller = ReadingController::new(config)?;

    match action {
        VocabAction::List => {
            let entries = controller.vocabulary().await;
            if entries.is_empty() {
                println!("No words yet.");
                return Ok(());
            }

            println!("{} saved words:", entries.len());
            for entry in entries {
                println!(
                    "  {}  ({})\n      {}",
                    entry.display_word,
                    entry.date_added.format("%Y-%m-%d"),
                    entry.definition
                );
            }
        }
        VocabAction::Remove { word } => {
            controller.remove_word(&word).await?;
            println!("\"{}\" has been removed from your vocabulary.", word);
        }
        VocabAction::Export { output_dir } => match controller.export_vocabulary(&output_dir).await? {
            Some(path) => println!("Vocabulary exported to {:?}.", path),
            None => println!("Nothing to export: the vocabulary is empty."),
        },
    }

    Ok(())
}
