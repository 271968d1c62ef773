// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use lingway::app_config::{self, Config, LogLevel};
use lingway::gateway::Gateway;
use lingway::language_utils;

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

fn level_filter(level: &LogLevel) -> LevelFilter {
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
    /// Translate text through the provider chain (default command)
    Translate(TranslateArgs),

    /// Generate shell completions for lingway
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Text to translate
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Source language code (e.g. 'en'), or 'auto' to let the chain decide
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'ru', 'es')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Translate every non-empty line of a file instead of TEXT
    #[arg(short = 'F', long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// lingway - a resilient translation gateway
///
/// Translates text by falling through a chain of free providers (Lingva,
/// MyMemory, a Google web fallback) while pacing requests to stay under
/// every provider's rate limits.
#[derive(Parser, Debug)]
#[command(name = "lingway")]
#[command(version = "1.0.0")]
#[command(about = "Resilient multi-provider text translation")]
#[command(long_about = "lingway translates text through an ordered chain of free translation \
providers, serializing all network work through one queue so no provider ever sees a burst.

EXAMPLES:
    lingway \"hello world\" -t ru              # Translate to Russian, auto-detect source
    lingway -s en -t es \"good morning\"       # Explicit source language
    lingway -F phrases.txt -t de              # Translate every line of a file
    lingway --log-level debug \"bonjour\" -t en
    lingway completions bash > lingway.bash   # Generate bash completions

CONFIGURATION:
    Configuration lives in conf.json (or the platform config directory).
    If the config file does not exist, a default one is created.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Text to translate
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Source language code (e.g. 'en'), or 'auto' to let the chain decide
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'ru', 'es')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Translate every non-empty line of a file instead of TEXT
    #[arg(short = 'F', long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config_path: Option<PathBuf>,

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

    // @returns: ANSI color code for log level
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
            let _ = writeln!(stderr, "{}{} {:5} {}\x1B[0m", color, now, record.level(), record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default;
    // the level is updated after the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "lingway", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            run_translate(TranslateArgs {
                text: cli.text,
                source_language: cli.source_language,
                target_language: cli.target_language,
                file: cli.file,
                config_path: cli.config_path,
                log_level: cli.log_level,
            })
            .await
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&level));
    }

    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(app_config::default_config_path);

    let mut config = if config_path.exists() {
        Config::from_file(&config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path.display());
        let config = Config::default();
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context(format!("Failed to create config directory: {}", parent.display()))?;
            }
        }
        config.write_to(&config_path)?;
        config
    };

    // Override config with CLI options if provided
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let gateway = Gateway::new(&config);

    if let Some(file) = &options.file {
        return translate_file(&gateway, &config, file).await;
    }

    let text = options
        .text
        .ok_or_else(|| anyhow!("TEXT is required unless --file is specified"))?;

    let result = gateway
        .translate(&text, &config.source_language, &config.target_language)
        .await
        .map_err(|e| anyhow!("{}", e))?;

    if result.success {
        if let Some(detected) = &result.detected_lang {
            let name = language_utils::language_name(detected).unwrap_or("unknown");
            info!("Translated by {} (detected source: {})", result.service, name);
        } else {
            info!("Translated by {}", result.service);
        }
        println!("{}", result.text);
        Ok(())
    } else {
        Err(anyhow!(
            "Translation failed: {}",
            result.error.unwrap_or_else(|| "unknown error".to_string())
        ))
    }
}

// Translate every non-empty line of a file; the gateway queue serializes
// the actual provider work, so lines resolve in submission order.
async fn translate_file(gateway: &Gateway, config: &Config, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read input file: {}", path.display()))?;
    let lines: Vec<&str> = content.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    if lines.is_empty() {
        warn!("No non-empty lines found in {}", path.display());
        return Ok(());
    }

    info!("Translating {} lines from {}", lines.len(), path.display());

    let progress = ProgressBar::new(lines.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let results = join_all(lines.iter().map(|line| {
        let progress = progress.clone();
        async move {
            let result = gateway
                .translate(line, &config.source_language, &config.target_language)
                .await;
            progress.inc(1);
            result
        }
    }))
    .await;

    progress.finish_and_clear();

    let mut failures = 0usize;
    for (line, result) in lines.iter().zip(results) {
        match result {
            Ok(result) if result.success => println!("{}\t{}", line, result.text),
            Ok(result) => {
                failures += 1;
                warn!(
                    "'{}' failed: {}",
                    line,
                    result.error.unwrap_or_else(|| "unknown error".to_string())
                );
            }
            Err(e) => {
                failures += 1;
                warn!("'{}' rejected: {}", line, e);
            }
        }
    }

    let (hits, misses, hit_rate) = gateway.cache().stats();
    info!(
        "Done: {} translated, {} failed (cache: {} hits / {} misses, {:.0}% hit rate)",
        lines.len() - failures,
        failures,
        hits,
        misses,
        hit_rate * 100.0
    );

    if failures > 0 {
        return Err(anyhow!("{} lines failed to translate", failures));
    }
    Ok(())
}
