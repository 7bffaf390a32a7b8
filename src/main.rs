// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use srtlingo::app_config::{Config, LogLevel, TranslationProvider};
use srtlingo::caption::{self, Caption};
use srtlingo::file_utils::FileManager;
use srtlingo::translation::{TranslationMode, Translator};
use srtlingo::{AppError, SrtParser};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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

/// Output rendering
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    /// JSON array of {start_time, end_time, text}
    Json,
    /// SubRip, renumbered from 1
    Srt,
    /// Caption texts separated by blank lines
    Text,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Srt => "srt",
            Self::Text => "txt",
        }
    }

    fn render(self, captions: &[Caption]) -> Result<String> {
        Ok(match self {
            Self::Json => serde_json::to_string_pretty(captions).context("Failed to serialize captions")?,
            Self::Srt => caption::to_srt(captions),
            Self::Text => {
                let texts: Vec<&str> = captions.iter().map(|c| c.text()).collect();
                texts.join("\n\n")
            }
        })
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse (and optionally translate) SubRip files
    #[command(alias = "p")]
    Parse(ParseArgs),

    /// Generate shell completions for srtlingo
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ParseArgs {
    /// Input .srt file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Output file (single input only); stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Translation requests in flight (1 = strictly one at a time)
    #[arg(long)]
    concurrency: Option<usize>,

    /// Reject captions whose start time is not before their end time
    #[arg(long)]
    validate_time_order: bool,

    /// Use the mock translator instead of the configured backend
    #[arg(long)]
    dry_run: bool,
}

/// srtlingo - SubRip parser with optional translation
#[derive(Parser, Debug)]
#[command(name = "srtlingo")]
#[command(version)]
#[command(about = "Parse SubRip subtitles and optionally translate them")]
#[command(long_about = "srtlingo parses SubRip (.srt) files into captions and can translate each caption through a configured backend.

EXAMPLES:
    srtlingo parse movie.srt                         # Print captions as JSON
    srtlingo parse -f srt -s en -t fr movie.srt      # Translate English to French, print SRT
    srtlingo parse -s en -t de --dry-run movie.srt   # Exercise translation with the mock backend
    srtlingo parse -f text -o out.txt movie.srt      # Write caption text to a file
    srtlingo parse -s en -t es /subs/                # Translate every .srt under a directory
    srtlingo completions bash > srtlingo.bash        # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created. Both a source and a target language are needed
    for translation; with only one, captions are returned untranslated.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
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
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
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
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "srtlingo", &mut std::io::stdout());
            Ok(())
        }
        Commands::Parse(args) => run_parse(args).await,
    }
}

async fn run_parse(options: ParseArgs) -> Result<()> {
    if let Some(level) = options.log_level {
        log::set_max_level(LogLevel::from(level).to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    // Command line wins over the config file
    if options.source_language.is_some() {
        config.source_language = options.source_language.clone();
    }
    if options.target_language.is_some() {
        config.target_language = options.target_language.clone();
    }
    if let Some(concurrency) = options.concurrency {
        config.translation.concurrent_requests = concurrency;
    }
    if options.validate_time_order {
        config.parsing.validate_time_order = true;
    }
    if options.dry_run {
        config.translation.provider = TranslationProvider::Mock;
    }
    if let Some(level) = options.log_level {
        config.log_level = level.into();
    }

    config.validate().context("Configuration validation failed")?;
    config.normalize_language_codes()?;
    log::set_max_level(config.log_level.to_level_filter());

    let translating = config.source_language.is_some() && config.target_language.is_some();
    let translator: Option<Arc<dyn Translator>> = if translating {
        info!(
            "Translating with {} ({} requests in flight)",
            config.translation.provider.display_name(),
            config.translation.concurrent_requests
        );
        let translator = config.translation.build_translator()?;
        translator
            .check_availability()
            .await
            .context("Translation backend is not available")?;
        Some(translator)
    } else {
        None
    };

    let input = &options.input_path;
    if input.is_dir() {
        if options.output.is_some() {
            return Err(anyhow!("--output cannot be used with a directory input"));
        }
        run_folder(input, &options, &config, translator).await
    } else {
        let captions = parse_file(input, &config, translator).await?;
        let rendered = options.format.render(&captions)?;
        match &options.output {
            Some(path) => {
                write_output(path, &rendered, options.force_overwrite)?;
                info!("Wrote {} captions to {:?}", captions.len(), path);
            }
            None => println!("{}", rendered),
        }
        Ok(())
    }
}

async fn run_folder(
    input_dir: &Path,
    options: &ParseArgs,
    config: &Config,
    translator: Option<Arc<dyn Translator>>,
) -> Result<()> {
    let files = FileManager::find_files(input_dir, "srt")?;
    let tag = config.target_language.as_deref().filter(|_| translator.is_some()).unwrap_or("parsed");
    let mut processed = 0;

    info!("Found {} subtitle files in {:?}", files.len(), input_dir);

    for file in &files {
        // Skip our own outputs from a previous run
        if file.file_stem().is_some_and(|stem| stem.to_string_lossy().ends_with(&format!(".{}", tag))) {
            continue;
        }

        let output_dir = file.parent().unwrap_or(Path::new("."));
        let output_path = FileManager::generate_output_path(file, output_dir, tag, options.format.extension());

        let result = async {
            let captions = parse_file(file, config, translator.clone()).await?;
            let rendered = options.format.render(&captions)?;
            write_output(&output_path, &rendered, options.force_overwrite)
        }
        .await;

        match result {
            Ok(()) => {
                processed += 1;
                info!("Success: {:?}", output_path);
            }
            Err(e) => error!("Error processing {:?}: {:#}", file, e),
        }
    }

    info!("Finished processing {} of {} files", processed, files.len());
    Ok(())
}

async fn parse_file(path: &Path, config: &Config, translator: Option<Arc<dyn Translator>>) -> Result<Vec<Caption>> {
    let mut parser = SrtParser::load_file(path)
        .map_err(AppError::from)?
        .with_options(config.parse_options());

    if let Some(translator) = translator {
        parser = parser.with_translator(translator);
    }

    if let TranslationMode::Concurrent { max_in_flight } = parser.options().translation_mode {
        info!("Up to {} translation requests will run concurrently", max_in_flight);
    }

    let captions = parser
        .parse(config.source_language.as_deref(), config.target_language.as_deref())
        .await
        .map_err(AppError::from)
        .with_context(|| format!("Failed to parse {:?}", path))?;

    if captions.is_empty() {
        warn!("No captions found in {:?}", path);
    }
    Ok(captions)
}

fn write_output(path: &Path, content: &str, force_overwrite: bool) -> Result<()> {
    if FileManager::file_exists(path) && !force_overwrite {
        return Err(anyhow!("Output file already exists: {:?}. Use --force-overwrite to replace it.", path));
    }
    FileManager::write_to_file(path, content)
}
