// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info, warn};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use multi_translate::app_config::{self, Config, ProviderKind};
use multi_translate::key_store::ApiKeyStore;
use multi_translate::ocr::GoogleVision;
use multi_translate::providers;
use multi_translate::translation::{HighQualityTranslation, TranslationOrchestrator, TranslationRequest};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate text with every configured provider and keep the best result
    Translate(TranslateArgs),

    /// Extract text from an image and translate it
    Ocr(OcrArgs),

    /// Manage stored API keys
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },

    /// Show configured providers and whether they have a usable key
    Providers,

    /// Generate shell completions for multi-translate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Text to translate; read from stdin when omitted or '-'
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Source language code (e.g., 'en', 'auto')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'zh', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Domain or tone hint passed to LLM providers
    #[arg(long)]
    context: Option<String>,

    /// Use only the best provider, without glossary or ranking
    #[arg(long)]
    fast: bool,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct OcrArgs {
    /// Image file to read
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// Source language code (e.g., 'en', 'auto')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'zh', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Print the extracted text without translating it
    #[arg(short, long)]
    extract_only: bool,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum KeysAction {
    /// Store a key (provider name or 'googleVision')
    Set {
        name: String,
        key: String,
    },
    /// Remove a stored key
    Remove {
        name: String,
    },
    /// List stored keys, masked
    List,
    /// Print the key store location
    Path,
}

/// multi-translate - high-quality translation through several providers
///
/// Sends text to DeepL, OpenAI, Microsoft Translator and Google Cloud
/// Translation at once, protects domain terminology and keeps the best answer.
#[derive(Parser, Debug)]
#[command(name = "multi-translate")]
#[command(version)]
#[command(about = "Multi-provider translation with quality ranking")]
#[command(long_about = "multi-translate sends text to several translation providers concurrently and ranks the answers.

EXAMPLES:
    multi-translate translate \"Hello world\" -t zh          # Best of all configured providers
    multi-translate translate --fast -s en -t fr \"Hello\"   # Single best provider only
    echo \"machine learning\" | multi-translate translate     # Read text from stdin
    multi-translate ocr scan.png -t en                     # Translate the text in an image
    multi-translate keys set deepl <KEY>                   # Store an API key
    multi-translate providers                              # Show which providers are usable
    multi-translate completions bash > multi-translate.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. API keys saved with 'keys set' override the
    keys in conf.json.

SUPPORTED PROVIDERS:
    deepl       - DeepL API (quality 95)
    openai      - OpenAI chat completions (quality 92)
    microsoft   - Microsoft Translator (quality 90)
    googleCloud - Google Cloud Translation (quality 88)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Key store path (defaults to the user configuration directory)
    #[arg(long, global = true, env = "MULTI_TRANSLATE_KEYS")]
    keys_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
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

    // @returns: Emoji and ANSI colour for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => ("", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, colour) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", colour, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept everything here; the effective level is applied through set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(*shell, &mut cmd, "multi-translate", &mut std::io::stdout());
            Ok(())
        }
        Commands::Keys { action } => run_keys(&cli, action),
        Commands::Providers => {
            let config = load_config(&cli)?;
            print_providers(&config);
            Ok(())
        }
        Commands::Translate(args) => run_translate(&cli, args).await,
        Commands::Ocr(args) => run_ocr(&cli, args).await,
    }
}

fn open_key_store(cli: &CommandLineOptions) -> Result<ApiKeyStore> {
    match &cli.keys_path {
        Some(path) => ApiKeyStore::open(path.clone()),
        None => ApiKeyStore::open_default(),
    }
}

/// Load conf.json, overlay stored keys and validate
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(Path::new(&cli.config_path))?;

    if let Some(level) = &cli.log_level {
        config.log_level = level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let store = open_key_store(cli)?;
    store.apply_to(&mut config);

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

fn run_keys(cli: &CommandLineOptions, action: &KeysAction) -> Result<()> {
    let mut store = open_key_store(cli)?;

    match action {
        KeysAction::Set { name, key } => {
            let stored = store.set(name, key.clone())?;
            store.save()?;
            info!("Saved API key for '{}' to {}", stored, store.path().display());
        }
        KeysAction::Remove { name } => {
            if store.remove(name)? {
                store.save()?;
                info!("Removed API key '{}'", name);
            } else {
                warn!("No API key stored for '{}'", name);
            }
        }
        KeysAction::List => {
            if store.is_empty() {
                println!("No API keys stored in {}", store.path().display());
            }
            for (name, masked) in store.masked_entries() {
                println!("{:<14} {}", name, masked);
            }
        }
        KeysAction::Path => println!("{}", store.path().display()),
    }

    Ok(())
}

fn print_providers(config: &Config) {
    for kind in ProviderKind::ALL {
        match config.provider_config(kind) {
            Some(provider) => println!(
                "{:<14} quality {:>5.1}  {}",
                provider.provider_type.display_name(),
                provider.effective_quality(),
                if provider.has_usable_key() { "ready" } else { "no API key" }
            ),
            None => println!("{:<14} not configured", kind.display_name()),
        }
    }
    println!(
        "{:<14} {}",
        "Google Vision",
        if config.ocr.has_usable_key() { "ready" } else { "no API key" }
    );
}

fn read_input_text(text: &Option<String>) -> Result<String> {
    match text.as_deref() {
        Some("-") | None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read text from stdin")?;
            Ok(buffer)
        }
        Some(text) => Ok(text.to_string()),
    }
}

async fn run_translate(cli: &CommandLineOptions, args: &TranslateArgs) -> Result<()> {
    let config = load_config(cli)?;
    let text = read_input_text(&args.text)?;

    let source = args.source_language.clone().unwrap_or_else(|| config.source_language.clone());
    let target = args.target_language.clone().unwrap_or_else(|| config.target_language.clone());
    multi_translate::validate_language_code(&source)?;
    multi_translate::validate_language_code(&target)?;

    let mut request = TranslationRequest::new(text, source, target);
    if let Some(context) = &args.context {
        request = request.with_context(context.clone());
    }

    let orchestrator = TranslationOrchestrator::from_config(&config)?;

    if args.fast {
        let fast = orchestrator.translate_fast(&request, &config.providers).await?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&fast)?);
        } else {
            println!("{}", fast.result.translated_text);
            info!("{} in {} ms", fast.result.provider_name, fast.elapsed_ms);
        }
        return Ok(());
    }

    let translation = orchestrator.translate_high_quality(&request, &config.providers).await?;
    print_translation(&translation, args.json)
}

async fn run_ocr(cli: &CommandLineOptions, args: &OcrArgs) -> Result<()> {
    let config = load_config(cli)?;
    let image = std::fs::read(&args.image)
        .context(format!("Failed to read image: {}", args.image.display()))?;

    let extractor = GoogleVision::new(config.ocr.clone(), providers::build_http_client());

    if args.extract_only {
        use multi_translate::ocr::TextExtractor;
        let text = extractor
            .extract_text(&image)
            .await
            .map_err(|e| anyhow!("OCR failed: {}", e))?;
        println!("{}", text);
        return Ok(());
    }

    let source = args.source_language.clone().unwrap_or_else(|| config.source_language.clone());
    let target = args.target_language.clone().unwrap_or_else(|| config.target_language.clone());

    let orchestrator = TranslationOrchestrator::from_config(&config)?;
    let result = orchestrator
        .translate_image(&image, &source, &target, &extractor, &config.providers)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    debug!("Extracted text: {}", result.extracted_text);
    print_translation(&result.translation, false)
}

fn print_translation(translation: &HighQualityTranslation, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(translation)?);
        return Ok(());
    }

    println!("{}", translation.best.translated_text());
    info!(
        "Best: {} (score {:.1}) in {} ms",
        translation.best.provider_name(),
        translation.best.final_score,
        translation.diagnostics.elapsed_ms
    );

    for alternative in &translation.alternatives {
        info!(
            "Alternative: {} (score {:.1}): {}",
            alternative.provider_name(),
            alternative.final_score,
            alternative.translated_text()
        );
    }

    for error in &translation.diagnostics.errors {
        warn!("{}", error);
    }

    Ok(())
}
