use clap::{Parser, ValueEnum};
use log::debug;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Instant;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum Format {
    /// Totals and criterion tables
    #[default]
    Text,
    /// Full result as pretty JSON
    Json,
    /// One criterion per line, tab-separated
    Tsv,
}

#[derive(Parser, Debug)]
#[command(name = "essay-grader")]
#[command(about = "Score a Portuguese argumentative essay on a 0-100 / 0-25 rubric", long_about = None)]
#[command(version)]
struct Cli {
    /// Essay file to grade ("-" or omitted reads standard input)
    file: Option<PathBuf>,

    /// Theme keywords, comma-separated (e.g. "inclusão digital,educação")
    #[arg(short, long, default_value = "")]
    keywords: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/essay-grader/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let start_time = Instant::now();

    // Load config
    let config = match essay_grader::config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate rubric at startup
    let rubric = config.rubric();
    if let Err(errors) = essay_grader::scoring::validate_rubric(&rubric) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let reads_stdin = cli.file.as_deref().map_or(true, |p| p == Path::new("-"));
    if reads_stdin && std::io::stdin().is_terminal() {
        eprintln!("Pipe the essay through standard input or pass a file path.");
        eprintln!("  essay-grader redacao.txt --keywords \"inclusão digital,educação\"");
        std::process::exit(EXIT_SUCCESS);
    }

    let essay = match essay_grader::input::read_essay(cli.file.as_deref()) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    if essay.trim().is_empty() {
        eprintln!("The essay is empty. Paste or pipe some text to grade.");
        std::process::exit(EXIT_INPUT);
    }

    let keywords = essay_grader::input::parse_keywords(&cli.keywords);
    debug!("Theme keywords: {:?}", keywords);

    let result = essay_grader::grade_with(&essay, &keywords, &rubric);

    let format = if cli.json { Format::Json } else { cli.format };
    match format {
        Format::Text => {
            let use_colors = !cli.no_color && essay_grader::output::should_use_colors();
            println!("{}", essay_grader::output::format_report(&result, use_colors));
        }
        Format::Json => match essay_grader::output::format_json(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize result: {}", e);
                std::process::exit(EXIT_INPUT);
            }
        },
        Format::Tsv => println!("{}", essay_grader::output::format_tsv(&result)),
    }

    debug!("Graded in {:?}", start_time.elapsed());
    std::process::exit(EXIT_SUCCESS);
}
