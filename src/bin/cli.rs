// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! XML expression evaluator CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use xmlexpr::ast::{to_infix, Evaluator, UnknownLabelPolicy};
use xmlexpr::cli::{discover_expression_files, evaluate_batch, BatchSummary, Reporter, Session};
use xmlexpr::config::{Config, ErrorPolicy};
use xmlexpr::generator::{ExpressionGenerator, GeneratorConfig};
use xmlexpr::io;

#[derive(Parser)]
#[command(name = "xmlexpr")]
#[command(about = "Evaluate integer arithmetic expressions stored as XML trees", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ./xmlexpr.toml when present)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Keep going after a failed input instead of stopping
    #[arg(short, long, global = true)]
    keep_going: bool,

    /// Evaluate unknown labels as 0 instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    /// Maximum expression nesting
    #[arg(long, value_name = "N", global = true)]
    max_depth: Option<usize>,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for expression files and print their values (default)
    Repl,

    /// Evaluate expression files and directories
    Eval {
        /// Files, or directories searched for *.xml
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Parse an expression file and output its tree as JSON
    Parse {
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print an expression file as infix text
    Show { input: PathBuf },

    /// Generate random expression files
    Generate {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Number of files
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,

        /// Maximum operator nesting
        #[arg(short, long, default_value_t = 4)]
        depth: usize,

        /// Largest literal
        #[arg(long, default_value_t = 20)]
        max_literal: i64,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show version information
    Version,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        Reporter::report_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;

    if cli.keep_going {
        config.on_error = ErrorPolicy::Continue;
    }
    if cli.lenient {
        config.unknown_labels = UnknownLabelPolicy::Zero;
    }
    if let Some(depth) = cli.max_depth {
        config.max_depth = depth;
    }

    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    match &cli.command {
        None | Some(Commands::Repl) => repl_command(&config),
        Some(Commands::Eval { paths, format }) => eval_command(&config, paths, *format, cli.verbose),
        Some(Commands::Parse { input, output }) => parse_command(&config, input, output.as_ref()),
        Some(Commands::Show { input }) => show_command(&config, input),
        Some(Commands::Generate {
            out,
            count,
            depth,
            max_literal,
            seed,
        }) => generate_command(
            out,
            *count,
            GeneratorConfig {
                max_depth: *depth,
                max_literal: *max_literal,
                seed: *seed,
            },
        ),
        Some(Commands::Version) => {
            println!("xmlexpr v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn repl_command(config: &Config) -> Result<()> {
    let session = Session::new(config);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();

    let summary = session.run(stdin.lock(), &mut stdout, &mut stderr)?;
    if !summary.failures.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

fn eval_command(config: &Config, paths: &[PathBuf], format: OutputFormat, verbose: u8) -> Result<()> {
    let files = discover_expression_files(paths)?;
    if files.is_empty() {
        Reporter::report_warning("No expression files found");
        return Ok(());
    }

    let progress = if verbose > 0 && format == OutputFormat::Text {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let evaluator = Evaluator::with_options(config.eval_options());
    let start = Instant::now();
    let results = evaluate_batch(&files, &evaluator, progress.as_ref());
    let summary = BatchSummary::from_results(&results, start.elapsed());

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Text => {
            for result in &results {
                Reporter::report_result(result);
            }
            if results.len() > 1 {
                Reporter::report_summary(&summary);
            }
        }
    }

    if summary.failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn parse_command(config: &Config, input: &PathBuf, output: Option<&PathBuf>) -> Result<()> {
    let tree = io::import_expression_file(input, config.max_depth)?;
    let json = serde_json::to_string_pretty(&tree)?;

    if let Some(output_path) = output {
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Reporter::report_info(&format!("Tree written to {}", output_path.display()));
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn show_command(config: &Config, input: &PathBuf) -> Result<()> {
    let tree = io::import_expression_file(input, config.max_depth)?;
    let body = tree
        .expression_body()
        .with_context(|| format!("Invalid expression document: {}", input.display()))?;

    println!("{}", to_infix(body));
    Ok(())
}

fn generate_command(out: &PathBuf, count: usize, config: GeneratorConfig) -> Result<()> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create {}", out.display()))?;

    let mut generator = ExpressionGenerator::new(config);
    let width = count.to_string().len().max(3);

    for i in 1..=count {
        let generated = generator.generate();
        let path = out.join(format!("expr_{:0width$}.xml", i, width = width));
        io::export_xml(&generated.document(), &path)?;

        println!(
            "{} {} {}",
            path.display().to_string().cyan(),
            "=".bright_black(),
            generated.value
        );
    }

    Reporter::report_info(&format!("Generated {} expression files in {}", count, out.display()));
    Ok(())
}
