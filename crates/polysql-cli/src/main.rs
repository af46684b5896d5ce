//! polysql CLI
//!
//! Command-line driver for parsing SQL scripts and decoding EXPLAIN plans.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use polysql_core::{DialectKind, Feature, Lexer, Node, ParseMetrics, ParserOptions};
use polysql_plan::{ExecutionPlan, PlanFormat};

/// Multi-dialect SQL parser for SQL Server, MySQL, PostgreSQL and SQLite.
#[derive(Parser)]
#[command(name = "polysql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL dialect (sqlserver, mysql, postgresql, sqlite).
    #[arg(short, long, env = "POLYSQL_DIALECT", default_value = "sqlserver")]
    dialect: DialectKind,

    /// Abandon parsing after this many milliseconds.
    #[arg(short, long, env = "POLYSQL_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a script and list its statements.
    Parse {
        /// Script to read (stdin if not specified).
        file: Option<PathBuf>,

        /// Print statements, errors and metrics as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the token stream of a script.
    Tokens {
        /// Script to read (stdin if not specified).
        file: Option<PathBuf>,
    },

    /// Decode an EXPLAIN plan document.
    Plan {
        /// Plan document to read (stdin if not specified).
        file: Option<PathBuf>,

        /// Input format (json, xml, text); defaults to the dialect's own.
        #[arg(short, long)]
        format: Option<PlanFormat>,

        /// Print the decoded plan as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List dialects and the gated features each accepts.
    Dialects,
}

#[derive(Serialize)]
struct StatementReport {
    #[serde(rename = "type")]
    type_tag: &'static str,
    summary: String,
}

#[derive(Serialize)]
struct ParseReport {
    dialect: DialectKind,
    statements: Vec<StatementReport>,
    errors: Vec<String>,
    metrics: ParseMetrics,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Parse { file, json } => {
            let source = read_input(file.as_ref())?;
            let mut options = ParserOptions::new().with_dialect(cli.dialect);
            if let Some(ms) = cli.timeout_ms {
                options = options.with_timeout(Duration::from_millis(ms));
            }
            let report = parse_script(&source, options);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for statement in &report.statements {
                    println!("{}\t{}", statement.type_tag, statement.summary);
                }
                for error in &report.errors {
                    eprintln!("error: {error}");
                }
                info!(
                    statements = report.statements.len(),
                    tokens = report.metrics.tokens_processed,
                    "parsed in {:.3} ms",
                    report.metrics.parse_duration_ms
                );
            }

            if !report.errors.is_empty() {
                bail!("{} parse error(s)", report.errors.len());
            }
        }

        Commands::Tokens { file } => {
            let source = read_input(file.as_ref())?;
            for token in Lexer::with_dialect(&source, cli.dialect).tokenize() {
                println!(
                    "{}:{}\t{}\t{}",
                    token.span.line,
                    token.span.column,
                    token.kind,
                    token.literal
                );
            }
        }

        Commands::Plan { file, format, json } => {
            let input = read_input(file.as_ref())?;
            let format = format.unwrap_or_else(|| PlanFormat::native(cli.dialect));
            debug!(%format, "decoding plan");
            let plan = ExecutionPlan::decode(&input, format)?;

            if json {
                println!("{}", plan.to_json()?);
            } else {
                print_plan(&plan);
            }
        }

        Commands::Dialects => {
            for dialect in DialectKind::ALL {
                let rules = dialect.dialect();
                let features: Vec<_> = Feature::ALL
                    .iter()
                    .filter(|feature| rules.supports_feature(**feature))
                    .map(Feature::tag)
                    .collect();
                println!("{dialect}\t{}", features.join(", "));
            }
        }
    }

    Ok(())
}

/// Reads the whole file, or stdin when no path is given.
fn read_input(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Parses every statement, keeping going past errors.
fn parse_script(source: &str, options: ParserOptions) -> ParseReport {
    let mut parser = polysql_core::Parser::with_options(source, options);
    let mut statements = Vec::new();
    for statement in parser.by_ref().flatten() {
        statements.push(StatementReport {
            type_tag: statement.type_tag(),
            summary: statement.summary(),
        });
    }
    ParseReport {
        dialect: options.dialect,
        statements,
        errors: parser.error_messages(),
        metrics: parser.metrics(),
    }
}

fn print_plan(plan: &ExecutionPlan) {
    println!(
        "{} (cost {:.2}, rows {})",
        plan.dialect, plan.total_cost, plan.estimated_rows
    );
    print_node(&plan.root_node, 1);
    for warning in &plan.warnings {
        println!("warning: {warning}");
    }
}

fn print_node(node: &polysql_plan::PlanNode, depth: usize) {
    let mut line = format!("{}{} {}", "  ".repeat(depth), node.node_type, node.operation);
    if let Some(table) = &node.table {
        line.push_str(&format!(" on {table}"));
    }
    if let Some(index) = &node.index {
        line.push_str(&format!(" using {index}"));
    }
    println!("{line}");
    for child in &node.children {
        print_node(child, depth + 1);
    }
}
