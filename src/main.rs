use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};
use miette::{Context, IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;

use gitai_core::{GitaiConfig, OutputFormat};
use gitai_difflens::numstat::{numstat_totals, parse_numstat, NumstatEntry};
use gitai_difflens::DiffAnalyzer;
use gitai_gitpulse::report::{format_stats_report, insights};
use gitai_gitpulse::ticket::TicketMatcher;
use gitai_gitpulse::HistoryAnalyzer;

const CONFIG_FILE: &str = ".gitai.toml";

#[derive(Parser)]
#[command(
    name = "gitai",
    version,
    about = "Commit-message context from diffs and history",
    long_about = "gitai turns raw git output into structured summaries for commit message generation.\n\n\
                   Feed it the text git already produces; it never runs git itself.\n\n\
                   Examples:\n  \
                     git diff --staged | gitai diff             Summarise staged changes\n  \
                     git log -100 --pretty=format:'%H|%an|%s|%b|%ad' --date=iso | gitai stats\n  \
                     gitai ticket \"$(git branch --show-current)\"  Ticket id from the branch\n  \
                     gitai init                                Write a default .gitai.toml"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: .gitai.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        long_help = "Output format for command results.\n\n\
                       Formats:\n  \
                         text      Human-readable summaries (default)\n  \
                         json      Machine-readable JSON with camelCase keys\n  \
                         markdown  GitHub-flavored Markdown"
    )]
    format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Analyse a unified diff and render a size-budgeted smart diff
    #[command(long_about = "Analyse a unified diff and render a size-budgeted smart diff.\n\n\
        Summarises every file (status, line counts, type, key declarations), rates\n\
        overall complexity, and keeps the most informative hunks when the diff is\n\
        larger than the byte budget. Reads from stdin or a file.\n\n\
        With --numstat the input is `git diff --numstat` output instead, and only\n\
        per-file line counts are reported.\n\n\
        Examples:\n  git diff --staged | gitai diff\n  gitai diff --file changes.patch --max-length 8000\n  \
        git diff --staged --numstat | gitai diff --numstat")]
    Diff {
        /// Read diff from file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,

        /// Smart-diff byte budget (default: [diff] max_length, 4000)
        #[arg(long, conflicts_with = "numstat")]
        max_length: Option<usize>,

        /// Read `git diff --numstat` output and report per-file counts
        #[arg(long)]
        numstat: bool,
    },
    /// Show commit history statistics and patterns
    #[command(long_about = "Show commit history statistics and patterns.\n\n\
        Reads pipe-delimited log lines (hash|author|subject|body|date) and reports\n\
        commit types, scopes, verbs, languages, time and day patterns, recent\n\
        activity, top contributors, and recommendations.\n\n\
        Examples:\n  git log -100 --pretty=format:'%H|%an|%s|%b|%ad' --date=iso | gitai stats\n  gitai stats --file log.txt --export stats.json")]
    Stats {
        /// Read log lines from file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,

        /// Maximum commits to analyse (default: [stats] limit, 100)
        #[arg(long, short = 'n')]
        limit: Option<usize>,

        /// Number of commit patterns to show (default: [stats] top_patterns, 3)
        #[arg(long)]
        top: Option<usize>,

        /// Also write the statistics as pretty JSON to this path
        #[arg(long, short)]
        export: Option<PathBuf>,
    },
    /// Extract a ticket id from a branch name
    #[command(long_about = "Extract a ticket id from a branch name.\n\n\
        Tries the custom pattern first, then PROJ-123, #123, GH-123 and PROJ_123\n\
        shapes. A bare number is joined with the prefix.\n\n\
        Examples:\n  gitai ticket feature/PROJ-123-login\n  gitai ticket task/991 --pattern '\\d+' --prefix OPS")]
    Ticket {
        /// Branch name
        branch: String,

        /// Custom ticket regex (default: [ticket] pattern)
        #[arg(long)]
        pattern: Option<String>,

        /// Prefix for bare ticket numbers (default: [ticket] prefix)
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Create a default .gitai.toml configuration file
    Init,
}

const DEFAULT_CONFIG: &str = r#"# gitai configuration

[diff]
# Byte budget for the smart diff
# max_length = 4000

[stats]
# Commits to analyse
# limit = 100
# Commit patterns to rank
# top_patterns = 3

[ticket]
# Custom ticket regex, tried before the built-in shapes
# pattern = "PROJ-\\d+"
# Prefix joined onto bare ticket numbers
# prefix = "PROJ"
"#;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GitaiConfig> {
    let config = match path {
        Some(path) => GitaiConfig::from_file(path)?,
        None => {
            let default_path = Path::new(CONFIG_FILE);
            if default_path.exists() {
                GitaiConfig::from_file(default_path)?
            } else {
                GitaiConfig::default()
            }
        }
    };
    config.validate()?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn read_input(file: Option<&Path>, what: &str) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err(format!("reading {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .into_diagnostic()
                .wrap_err(format!("reading {what} from stdin"))?;
            Ok(input)
        }
    }
}

fn print_numstat(entries: &[NumstatEntry], format: OutputFormat) -> Result<()> {
    let (additions, deletions) = numstat_totals(entries);
    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "files": entries,
                "totalAdditions": additions,
                "totalDeletions": deletions,
            });
            println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        }
        OutputFormat::Markdown => {
            println!("| File | + | - |");
            println!("|------|---|---|");
            for entry in entries {
                println!(
                    "| `{}` | {} | {} |",
                    entry.path,
                    count_label(entry.additions),
                    count_label(entry.deletions)
                );
            }
            println!("\n**Total:** {} files, +{additions}/-{deletions}", entries.len());
        }
        OutputFormat::Text => {
            for entry in entries {
                println!(
                    "{:>6} {:>6}  {}",
                    format!("+{}", count_label(entry.additions)),
                    format!("-{}", count_label(entry.deletions)),
                    entry.path
                );
            }
            println!("{} files, +{additions}/-{deletions}", entries.len());
        }
    }
    Ok(())
}

fn count_label(count: Option<u32>) -> String {
    count.map_or_else(|| "bin".to_string(), |n| n.to_string())
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!("gitai v{version} - commit-message context from diffs and history\n");

    println!("Commands:");
    println!("  diff      Summarise a diff and render a size-budgeted smart diff");
    println!("  stats     Commit history statistics, patterns, and insights");
    println!("  ticket    Extract a ticket id from a branch name");
    println!("  init      Create default configuration\n");

    println!("Run 'gitai <command> --help' for details.");
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        None => print_welcome(),
        Some(Command::Diff {
            ref file,
            max_length,
            numstat,
        }) => {
            let input = read_input(file.as_deref(), "diff")?;
            if numstat {
                print_numstat(&parse_numstat(&input), cli.format)?;
                return Ok(());
            }
            if input.trim().is_empty() {
                miette::bail!(miette::miette!(
                    help = "Pipe a diff to gitai, e.g.: git diff --staged | gitai diff\n       Or use --file <path>",
                    "Empty diff input"
                ));
            }

            let analyzer = match max_length {
                Some(n) => DiffAnalyzer::new(n),
                None => DiffAnalyzer::from_config(&load_config(cli.config.as_deref())?.diff),
            };
            let analysis = analyzer.analyze(&input);

            match cli.format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&analysis).into_diagnostic()?
                    );
                }
                OutputFormat::Markdown => {
                    print!("{}", analysis.to_markdown());
                }
                OutputFormat::Text => {
                    print!("{analysis}");
                    println!("\n{}", analysis.smart_diff);
                }
            }
        }
        Some(Command::Stats {
            ref file,
            limit,
            top,
            ref export,
        }) => {
            let input = read_input(file.as_deref(), "log lines")?;
            if top == Some(0) {
                miette::bail!("--top must be at least 1");
            }

            let config = load_config(cli.config.as_deref())?;
            let mut analyzer = HistoryAnalyzer::from_config(&config.stats, Utc::now());
            if let Some(limit) = limit {
                analyzer = analyzer.with_limit(limit);
            }
            if let Some(top) = top {
                analyzer = analyzer.with_top_patterns(top);
            }

            let stats = analyzer.analyze(input.lines());
            if stats.total_commits == 0 {
                println!("No commits found in the input.");
                return Ok(());
            }
            let patterns = analyzer.patterns(&stats);
            let found = insights(&stats);

            if let Some(path) = export {
                let json = serde_json::to_string_pretty(&stats).into_diagnostic()?;
                std::fs::write(path, json)
                    .into_diagnostic()
                    .wrap_err(format!("writing {}", path.display()))?;
                eprintln!("Statistics exported to {}", path.display());
            }

            match cli.format {
                OutputFormat::Json => {
                    let json = serde_json::json!({
                        "stats": stats,
                        "patterns": patterns,
                        "insights": found,
                    });
                    println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
                }
                OutputFormat::Markdown => {
                    println!("```text\n{}```\n", format_stats_report(&stats));
                    if !patterns.is_empty() {
                        println!("## Top Commit Patterns\n");
                        for (i, pattern) in patterns.iter().enumerate() {
                            println!("{}. `{pattern}`", i + 1);
                        }
                        println!();
                    }
                    if !found.is_empty() {
                        println!("## Insights\n");
                        for insight in &found {
                            println!("- **{}** {}", insight.message, insight.hint);
                        }
                    }
                }
                OutputFormat::Text => {
                    println!("{}", format_stats_report(&stats));
                    if !patterns.is_empty() {
                        println!("Your Top Commit Patterns:");
                        for (i, pattern) in patterns.iter().enumerate() {
                            println!("  {}. {pattern}", i + 1);
                        }
                        println!();
                    }
                    if !found.is_empty() {
                        println!("Insights & Recommendations:");
                        for insight in &found {
                            println!("  {insight}");
                        }
                    }
                }
            }
        }
        Some(Command::Ticket {
            ref branch,
            ref pattern,
            ref prefix,
        }) => {
            let mut ticket_config = load_config(cli.config.as_deref())?.ticket;
            if pattern.is_some() {
                ticket_config.pattern = pattern.clone();
            }
            if prefix.is_some() {
                ticket_config.prefix = prefix.clone();
            }
            let matcher = TicketMatcher::from_config(&ticket_config)?;

            let Some(ticket) = matcher.resolve(branch) else {
                miette::bail!(miette::miette!(
                    help = "Pass --pattern with a regex that matches your ticket ids",
                    "No ticket found in branch '{branch}'"
                ));
            };

            match cli.format {
                OutputFormat::Json => {
                    let json = serde_json::json!({ "branch": branch, "ticket": ticket });
                    println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
                }
                OutputFormat::Markdown | OutputFormat::Text => println!("{ticket}"),
            }
        }
        Some(Command::Init) => {
            let path = Path::new(CONFIG_FILE);
            if path.exists() {
                miette::bail!("{CONFIG_FILE} already exists");
            }
            std::fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
            println!("Created {CONFIG_FILE} with default configuration");
        }
    }

    Ok(())
}
