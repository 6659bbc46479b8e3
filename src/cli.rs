//! Command-line interface.

use crate::config::{Config, expand_tilde};
use crate::error::Result;
use crate::index::{self, SearchIndex, validate};
use crate::nav::{NavExpander, SiteOptions, expand_site};
use crate::search::{QueryEngine, relative_relevance};
use crate::strings::{self, Case, Side};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "tidystring")]
#[command(about = "String utilities and documentation site tooling", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to <config dir>/tidystring/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a search index for dangling references and empty postings
    Validate { index: PathBuf },
    /// Search a documentation index
    Search {
        index: PathBuf,
        #[arg(required = true)]
        query: Vec<String>,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Print hits as JSON
        #[arg(long)]
        json: bool,
        /// Parse the index without the binary cache
        #[arg(long)]
        no_cache: bool,
    },
    /// Summarize a search index
    Stats { index: PathBuf },
    /// Re-serialize a search index
    Export {
        index: PathBuf,
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Script)]
        format: ExportFormat,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Mark navigation levels as expanded in every page of a rendered site
    ExpandNav {
        site: PathBuf,
        #[command(flatten)]
        levels: LevelArgs,
        /// Report changes without writing
        #[arg(long)]
        dry_run: bool,
        /// Files rewritten at once
        #[arg(short = 'j', long)]
        concurrency: Option<usize>,
    },
    /// Print the page-load script that expands navigation in the browser
    NavScript {
        #[command(flatten)]
        levels: LevelArgs,
    },
    /// Print a function or pattern reference table
    Cheatsheet {
        /// basic, case, detection, extraction, modification, regex, input_types
        group: Option<String>,
    },
    /// Apply a string operation to every line of stdin
    Apply {
        #[command(subcommand)]
        op: StrOp,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// `Search.setIndex(...)` registration script
    Script,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, clap::Args)]
pub struct LevelArgs {
    /// Expand `toctree-l1` through `toctree-l<depth>`
    #[arg(long, conflicts_with = "level")]
    pub depth: Option<usize>,
    /// Level class to expand (repeatable)
    #[arg(long)]
    pub level: Vec<String>,
    /// Class added to expanded elements
    #[arg(long)]
    pub marker: Option<String>,
}

impl LevelArgs {
    /// Flags override the configured levels and marker.
    pub fn expander(&self, config: &Config) -> NavExpander {
        let marker = self
            .marker
            .clone()
            .unwrap_or_else(|| config.nav.marker.clone());
        match self.depth {
            Some(depth) => NavExpander::new(NavExpander::with_depth(depth).levels().to_vec(), marker),
            None if !self.level.is_empty() => NavExpander::new(self.level.clone(), marker),
            None => NavExpander::new(config.nav.levels.clone(), marker),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum StrOp {
    Upper,
    Lower,
    Title,
    Trim,
    Squish,
    Length,
    /// camelCase to snake_case
    Snake,
    /// snake_case to CamelCase
    Camel,
    UpperCut {
        #[arg(default_value_t = 1)]
        n: usize,
    },
    Detect { pattern: String },
    Count { pattern: String },
    Locate { pattern: String },
    Extract { pattern: String },
    Replace {
        pattern: String,
        replacement: String,
        /// Replace at most this many matches
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    Remove { pattern: String },
    Split {
        pattern: String,
        #[arg(long)]
        max: Option<usize>,
    },
    Sub {
        #[arg(allow_hyphen_values = true)]
        start: isize,
        #[arg(allow_hyphen_values = true)]
        end: Option<isize>,
    },
    Pad {
        width: usize,
        #[arg(long, default_value = "both")]
        side: Side,
        #[arg(long, default_value_t = ' ')]
        pad: char,
    },
    Dup { times: usize },
    Wrap {
        #[arg(default_value_t = 80)]
        width: usize,
        #[arg(long, default_value_t = 0)]
        indent: usize,
        #[arg(long, default_value_t = 0)]
        exdent: usize,
    },
    DashToSpace,
    Recase { pattern: String, case: Case },
}

impl StrOp {
    /// Apply to `lines`, one output line per input line. Wrapped and split
    /// results may span several lines.
    pub fn apply(&self, lines: &[String]) -> Result<Vec<String>> {
        let out: Vec<String> = match self {
            Self::Upper => strings::str_to_upper(lines),
            Self::Lower => strings::str_to_lower(lines),
            Self::Title => strings::str_to_title(lines),
            Self::Trim => strings::str_trim(lines),
            Self::Squish => strings::str_squish(lines),
            Self::Length => display_all(strings::str_length(lines)),
            Self::Snake => strings::camel_to_snake(lines),
            Self::Camel => strings::snake_to_camel(lines),
            Self::UpperCut { n } => strings::str_upper_cut(lines, *n),
            Self::Detect { pattern } => display_all(strings::str_detect(lines, pattern)?),
            Self::Count { pattern } => display_all(strings::str_count(lines, pattern)?),
            Self::Locate { pattern } => strings::str_locate(lines, pattern)?
                .into_iter()
                .map(|pos| pos.map_or_else(|| "-".to_string(), |p| p.to_string()))
                .collect(),
            Self::Extract { pattern } => strings::str_extract(lines, pattern)?
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect(),
            Self::Replace {
                pattern,
                replacement,
                count,
            } => strings::str_replace(lines, pattern, replacement, *count)?,
            Self::Remove { pattern } => strings::str_remove(lines, pattern)?,
            Self::Split { pattern, max } => strings::str_split(lines, pattern, *max)?
                .into_iter()
                .map(|parts| parts.join("\t"))
                .collect(),
            Self::Sub { start, end } => strings::str_sub(lines, *start, *end),
            Self::Pad { width, side, pad } => strings::str_pad(lines, *width, *side, *pad),
            Self::Dup { times } => strings::str_dup(lines, *times),
            Self::Wrap {
                width,
                indent,
                exdent,
            } => strings::str_wrap(lines, *width, *indent, *exdent),
            Self::DashToSpace => strings::str_dash_to_space(lines, &strings::DEFAULT_DASHES),
            Self::Recase { pattern, case } => strings::str_search_recase(lines, pattern, *case)?,
        };
        Ok(out)
    }
}

fn display_all<T: ToString>(values: Vec<T>) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

/// Run a parsed command.
pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Validate { index } => {
            let loaded = load(&index, &config, false).await?;
            let report = validate(&loaded);
            if report.is_valid() {
                println!(
                    "{}: valid ({} documents, {} terms)",
                    index.display(),
                    loaded.doc_count(),
                    loaded.terms.len()
                );
                Ok(())
            } else {
                Err(anyhow::Error::new(report))
                    .with_context(|| format!("{} failed validation", index.display()))
            }
        }
        Commands::Search {
            index,
            query,
            limit,
            json,
            no_cache,
        } => {
            let loaded = load(&index, &config, no_cache).await?;
            search(&loaded, &query.join(" "), limit.unwrap_or(config.search.limit), json, &config)
        }
        Commands::Stats { index } => {
            let loaded = load(&index, &config, false).await?;
            print!("{}", stats(&loaded));
            Ok(())
        }
        Commands::Export {
            index,
            format,
            output,
        } => {
            let loaded = load(&index, &config, true).await?;
            let text = match format {
                ExportFormat::Script => index::to_script(&loaded)?,
                ExportFormat::Json => index::to_pretty_json(&loaded)?,
            };
            match output {
                Some(path) => tokio::fs::write(&path, text)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display())),
                None => {
                    println!("{}", text);
                    Ok(())
                }
            }
        }
        Commands::ExpandNav {
            site,
            levels,
            dry_run,
            concurrency,
        } => {
            let expander = levels.expander(&config);
            let options = SiteOptions {
                dry_run,
                concurrency: concurrency.unwrap_or(config.nav.concurrency),
            };
            let report = expand_site(&site, &expander, options).await?;
            for page in report.changed() {
                let shown = page.path.strip_prefix(&site).unwrap_or(&page.path);
                println!("{}: {} marked", shown.display(), page.marked);
            }
            println!(
                "{} {} elements in {} of {} pages",
                if dry_run { "Would mark" } else { "Marked" },
                report.total_marked(),
                report.changed().count(),
                report.scanned()
            );
            Ok(())
        }
        Commands::NavScript { levels } => {
            print!("{}", levels.expander(&config).to_script());
            Ok(())
        }
        Commands::Cheatsheet { group } => {
            let sheet = strings::cheatsheet(group.as_deref())?;
            print!("{}", sheet.render());
            Ok(())
        }
        Commands::Apply { op } => {
            let lines = std::io::stdin()
                .lock()
                .lines()
                .collect::<std::io::Result<Vec<_>>>()
                .context("Failed to read stdin")?;
            let mut stdout = std::io::stdout().lock();
            for line in op.apply(&lines)? {
                writeln!(stdout, "{}", line)?;
            }
            Ok(())
        }
    }
}

/// Load an index through the configured cache unless caching is off.
async fn load(path: &Path, config: &Config, skip_cache: bool) -> Result<Arc<SearchIndex>> {
    let path = PathBuf::from(expand_tilde(&path.to_string_lossy()).as_ref());
    match config.cache.index_cache() {
        Some(cache) if !skip_cache => cache.load_or_parse(&path).await,
        _ => Ok(index::load_index(&path)?),
    }
}

fn search(index: &SearchIndex, query: &str, limit: usize, json: bool, config: &Config) -> Result<()> {
    let engine = QueryEngine::new(index);
    let hits = engine.search(query, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("No results for {:?}", query);
        let suggestions = engine.suggest(
            query,
            config.search.suggestion_threshold,
            config.search.suggestions,
        );
        if !suggestions.is_empty() {
            println!("\nDid you mean:");
            for suggestion in suggestions {
                println!("  {} ({:.0}%)", suggestion.text, suggestion.score * 100.0);
            }
        }
        return Ok(());
    }

    let best = hits.first().map_or(0, |hit| hit.score);
    for hit in &hits {
        println!(
            "{:>3}%  {:<6}  {}  [{}]",
            relative_relevance(hit.score, best),
            hit.kind.to_string(),
            hit.label,
            hit.href()
        );
        if let Some(description) = &hit.description {
            println!("        {} in {}", description, hit.title);
        }
    }
    Ok(())
}

/// Human-readable index summary.
pub fn stats(index: &SearchIndex) -> String {
    let mut out = String::new();
    let mut line = |label: &str, value: usize| {
        out.push_str(&format!("{:<14} {}\n", label, value));
    };
    line("documents", index.doc_count());
    line("titles", index.alltitles.len());
    line("terms", index.terms.len());
    line("title terms", index.titleterms.len());
    line("postings", index.posting_count());
    line("objects", index.objects().count());
    line("index entries", index.indexentries.len());
    line("object types", index.objtypes.len());
    for (domain, version) in &index.envversion {
        out.push_str(&format!("{:<14} {} v{}\n", "env", domain, version));
    }
    out
}
