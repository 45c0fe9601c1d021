//! `treechain` CLI: read, write, merge and search JSON documents by chain.
//!
//! ## Usage
//!
//! ```sh
//! # Read a nested value (stdin → stdout)
//! echo '{"server":{"port":80}}' | treechain get --chain server:port
//!
//! # Write a value and print the updated document
//! treechain set --chain server:tls:enabled --value true -i config.json
//!
//! # Remove a value
//! treechain unset --chain server:tls -i config.json -o config.json
//!
//! # Deep-merge two documents (right wins, lists concatenate)
//! treechain merge defaults.json overrides.json --pretty
//!
//! # Sum numbers, join strings with a separator
//! treechain merge a.json b.json --policy sum-values --glue ", "
//!
//! # Find the first occurrence of a key
//! treechain search --key cert -i config.json
//!
//! # Check that top-level keys exist
//! treechain require --keys user,pass -i credentials.json
//! ```
//!
//! Set `TREECHAIN_LOG=debug` to see merge and search decisions on stderr.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use std::io::{self, IsTerminal, Read};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use treechain_core::select::check_required_keys;
use treechain_core::{access, json as tree_json, search_key_deep, Chain, MergePolicy, Node};
use treechain_core::{DEFAULT_MAX_DEPTH, DEFAULT_SEPARATOR};

#[derive(Parser)]
#[command(
    name = "treechain",
    version,
    about = "Chain-addressed access and deep merge for JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Separator between chain segments
    #[arg(long, global = true, env = "TREECHAIN_SEPARATOR", default_value_t = DEFAULT_SEPARATOR)]
    separator: char,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Args)]
struct Io {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at a chain
    Get {
        /// Chain to read, e.g. `server:port`
        #[arg(short, long)]
        chain: String,
        #[command(flatten)]
        io: Io,
    },
    /// Set a value at a chain and print the document
    Set {
        /// Chain to write
        #[arg(short, long)]
        chain: String,
        /// JSON value to store (`42`, `"text"`, `{"a":1}`)
        #[arg(long, allow_hyphen_values = true)]
        value: String,
        #[command(flatten)]
        io: Io,
    },
    /// Remove the value at a chain and print the document
    Unset {
        /// Chain to remove
        #[arg(short, long)]
        chain: String,
        #[command(flatten)]
        io: Io,
    },
    /// Merge two JSON documents
    Merge {
        /// Base document
        left: String,
        /// Document merged on top of LEFT
        right: String,
        /// How colliding keys are combined
        #[arg(long, value_enum, default_value_t = PolicyArg::Deep)]
        policy: PolicyArg,
        /// Text placed between joined strings (sum-values only)
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        glue: String,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Find the first occurrence of a key and print its chain and value
    Search {
        /// Key to look for
        #[arg(short, long)]
        key: String,
        /// Deepest level the search may descend to
        #[arg(long, env = "TREECHAIN_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
        #[command(flatten)]
        io: Io,
    },
    /// Fail unless every listed key exists at the top level
    Require {
        /// Comma-separated key names
        #[arg(long)]
        keys: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Deep,
    Assoc,
    Sum,
    SumValues,
}

impl PolicyArg {
    fn into_policy(self, glue: String) -> MergePolicy {
        match self {
            PolicyArg::Deep => MergePolicy::Deep,
            PolicyArg::Assoc => MergePolicy::Assoc,
            PolicyArg::Sum => MergePolicy::Sum,
            PolicyArg::SumValues => MergePolicy::SumValues { glue },
        }
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let sep = cli.separator;

    match cli.command {
        Commands::Get { chain, io } => {
            let tree = read_tree(io.input.as_deref())?;
            let chain = Chain::parse(&chain, sep);
            let found = access::get(&tree, &chain)
                .with_context(|| format!("Failed to read chain '{}'", chain.serialize(sep)))?;
            let Some(value) = found else {
                anyhow::bail!("no value at chain '{}'", chain.serialize(sep));
            };
            write_output(io.output.as_deref(), &render(value, cli.pretty)?)?;
        }
        Commands::Set { chain, value, io } => {
            let mut tree = read_tree(io.input.as_deref())?;
            let value = tree_json::decode(&value).context("--value must be a JSON value")?;
            let chain = Chain::parse(&chain, sep);
            access::set(&mut tree, &chain, value)
                .with_context(|| format!("Failed to set chain '{}'", chain.serialize(sep)))?;
            write_output(io.output.as_deref(), &render(&tree, cli.pretty)?)?;
        }
        Commands::Unset { chain, io } => {
            let mut tree = read_tree(io.input.as_deref())?;
            let chain = Chain::parse(&chain, sep);
            access::unset(&mut tree, &chain)
                .with_context(|| format!("Failed to unset chain '{}'", chain.serialize(sep)))?;
            write_output(io.output.as_deref(), &render(&tree, cli.pretty)?)?;
        }
        Commands::Merge {
            left,
            right,
            policy,
            glue,
            output,
        } => {
            let left = read_tree(Some(left.as_str()))?;
            let right = read_tree(Some(right.as_str()))?;
            let policy = policy.into_policy(glue);
            info!(policy = policy.name(), "merging documents");
            let merged = policy.apply(&left, &right);
            write_output(output.as_deref(), &render(&merged, cli.pretty)?)?;
        }
        Commands::Search { key, max_depth, io } => {
            let tree = read_tree(io.input.as_deref())?;
            let found = search_key_deep(&tree, &key, max_depth)
                .with_context(|| format!("Search for key '{key}' failed"))?;
            let Some(found) = found else {
                anyhow::bail!("key '{key}' not found");
            };
            let report = json!({
                "chain": found.chain_string(sep),
                "value": Value::from(found.value),
            });
            let text = if cli.pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            write_output(io.output.as_deref(), &format!("{text}\n"))?;
        }
        Commands::Require { keys, input } => {
            let tree = read_tree(input.as_deref())?;
            let required = split_keys(&keys);
            check_required_keys(&required, &tree)?;
            debug!(count = required.len(), "all required keys present");
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays clean JSON. `TREECHAIN_LOG` takes the usual
/// `EnvFilter` directives and defaults to `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("TREECHAIN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

/// Split `a, b,,c` into `["a", "b", "c"]`.
fn split_keys(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

fn render(node: &Node, pretty: bool) -> Result<String> {
    let text = if pretty {
        tree_json::encode_pretty(node)
    } else {
        tree_json::encode(node)
    }
    .context("Failed to encode JSON")?;
    Ok(format!("{text}\n"))
}

fn read_tree(path: Option<&str>) -> Result<Node> {
    let text = read_input(path)?;
    let source = path.unwrap_or("stdin");
    tree_json::decode(&text).with_context(|| format!("Failed to parse JSON from {source}"))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
