//! CLI argument parsing and command handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::decoders::CsvOptions;
use crate::models::{ConfKind, Content, FileKind, ParsedConfig};
use crate::output;
use crate::reader::{FileConfigReader, ReaderOptions};

/// Bootstrap configuration used when `--config` is not given
pub const DEFAULT_CONFIG: &str = "config.conf";

/// treeconf: find configuration files anywhere beneath a configured root
#[derive(Parser, Debug)]
#[command(
    name = "treeconf",
    version,
    about = "Locate and load configuration-like files beneath a configured root",
    long_about = "treeconf reads a bootstrap config whose `root` key names a directory, \
                  indexes that directory by filename, and resolves names to exactly one \
                  file: the shallowest match, then the lexicographically first, optionally \
                  restricted to a subdirectory with --start.\n\n\
                  .json, .conf, .sql and .csv files are decoded; anything else is printed as text."
)]
pub struct Cli {
    /// Enable verbose logging (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Bootstrap configuration file (must define `root`)
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG, global = true)]
    pub config: PathBuf,

    /// Format of the bootstrap configuration (key-value, json)
    #[arg(long, value_name = "KIND", default_value = "key-value", global = true)]
    pub kind: ConfKind,

    /// Keys the bootstrap configuration must define
    /// Example: --require root,env
    #[arg(long, value_delimiter = ',', global = true)]
    pub require: Vec<String>,

    /// Reload the bootstrap configuration even if it is cached
    #[arg(long, global = true)]
    pub refresh: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find a file by name and print its decoded content
    ///
    /// The name may carry a relative directory, which narrows the search:
    ///   treeconf find settings.json
    ///   treeconf find db/settings.json --start services
    Find {
        /// Filename, optionally with a relative directory
        name: String,

        /// Only accept matches below this directory (relative to root)
        #[arg(short, long)]
        start: Option<String>,

        /// Print the file as text instead of decoding it
        #[arg(long)]
        raw: bool,

        /// Output format as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output (only with --json)
        #[arg(long)]
        pretty: bool,
    },

    /// Print the absolute path a name resolves to
    Locate {
        /// Filename, optionally with a relative directory
        name: String,

        /// Only accept matches below this directory (relative to root)
        #[arg(short, long)]
        start: Option<String>,
    },

    /// List every indexed filename with its candidate paths in priority order
    Tree {
        /// Output format as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output (only with --json)
        #[arg(long)]
        pretty: bool,
    },

    /// Print the bootstrap configuration
    Config {
        /// Output format as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output (only with --json)
        #[arg(long)]
        pretty: bool,
    },

    /// Decode a file directly, without the bootstrap config or index
    Decode {
        /// File to decode
        path: PathBuf,

        /// Decoder to use (key-value, json, sql, csv, raw); defaults to the extension
        #[arg(long = "as", value_name = "KIND")]
        decode_as: Option<FileKind>,

        /// CSV: treat the first row as data rather than column names
        #[arg(long)]
        no_header: bool,

        /// CSV: field delimiter (detected when omitted)
        #[arg(long)]
        delimiter: Option<char>,

        /// CSV: columns the header row must contain
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Output format as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output (only with --json)
        #[arg(long)]
        pretty: bool,
    },
}

impl Cli {
    /// Execute the parsed command
    pub fn execute(self) -> Result<()> {
        // Setup logging based on verbosity
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();

        let options = ReaderOptions {
            kind: self.kind,
            required_keys: self.require.clone(),
            force_refresh: self.refresh,
        };

        match self.command {
            Command::Find {
                name,
                start,
                raw,
                json,
                pretty,
            } => {
                let reader = open_reader(&self.config, options)?;
                handle_find(&reader, &name, start.as_deref(), raw, json, pretty)
            }
            Command::Locate { name, start } => {
                let reader = open_reader(&self.config, options)?;
                handle_locate(&reader, &name, start.as_deref())
            }
            Command::Tree { json, pretty } => {
                let reader = open_reader(&self.config, options)?;
                handle_tree(&reader, json, pretty)
            }
            Command::Config { json, pretty } => {
                let reader = open_reader(&self.config, options)?;
                handle_config(&reader, json, pretty)
            }
            Command::Decode {
                path,
                decode_as,
                no_header,
                delimiter,
                columns,
                json,
                pretty,
            } => {
                handle_decode(&path, decode_as, no_header, delimiter, columns, json, pretty)
            }
        }
    }
}

fn open_reader(config: &Path, options: ReaderOptions) -> Result<FileConfigReader> {
    FileConfigReader::with_options(config, options)
        .with_context(|| format!("Failed to open reader from {}", config.display()))
}

fn print_content(content: &Content, json: bool, pretty: bool) -> Result<()> {
    if json {
        println!("{}", output::to_json(content, pretty)?);
    } else {
        print!("{}", output::render_plain(content));
    }
    Ok(())
}

fn handle_find(
    reader: &FileConfigReader,
    name: &str,
    start: Option<&str>,
    raw: bool,
    json: bool,
    pretty: bool,
) -> Result<()> {
    let content = reader
        .find_with(name, start, !raw)
        .with_context(|| format!("Failed to find '{}'", name))?;
    print_content(&content, json, pretty)
}

fn handle_locate(reader: &FileConfigReader, name: &str, start: Option<&str>) -> Result<()> {
    let path = reader
        .locate(name, start)
        .with_context(|| format!("Failed to locate '{}'", name))?;
    println!("{}", path.display());
    Ok(())
}

fn handle_tree(reader: &FileConfigReader, json: bool, pretty: bool) -> Result<()> {
    let tree = reader.tree();

    if json {
        let entries: serde_json::Map<String, serde_json::Value> = tree
            .iter()
            .map(|(name, paths)| (name.to_string(), serde_json::json!(paths)))
            .collect();
        let body = serde_json::json!({
            "root": reader.root(),
            "files": tree.file_count(),
            "entries": entries,
        });
        println!("{}", output::to_json(&body, pretty)?);
        return Ok(());
    }

    if tree.is_empty() {
        output::warn(&format!("No files found under {}", reader.root().display()));
        return Ok(());
    }

    for (name, paths) in tree.iter() {
        println!("{}", name);
        for path in paths {
            println!("  {}", path);
        }
    }
    output::info(&format!(
        "{} files, {} distinct names under {}",
        tree.file_count(),
        tree.len(),
        reader.root().display()
    ));
    Ok(())
}

fn handle_config(reader: &FileConfigReader, json: bool, pretty: bool) -> Result<()> {
    let config = reader.config();
    if json {
        println!("{}", output::to_json(config, pretty)?);
        return Ok(());
    }

    let rendered = match config {
        ParsedConfig::KeyValue(map) => output::render_plain(&Content::KeyValue(map.clone())),
        ParsedConfig::Json(map) => {
            output::render_plain(&Content::Json(serde_json::Value::Object(map.clone())))
        }
    };
    print!("{}", rendered);
    Ok(())
}

fn handle_decode(
    path: &Path,
    kind: Option<FileKind>,
    no_header: bool,
    delimiter: Option<char>,
    columns: Vec<String>,
    json: bool,
    pretty: bool,
) -> Result<()> {
    let kind = kind.unwrap_or_else(|| FileKind::from_path(path));

    let decoded = if kind == FileKind::Csv {
        let delimiter = match delimiter {
            Some(c) if c.is_ascii() => Some(c as u8),
            Some(c) => anyhow::bail!("Delimiter must be a single ASCII character, got {:?}", c),
            None => None,
        };
        let options = CsvOptions {
            has_header: !no_header,
            delimiter,
            required_columns: columns,
        };
        FileConfigReader::load_csv(path, &options).map(Content::Table)
    } else {
        FileConfigReader::decode(path, kind)
    };
    let content =
        decoded.with_context(|| format!("Failed to decode {} as {}", path.display(), kind))?;

    print_content(&content, json, pretty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_find_with_globals() {
        let cli = Cli::try_parse_from([
            "treeconf",
            "find",
            "db/settings.json",
            "--start",
            "services",
            "-c",
            "boot.conf",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("boot.conf"));
        assert_eq!(cli.kind, ConfKind::KeyValue);
        match cli.command {
            Command::Find {
                name,
                start,
                json,
                raw,
                ..
            } => {
                assert_eq!(name, "db/settings.json");
                assert_eq!(start.as_deref(), Some("services"));
                assert!(json);
                assert!(!raw);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_kind_and_require() {
        let cli = Cli::try_parse_from([
            "treeconf",
            "--kind",
            "json",
            "--require",
            "root,env",
            "config",
        ])
        .unwrap();
        assert_eq!(cli.kind, ConfKind::Json);
        assert_eq!(cli.require, vec!["root", "env"]);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG));
    }

    #[test]
    fn test_unsupported_kind_is_rejected() {
        assert!(Cli::try_parse_from(["treeconf", "--kind", "yaml", "tree"]).is_err());
    }

    #[test]
    fn test_parse_decode_as() {
        let cli = Cli::try_parse_from([
            "treeconf",
            "decode",
            "rows.txt",
            "--as",
            "csv",
            "--no-header",
        ])
        .unwrap();
        match cli.command {
            Command::Decode {
                decode_as,
                no_header,
                ..
            } => {
                assert_eq!(decode_as, Some(FileKind::Csv));
                assert!(no_header);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
