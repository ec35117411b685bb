use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use lexicon_server::config::DEFAULT_DATA_FILE;

#[derive(Parser)]
#[command(
    name = "lexicon",
    about = "Lexicon: a file-backed word/definition store",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Backing JSON file [default: dictionary.json]
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Backing file to use when no server config overrides it.
    pub fn data_file(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Interactive numbered menu (the default)
    Menu,
    /// Add or replace a word's definition
    Add(AddArgs),
    /// Show a word's definition
    Define(WordArgs),
    /// Remove a word
    Remove(WordArgs),
    /// List every word and its definition
    List(ListArgs),
    /// Serve the dictionary over HTTP
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct AddArgs {
    pub word: String,
    /// Definition text; multiple arguments are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub definition: Vec<String>,
}

impl AddArgs {
    pub fn definition(&self) -> String {
        self.definition.join(" ")
    }
}

#[derive(Args)]
pub struct WordArgs {
    pub word: String,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on [default: 127.0.0.1:8080]
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// TOML server config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}
