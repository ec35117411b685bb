use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use tokio::io::BufReader;

use lexicon_server::{LexiconServer, ServerConfig};
use lexicon_store::{normalize_word, Dictionary, FileDictionary};

use crate::cli::*;
use crate::menu;
use crate::queue::Outcome;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let data_file = cli.data_file();
    let mut stdout = std::io::stdout();
    match cli.command {
        None | Some(Command::Menu) => cmd_menu(data_file).await,
        Some(Command::Add(args)) => cmd_add(&FileDictionary::open(data_file), args, &mut stdout),
        Some(Command::Define(args)) => cmd_define(&FileDictionary::open(data_file), args, &mut stdout),
        Some(Command::Remove(args)) => cmd_remove(&FileDictionary::open(data_file), args, &mut stdout),
        Some(Command::List(args)) => cmd_list(&FileDictionary::open(data_file), args, &mut stdout),
        Some(Command::Serve(args)) => cmd_serve(cli.file, args).await,
    }
}

async fn cmd_menu(data_file: PathBuf) -> anyhow::Result<()> {
    let dictionary = Arc::new(FileDictionary::open(data_file));
    let input = BufReader::new(tokio::io::stdin());
    menu::run_menu(dictionary, input, &mut std::io::stdout(), print_outcome).await
}

fn print_outcome(outcome: Outcome) {
    if outcome.error.is_some() {
        println!("{} {outcome}", "!".yellow().bold());
    } else {
        println!("{} {outcome}", "✓".green());
    }
}

fn word_arg(raw: &str) -> anyhow::Result<String> {
    normalize_word(raw).context("word must not be empty")
}

fn cmd_add<W: Write>(dictionary: &dyn Dictionary, args: AddArgs, out: &mut W) -> anyhow::Result<()> {
    let word = word_arg(&args.word)?;
    let definition = args.definition();
    match dictionary.add(&word, definition.trim()) {
        Ok(()) => writeln!(out, "{} Word added successfully!", "✓".green())?,
        Err(e) if e.is_persistence() => {
            writeln!(out, "{} Word added, but the dictionary could not be saved: {e}", "!".yellow().bold())?
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn cmd_define<W: Write>(dictionary: &dyn Dictionary, args: WordArgs, out: &mut W) -> anyhow::Result<()> {
    let word = word_arg(&args.word)?;
    let entry = dictionary.get(&word)?;
    writeln!(out, "{}: {}", word.bold(), entry)?;
    Ok(())
}

fn cmd_remove<W: Write>(dictionary: &dyn Dictionary, args: WordArgs, out: &mut W) -> anyhow::Result<()> {
    let word = word_arg(&args.word)?;
    match dictionary.remove(&word) {
        Ok(true) => writeln!(out, "{} Word removed successfully!", "✓".green())?,
        Ok(false) => writeln!(out, "{} was not in the dictionary.", word.bold())?,
        Err(e) if e.is_persistence() => {
            writeln!(out, "{} Word removed, but the dictionary could not be saved: {e}", "!".yellow().bold())?
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn cmd_list<W: Write>(dictionary: &dyn Dictionary, args: ListArgs, out: &mut W) -> anyhow::Result<()> {
    match args.format {
        OutputFormat::Text => menu::print_entries(dictionary, out),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&dictionary.list())?;
            writeln!(out, "{json}")?;
            Ok(())
        }
    }
}

async fn cmd_serve(file: Option<PathBuf>, args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_toml_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(file) = file {
        config.data_file = file;
    }
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    println!(
        "Lexicon server on {} (file: {})",
        config.bind_addr.to_string().bold(),
        config.data_file.display()
    );
    LexiconServer::new(config).serve().await?;
    Ok(())
}
