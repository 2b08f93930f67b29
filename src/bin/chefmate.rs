// ABOUTME: ChefMate interactive terminal session for building ingredient lists and generating recipes
// ABOUTME: Drives the workspace, pipeline, and history store over a line-oriented command loop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChefMate Contributors
//!
//! Usage:
//! ```bash
//! # Interactive session with on-disk history
//! GEMINI_API_KEY=... chefmate
//!
//! # Keep history in memory only
//! chefmate --memory
//!
//! # Override the backend model order
//! chefmate --models gemini-1.5-flash,gemini-pro
//! ```
//!
//! Session commands: `add <ingredient>`, `remove <ingredient>`, `clear`,
//! `list`, `cuisine <value>`, `meal <value>`, `diet <value>`, `generate`,
//! `history`, `load <n>`, `delete <n>`, `help`, `quit`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;

use chefmate::config::AppConfig;
use chefmate::errors::AppResult;
use chefmate::history::RecipeHistoryStore;
use chefmate::llm::GeminiProvider;
use chefmate::pipeline::{BackendDescriptor, RecipeRequestPipeline};
use chefmate::storage::{FileStore, KeyValueStore, MemoryStore};
use chefmate::workspace::RecipeWorkspace;

#[derive(Parser)]
#[command(
    name = "chefmate",
    about = "AI recipe suggestions from the ingredients you have",
    version
)]
struct Cli {
    /// History file override
    #[arg(long)]
    history_path: Option<PathBuf>,

    /// Keep history in memory only (nothing written to disk)
    #[arg(long)]
    memory: bool,

    /// Comma-separated backend model order override
    #[arg(long)]
    models: Option<String>,
}

struct Session {
    workspace: RecipeWorkspace,
    pipeline: RecipeRequestPipeline,
    history: RecipeHistoryStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    chefmate::logging::init_logging()?;
    let cli = Cli::parse();

    let config = AppConfig::from_env()?;
    let provider = Arc::new(GeminiProvider::new(config.api_key.clone()));

    let mut backends = config.backends.clone();
    if let Some(models) = &cli.models {
        backends = models
            .split(',')
            .map(str::trim)
            .filter(|model| !model.is_empty())
            .map(BackendDescriptor::new)
            .collect();
    }

    let pipeline = RecipeRequestPipeline::new(provider)
        .with_backends(backends)
        .with_retry_policy(config.retry);

    let store: Arc<dyn KeyValueStore> = if cli.memory {
        Arc::new(MemoryStore::new())
    } else {
        let path = cli.history_path.unwrap_or(config.history_path);
        Arc::new(FileStore::open(path)?)
    };

    let mut session = Session {
        workspace: RecipeWorkspace::new(),
        pipeline,
        history: RecipeHistoryStore::new(store),
    };

    println!("ChefMate — type ingredients, then `generate`. `help` lists commands.");
    run_loop(&mut session).await?;
    Ok(())
}

async fn run_loop(session: &mut Session) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => {}
            "add" => match session.workspace.add_ingredient(rest) {
                Ok(()) => println!("Added {}.", rest.trim()),
                Err(e) => println!("{e}"),
            },
            "remove" => {
                session.workspace.remove_ingredient(rest.trim());
                println!("Removed {} (if present).", rest.trim());
            }
            "clear" => {
                session.workspace.clear_all();
                println!("Cleared ingredients and preferences.");
            }
            "list" => print_ingredients(&session.workspace),
            "cuisine" => {
                session.workspace.preferences_mut().cuisine = rest.trim().to_owned();
                println!("Cuisine set to {}.", rest.trim());
            }
            "meal" => {
                session.workspace.preferences_mut().meal_type = rest.trim().to_owned();
                println!("Meal type set to {}.", rest.trim());
            }
            "diet" => {
                session.workspace.preferences_mut().dietary_restrictions = rest.trim().to_owned();
                println!("Dietary restrictions set to {}.", rest.trim());
            }
            "generate" => generate(session).await,
            "history" => print_history(session)?,
            "load" => load_entry(session, rest)?,
            "delete" => delete_entry(session, rest)?,
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("Unknown command {other:?}. Try `help`."),
        }
    }
    Ok(())
}

async fn generate(session: &mut Session) {
    let ingredients = session.workspace.ingredients().items().to_vec();
    let preferences = session.workspace.preferences().selection();

    session.workspace.begin_generation();
    println!("Generating recipe...");

    let outcome = session
        .pipeline
        .generate(&ingredients, &preferences)
        .await
        .map_err(|e| e.message);

    session.workspace.finish_generation(outcome);

    if let Some(recipe) = session.workspace.current_recipe() {
        if !session.workspace.is_loading() && session.workspace.error().is_none() {
            println!("\n{recipe}\n");
            // Persistence is best effort; a full disk should not lose the recipe on screen.
            match session.history.save(recipe) {
                Ok(entry) => println!("Saved to history as \"{}\".", entry.title),
                Err(e) => warn!(error = %e, "Failed to save recipe to history"),
            }
        }
    }
    if let Some(error) = session.workspace.error() {
        println!("{error}");
    }
}

fn print_ingredients(workspace: &RecipeWorkspace) {
    if workspace.ingredients().is_empty() {
        println!("No ingredients yet. Add some with `add <ingredient>`.");
        return;
    }
    for item in workspace.ingredients().items() {
        println!("- {item}");
    }
}

fn print_history(session: &Session) -> AppResult<()> {
    let entries = session.history.list()?;
    if entries.is_empty() {
        println!("No saved recipes.");
        return Ok(());
    }
    for (index, entry) in entries.iter().enumerate() {
        let saved = entry
            .saved_at()
            .map_or_else(String::new, |at| format!(" ({})", at.format("%Y-%m-%d %H:%M")));
        println!("{}. {}{saved}", index + 1, entry.title);
    }
    Ok(())
}

fn load_entry(session: &mut Session, rest: &str) -> AppResult<()> {
    let entries = session.history.list()?;
    match parse_index(rest, entries.len()) {
        Some(index) => {
            session.workspace.load_recipe(&entries[index].text);
            println!("\n{}\n", entries[index].text);
            println!("Ingredients repopulated from the recipe.");
        }
        None => println!("Usage: load <n> where n is a history number."),
    }
    Ok(())
}

fn delete_entry(session: &Session, rest: &str) -> AppResult<()> {
    let entries = session.history.list()?;
    match parse_index(rest, entries.len()) {
        Some(index) => {
            session.history.delete(&entries[index].id)?;
            println!("Deleted \"{}\".", entries[index].title);
        }
        None => println!("Usage: delete <n> where n is a history number."),
    }
    Ok(())
}

fn parse_index(rest: &str, len: usize) -> Option<usize> {
    let number: usize = rest.trim().parse().ok()?;
    if number >= 1 && number <= len {
        Some(number - 1)
    } else {
        None
    }
}

fn print_help() {
    println!(
        "Commands:\n  \
         add <ingredient>     add an ingredient\n  \
         remove <ingredient>  remove an ingredient\n  \
         clear                clear ingredients and preferences\n  \
         list                 show the current ingredients\n  \
         cuisine <value>      set cuisine preference (Any to unset)\n  \
         meal <value>         set meal type (Any to unset)\n  \
         diet <value>         set dietary restrictions (blank to unset)\n  \
         generate             ask for a recipe\n  \
         history              list saved recipes\n  \
         load <n>             load a saved recipe into the workspace\n  \
         delete <n>           delete a saved recipe\n  \
         quit                 exit"
    );
}
