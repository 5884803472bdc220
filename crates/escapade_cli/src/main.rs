//! Escapade demo driver.
//!
//! Assembles a small scene - a fuse box gating a three-step cellar door
//! that also needs a key - then feeds tokens through it and logs every
//! lifecycle notification the engine emits.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use escapade::bind::SequenceDisplay;
use escapade::{
    MemoryInventory, PuzzleDefinition, PuzzleRegistry, capture_registry,
};
use std::path::Path;
use std::rc::Rc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Demo { tokens } => run_demo(tokens),
        Command::Check { path } => check_definitions(&path),
    }
}

/// Runs the scripted cellar scenario.
fn run_demo(tokens: Option<Vec<String>>) -> Result<()> {
    let registry = Rc::new(PuzzleRegistry::new());
    let inventory = MemoryInventory::new();

    registry.register(PuzzleDefinition::new("fuse_box", ["breaker"]));
    let door = registry.register(
        PuzzleDefinition::new("cellar_door", ["left", "right", "left"])
            .with_prerequisites(["fuse_box"])
            .with_required_resources(["iron_key"])
            .with_max_attempts(3)
            .with_reset_on_failure(true)
            .with_hint("The hinges fight back: left, then right, then left again."),
    );

    let display = SequenceDisplay::attach(Rc::clone(&door));
    door.borrow().events().completed.register(|()| {
        info!("the cellar door swings open");
    });
    door.borrow().events().failed.register(|()| {
        warn!("the mechanism jams");
    });

    // Gated on both sides to start with.
    info!("trying the door with no power and no key");
    assert_no_advance(&registry, &inventory);

    info!("flipping the breaker");
    registry.advance("fuse_box", "breaker", &inventory);

    info!("trying the door with power but no key");
    assert_no_advance(&registry, &inventory);

    info!("picking up the iron key");
    inventory.grant("iron_key");

    if let Some(hint) = door.borrow().request_hint() {
        info!(hint, "examining the door");
    }

    let tokens = tokens.unwrap_or_else(|| {
        vec!["left".to_owned(), "right".to_owned(), "left".to_owned()]
    });
    for token in &tokens {
        let advanced = registry.advance("cellar_door", token, &inventory);
        let door = door.borrow();
        let raised = display.raised_count();
        info!(
            token,
            advanced,
            state = %door.current_state(),
            progress = door.progress(),
            raised,
            "submitted token"
        );
    }

    let save = capture_registry(&registry);
    let raw = save.to_json().context("encoding save data")?;
    info!(puzzles = save.len(), "final save data:\n{raw}");

    Ok(())
}

fn assert_no_advance(registry: &PuzzleRegistry, inventory: &MemoryInventory) {
    let advanced = registry.advance("cellar_door", "left", inventory);
    info!(advanced, "gate check");
}

/// Parses a definitions file and summarizes each puzzle.
fn check_definitions(path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let definitions: Vec<PuzzleDefinition> =
        serde_json::from_str(&raw).context("parsing puzzle definitions")?;

    for def in &definitions {
        info!(
            id = def.id(),
            steps = def.sequence().len(),
            prerequisites = def.prerequisites().len(),
            resources = def.required_resources().len(),
            max_attempts = def.max_attempts(),
            reset_on_failure = def.reset_on_failure(),
            has_hint = def.hint().is_some(),
            "definition ok"
        );
    }
    info!(count = definitions.len(), "all definitions parsed");

    Ok(())
}
