//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storyscribe binary.

mod commands;
mod draft;
mod models;
mod scripts;
mod serve;

pub use commands::{Cli, Commands, DraftArgs, OutputFormat};
pub use draft::{generate_version, preview_request};
pub use models::list_models;
pub use scripts::{create_script, edit_script, export_version, list_scripts, list_versions, show_version};
pub use serve::serve;

use storyscribe::{ScriptId, Session, SharedWorkshop, StoryscribeResult};

/// Start a session with `id` open.
async fn open_session(workshop: &SharedWorkshop, id: &str) -> StoryscribeResult<Session> {
    let mut session = workshop.start().await?;
    workshop.open_script(&mut session, &ScriptId::new(id)).await?;
    Ok(session)
}

/// Print a value as pretty JSON.
fn print_json<T: serde::Serialize>(value: &T) -> StoryscribeResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| storyscribe::JsonError::new(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
