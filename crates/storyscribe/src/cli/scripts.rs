//! Script and version commands.

use super::{OutputFormat, open_session, print_json};
use std::path::Path;
use storyscribe::{
    InputError, SharedWorkshop, StorageError, StorageErrorKind, StoryscribeResult,
    preview_snippet, timestamp,
};

/// List all scripts.
pub async fn list_scripts(workshop: &SharedWorkshop, format: OutputFormat) -> StoryscribeResult<()> {
    let session = workshop.start().await?;
    let scripts = session.scripts();

    match format {
        OutputFormat::Json => print_json(scripts)?,
        OutputFormat::Human => {
            if scripts.is_empty() {
                println!("No scripts yet. Create one with `storyscribe new`.");
                return Ok(());
            }
            println!("{:<18} {:<20} {:<40}", "ID", "UPDATED", "TITLE");
            println!("{:-<80}", "");
            for script in scripts {
                println!(
                    "{:<18} {:<20} {:<40}",
                    script.id(),
                    timestamp::format(script.updated_at()),
                    script.title()
                );
            }
        }
    }
    Ok(())
}

/// Create a script and print its id.
pub async fn create_script(
    workshop: &SharedWorkshop,
    title: Option<String>,
    brief: Option<String>,
) -> StoryscribeResult<()> {
    let mut session = workshop.start().await?;
    let id = workshop.create_script(&mut session, title, brief).await?;
    println!("Created script {}", id);
    Ok(())
}

/// Change a script's title or brief.
pub async fn edit_script(
    workshop: &SharedWorkshop,
    id: &str,
    title: Option<String>,
    brief: Option<String>,
) -> StoryscribeResult<()> {
    let mut session = open_session(workshop, id).await?;
    if workshop.update_script(&mut session, title, brief).await? {
        println!("Updated script {}", id);
    } else {
        println!("No changes to script {}", id);
    }
    Ok(())
}

/// List a script's versions.
pub async fn list_versions(
    workshop: &SharedWorkshop,
    id: &str,
    format: OutputFormat,
) -> StoryscribeResult<()> {
    let session = open_session(workshop, id).await?;
    let versions = session.versions();

    match format {
        OutputFormat::Json => print_json(versions)?,
        OutputFormat::Human => {
            if versions.is_empty() {
                println!("No versions yet. Create one with `storyscribe generate {}`.", id);
                return Ok(());
            }
            println!(
                "{:<4} {:<20} {:<20} {:>8} {:>10}  {}",
                "#", "GENERATED", "MODEL", "TOKENS", "COST", "PREVIEW"
            );
            println!("{:-<100}", "");
            for version in versions {
                println!(
                    "{:<4} {:<20} {:<20} {:>8} {:>10.4}  {}",
                    version.version_number,
                    timestamp::format(&version.timestamp),
                    version.model,
                    version.input_tokens,
                    version.estimated_cost,
                    preview_snippet(version.content.as_deref().unwrap_or_default(), 40)
                        .replace('\n', " ")
                );
            }
        }
    }
    Ok(())
}

/// Print one version in full.
pub async fn show_version(workshop: &SharedWorkshop, id: &str, number: u32) -> StoryscribeResult<()> {
    let session = open_session(workshop, id).await?;
    let version = session
        .version(number)
        .ok_or_else(|| InputError::new(format!("Version {} does not exist", number)))?;

    println!("Version {}", version.version_number);
    println!("{:-<80}", "");
    println!("Generated:   {}", timestamp::format(&version.timestamp));
    println!("Model:       {}", version.model);
    if let Some(temperature) = version.temperature {
        println!("Temperature: {}", temperature);
    }
    println!("Prompt:      {}", version.prompt.as_deref().unwrap_or("-"));
    if !version.context.is_empty() {
        println!("Context:     {}", version.context.join(", "));
    }
    println!(
        "Estimate:    {} input tokens, ${:.4}",
        version.input_tokens, version.estimated_cost
    );
    println!("{:-<80}", "");
    println!("{}", version.content.as_deref().unwrap_or_default());
    Ok(())
}

/// Write a version to `{output}/{title}_{timestamp}.txt`.
pub async fn export_version(
    workshop: &SharedWorkshop,
    id: &str,
    number: u32,
    output: &Path,
) -> StoryscribeResult<()> {
    let session = open_session(workshop, id).await?;
    let export = workshop.export(&session, number)?;
    let path = output.join(export.filename());

    std::fs::write(&path, export.content()).map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    println!("Exported version {} to {}", number, path.display());
    Ok(())
}
