//! Preview and generate commands.

use super::{DraftArgs, OutputFormat, open_session, print_json};
use storyscribe::{GenerationRequest, Preview, Session, SharedWorkshop, StoryscribeResult};

fn prepare(session: &mut Session, draft: &DraftArgs) -> StoryscribeResult<GenerationRequest> {
    session.select_versions(draft.context.iter().copied())?;
    Ok(GenerationRequest {
        prompt: draft.prompt.clone(),
        model: draft.model,
        temperature: draft.temperature,
    })
}

fn print_preview(preview: &Preview) {
    println!(
        "Model: {}  Temperature: {}",
        preview.model(),
        preview.temperature().value()
    );
    println!("{:-<80}", "");
    println!("{:<32} {:>10}", "System Prompt", preview.system_tokens());
    for part in preview.parts() {
        println!("{:<32} {:>10}", part.label(), part.tokens());
    }
    println!("{:-<80}", "");
    println!("{:<32} {:>10}", "Input tokens", preview.input_tokens());
    println!(
        "{:<32} {:>10}",
        "Estimated output tokens",
        preview.estimated_output_tokens()
    );
    println!("{:<32} {:>10.4}", "Estimated cost (USD)", preview.estimated_cost());
    println!("{:<32} {:>10}", "Context window", preview.context_window());
    println!("{:<32} {:>10}", "Remaining tokens", preview.remaining_tokens());
    if *preview.exceeds_context() {
        println!();
        println!("This request exceeds the model's context window and will not be sent.");
    }
}

/// Show what a request would send and cost.
pub async fn preview_request(
    workshop: &SharedWorkshop,
    id: &str,
    draft: &DraftArgs,
    format: OutputFormat,
) -> StoryscribeResult<()> {
    let mut session = open_session(workshop, id).await?;
    let request = prepare(&mut session, draft)?;
    let preview = workshop.preview(&session, &request)?;

    match format {
        OutputFormat::Json => print_json(&preview)?,
        OutputFormat::Human => print_preview(&preview),
    }
    Ok(())
}

/// Generate and save a new version, then print it.
pub async fn generate_version(
    workshop: &SharedWorkshop,
    id: &str,
    draft: &DraftArgs,
) -> StoryscribeResult<()> {
    let mut session = open_session(workshop, id).await?;
    let request = prepare(&mut session, draft)?;
    let version = workshop.generate(&mut session, &request).await?;

    println!(
        "Version {} ({} input tokens, ${:.4})",
        version.version_number, version.input_tokens, version.estimated_cost
    );
    println!("{:-<80}", "");
    println!("{}", version.content.as_deref().unwrap_or_default());
    Ok(())
}
