//! Model catalog command.

use super::{OutputFormat, print_json};
use storyscribe::{SharedWorkshop, StoryscribeResult};

/// List configured models with pricing and published rate limits.
pub fn list_models(workshop: &SharedWorkshop, format: OutputFormat) -> StoryscribeResult<()> {
    let overviews = workshop
        .catalog()
        .specs()
        .map(|spec| workshop.model_overview(*spec.model()))
        .collect::<StoryscribeResult<Vec<_>>>()?;

    match format {
        OutputFormat::Json => print_json(&overviews)?,
        OutputFormat::Human => {
            for overview in &overviews {
                let spec = &overview.spec;
                println!("{}", spec.model());
                println!("{:-<80}", "");
                println!("  Quality:        {}", spec.quality());
                println!("  Context window: {} tokens", spec.context_window());
                println!(
                    "  Price:          ${} input / ${} output per million tokens",
                    spec.pricing().input_per_million,
                    spec.pricing().output_per_million
                );
                for row in &overview.rate_limits {
                    println!("  {:<4} {:>12}  {}", row.name, row.value, row.description);
                }
                println!();
            }
        }
    }
    Ok(())
}
