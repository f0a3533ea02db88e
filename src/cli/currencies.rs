use super::ui;
use crate::converter::Converter;
use anyhow::Result;

const CODES_PER_ROW: usize = 10;

/// Lists the selectable currency codes, alphabetically ordered.
pub async fn run(converter: &mut Converter) -> Result<()> {
    if let Err(e) = converter.init().await {
        println!(
            "{}",
            ui::style_text(
                "Failed to initialize the application. Please try again later.",
                ui::StyleType::Error,
            )
        );
        return Err(e.into());
    }

    println!(
        "{}",
        ui::style_text("Available currencies", ui::StyleType::Title)
    );
    for row in converter.currencies().chunks(CODES_PER_ROW) {
        println!("{}", row.join("  "));
    }

    let prefs = converter.preferences();
    println!(
        "{}",
        ui::style_text(
            &format!(
                "Selected: {} -> {}",
                prefs.from_currency, prefs.to_currency
            ),
            ui::StyleType::Subtle,
        )
    );
    Ok(())
}
