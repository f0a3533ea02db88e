use super::ui;
use crate::converter::Converter;
use anyhow::Result;
use chrono::{DateTime, Local, Utc};

/// Timestamps are stored in UTC and shown in the user's local time.
fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Renders the persisted conversion history, newest first.
pub async fn run(converter: &Converter) -> Result<()> {
    let history = converter.history().await;

    println!(
        "{}",
        ui::style_text("Conversion History", ui::StyleType::Title)
    );

    if history.is_empty() {
        println!(
            "{}",
            ui::style_text("No conversion history yet", ui::StyleType::Subtle)
        );
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("When"),
        ui::header_cell("From"),
        ui::header_cell("Amount"),
        ui::header_cell("To"),
        ui::header_cell("Result"),
        ui::header_cell("Rate"),
    ]);

    for record in &history {
        let conversion = &record.conversion;
        table.add_row(vec![
            comfy_table::Cell::new(format_timestamp(&record.timestamp)),
            comfy_table::Cell::new(&conversion.from_currency),
            ui::amount_cell(format!("{}", conversion.amount)),
            comfy_table::Cell::new(&conversion.to_currency),
            ui::amount_cell(format!("{:.2}", conversion.result)),
            ui::amount_cell(format!("{:.4}", conversion.rate)),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Deletes the persisted history.
pub async fn clear(converter: &mut Converter) -> Result<()> {
    converter.clear_history().await?;
    println!("Conversion history cleared");
    Ok(())
}
