use super::ui;
use crate::converter::Converter;
use crate::core::error::ConverterError;
use anyhow::Result;

const INIT_FAILED_MSG: &str = "Failed to initialize the application. Please try again later.";
const CONVERT_FAILED_MSG: &str = "Conversion failed. Please try again later.";

/// Runs a conversion: initializes the currency set, applies any explicit
/// from/to selection and converts the amount at the live rate.
pub async fn run(
    converter: &mut Converter,
    amount: &str,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    if let Err(e) = converter.init().await {
        println!("{}", ui::style_text(INIT_FAILED_MSG, ui::StyleType::Error));
        return Err(e.into());
    }

    // Explicit codes become the new saved preference pair.
    if from.is_some() || to.is_some() {
        let prefs = converter.preferences().clone();
        let from = from.unwrap_or(&prefs.from_currency).to_string();
        let to = to.unwrap_or(&prefs.to_currency).to_string();
        if let Err(e) = converter.select(&from, &to).await {
            println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
            return Err(e.into());
        }
    }

    let spinner = ui::new_spinner("Converting...");
    let result = converter.convert(amount).await;
    spinner.finish_and_clear();

    let record = match result {
        Ok(record) => record,
        Err(e) => {
            let message = match &e {
                ConverterError::Validation(_) => e.to_string(),
                _ => CONVERT_FAILED_MSG.to_string(),
            };
            println!("{}", ui::style_text(&message, ui::StyleType::Error));
            return Err(e.into());
        }
    };

    let conversion = &record.conversion;
    println!(
        "{}",
        ui::style_text(
            &format!(
                "{} {} = {:.2} {}",
                conversion.amount, conversion.from_currency, conversion.result,
                conversion.to_currency
            ),
            ui::StyleType::ResultValue,
        )
    );
    println!(
        "{}",
        ui::style_text(
            &format!(
                "Exchange rate: 1 {} = {:.4} {}",
                conversion.from_currency, conversion.rate, conversion.to_currency
            ),
            ui::StyleType::Subtle,
        )
    );

    Ok(())
}

/// Exchanges the saved from/to preference pair.
pub async fn swap(converter: &mut Converter) -> Result<()> {
    converter.swap().await?;

    let prefs = converter.preferences();
    println!(
        "Selected currencies: {} -> {}",
        prefs.from_currency, prefs.to_currency
    );
    Ok(())
}
