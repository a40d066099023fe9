use std::path::Path;

/// Reference intake the calorie progress bar is measured against.
pub const DEFAULT_CALORIE_REFERENCE: f64 = 2000.0;

/// Load `.env` from the crate directory and then the working directory.
pub fn init() {
    let _ = dotenvy::from_path(Path::new(
        format!("{}/.env", env!("CARGO_MANIFEST_DIR")).as_str(),
    ));
    dotenvy::dotenv().ok();
}

/// `MEALPLAN_CALORIE_REFERENCE` when set to a positive number, else the default.
pub fn calorie_reference() -> f64 {
    match std::env::var("MEALPLAN_CALORIE_REFERENCE") {
        Ok(raw) => parse_reference(&raw).unwrap_or_else(|err| {
            tracing::warn!(
                event = "config.invalid_value",
                domain = "config",
                key = "MEALPLAN_CALORIE_REFERENCE",
                error = %err
            );
            DEFAULT_CALORIE_REFERENCE
        }),
        Err(_) => DEFAULT_CALORIE_REFERENCE,
    }
}

/// Parses a strictly positive, finite reference value.
pub fn parse_reference(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{raw:?} is not a number"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{raw:?} must be a positive number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_must_be_positive() {
        assert_eq!(parse_reference(" 2500 ").unwrap(), 2500.0);
        assert!(parse_reference("0").is_err());
        assert!(parse_reference("-1").is_err());
        assert!(parse_reference("NaN").is_err());
        assert!(parse_reference("lots").is_err());
    }
}
