//! Text rendering of price breakdowns
//!
//! Rendering never fails: any field that is missing or not usable as a
//! number is shown as [`PLACEHOLDER`].

use serde_json::{Map, Value};

use crate::appraisal::Appraisal;
use crate::pricing::PriceBreakdown;

pub const PLACEHOLDER: &str = "?";
pub const CURRENCY: &str = "₹";

/// Format a price with `,` thousands separators
pub fn format_price(value: Option<&Value>) -> String {
    match value.and_then(price_as_integer) {
        Some(price) => group_thousands(price),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format a free-form field verbatim
pub fn format_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn price_as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// Render the breakdown lines shared by fresh results and history entries
pub fn render_breakdown(breakdown: &Map<String, Value>) -> String {
    format!(
        "Model Confidence: {}%\n\
         Base Price: {currency}{}\n\
         Condition ({}): {}\n\
         Price after Condition: {currency}{}\n\
         Confidence Adjustment: {}\n\
         Final Price: {currency}{}",
        format_text(breakdown.get("confidence")),
        format_price(breakdown.get("base_price")),
        format_text(breakdown.get("condition")),
        format_text(breakdown.get("condition_adjustment")),
        format_price(breakdown.get("price_after_condition")),
        format_text(breakdown.get("confidence_adjustment")),
        format_price(breakdown.get("final_price")),
        currency = CURRENCY,
    )
}

/// Render a breakdown produced by the local estimator
pub fn render_price_breakdown(breakdown: &PriceBreakdown) -> String {
    match serde_json::to_value(breakdown) {
        Ok(Value::Object(map)) => render_breakdown(&map),
        _ => render_breakdown(&Map::new()),
    }
}

/// Render a completed appraisal
pub fn render_appraisal(appraisal: &Appraisal) -> String {
    format!(
        "Name: {}\nDescription: {}\n{}",
        appraisal.name,
        appraisal.description,
        render_breakdown(&appraisal.breakdown)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_price_groups_thousands() {
        assert_eq!(format_price(Some(&json!(2280300))), "2,280,300");
        assert_eq!(format_price(Some(&json!(2062))), "2,062");
        assert_eq!(format_price(Some(&json!(999))), "999");
        assert_eq!(format_price(Some(&json!(0))), "0");
        assert_eq!(format_price(Some(&json!(-1500))), "-1,500");
    }

    #[test]
    fn test_format_price_coerces_like_int() {
        assert_eq!(format_price(Some(&json!(2062.9))), "2,062");
        assert_eq!(format_price(Some(&json!("12000"))), "12,000");
    }

    #[test]
    fn test_format_price_placeholder() {
        assert_eq!(format_price(None), "?");
        assert_eq!(format_price(Some(&json!(null))), "?");
        assert_eq!(format_price(Some(&json!("about 5k"))), "?");
        assert_eq!(format_price(Some(&json!({"amount": 5}))), "?");
    }

    #[test]
    fn test_format_text() {
        assert_eq!(format_text(Some(&json!("-25%"))), "-25%");
        assert_eq!(format_text(Some(&json!(95.0))), "95.0");
        assert_eq!(format_text(None), "?");
    }

    #[test]
    fn test_render_price_breakdown() {
        let breakdown = crate::pricing::PriceEstimator::default().estimate("sports_car", 0.95, "New");
        let rendered = render_price_breakdown(&breakdown);
        assert!(rendered.contains("Model Confidence: 95.0%"));
        assert!(rendered.contains("Base Price: ₹1,900,250"));
        assert!(rendered.contains("Condition (New): 0%"));
        assert!(rendered.contains("Confidence Adjustment: +20%"));
        assert!(rendered.ends_with("Final Price: ₹2,280,300"));
    }

    #[test]
    fn test_render_breakdown_line_layout() {
        let rendered = render_breakdown(&Map::new());
        assert_eq!(
            rendered,
            "Model Confidence: ?%\n\
             Base Price: ₹?\n\
             Condition (?): ?\n\
             Price after Condition: ₹?\n\
             Confidence Adjustment: ?\n\
             Final Price: ₹?"
        );
    }

    #[test]
    fn test_render_breakdown_with_missing_fields() {
        let breakdown = json!({
            "confidence": 50.0,
            "base_price": "n/a",
            "condition": "Used",
            "condition_adjustment": "-25%",
            "final_price": 2062
        });

        let rendered = render_breakdown(breakdown.as_object().unwrap());
        assert!(rendered.contains("Model Confidence: 50.0%"));
        assert!(rendered.contains("Base Price: ₹?"));
        assert!(rendered.contains("Condition (Used): -25%"));
        assert!(rendered.contains("Price after Condition: ₹?"));
        assert!(rendered.contains("Confidence Adjustment: ?"));
        assert!(rendered.contains("Final Price: ₹2,062"));
    }
}
