use regex::Regex;

// Reads an amount the way users type it: optional sign, digits, optional decimal part
// with a dot or a comma. Anything else is not a number.
pub fn parse_amount(text: &str) -> Option<f64> {
    let re = Regex::new(r"^[+-]?\d+(?:[.,]\d+)?$").ok()?;
    let text = text.trim();
    if !re.is_match(text) {
        return None;
    }

    text.replace(',', ".").parse::<f64>().ok()
}

// Outcomes are recorded as negative amounts. Only a positive number is flipped;
// zero, negative numbers and free text pass through untouched.
pub fn signed_amount(text: &str, is_outcome: bool) -> String {
    if !is_outcome {
        return text.to_string();
    }

    match parse_amount(text) {
        Some(amount) if amount > 0.0 => {
            let magnitude = text.trim().trim_start_matches('+');
            format!("-{}", magnitude)
        }
        _ => text.to_string(),
    }
}
