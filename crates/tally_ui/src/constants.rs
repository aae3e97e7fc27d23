//! Widget defaults and number formatting helpers.

// =============================================================================
// Spinner
// =============================================================================

/// Class applied to every spinner slide
pub const SLIDE_CLASS: &str = "logo__number";

/// Vertical distance between stacked slides, in pixels
pub const SLIDE_HEIGHT: i32 = 142;

/// Time an outgoing slide stays attached after a shift
pub const TRANSITION_MS: u64 = 2000;

/// Tag used for spinner slides
pub const SLIDE_TAG: &str = "div";

// =============================================================================
// Counter
// =============================================================================

pub const DEFAULT_MIN: f64 = 1.0;
pub const DEFAULT_MAX: f64 = 10.0;

pub const DEFAULT_MINUS_CLASS: &str = "counter__button-minus";
pub const DEFAULT_PLUS_CLASS: &str = "counter__button-plus";
pub const DEFAULT_INPUT_CLASS: &str = "counter__input";

/// Class every counter input carries regardless of configuration
pub const COUNTER_VALUE_CLASS: &str = "counter__value";

// =============================================================================
// Numbers
// =============================================================================

/// Magnitudes at or above this print in exponent form
const EXPONENT_ABOVE: f64 = 1e21;

/// Non-zero magnitudes below this print in exponent form
const EXPONENT_BELOW: f64 = 1e-6;

/// Whitespace as browsers trim it: the WhiteSpace and LineTerminator sets.
///
/// Unlike [`char::is_whitespace`] this includes U+FEFF and excludes U+0085.
pub fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// `text` with leading and trailing [`is_js_whitespace`] characters removed
pub fn trim_js(text: &str) -> &str {
    text.trim_matches(is_js_whitespace)
}

/// Format a counter value the way a browser stringifies a number.
///
/// Whole numbers print without a fractional part and negative zero prints as `0`.
/// Very large and very small magnitudes use exponent form (`1e+21`, `1e-7`).
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return String::from("0");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    let magnitude = value.abs();
    if magnitude >= EXPONENT_ABOVE || magnitude < EXPONENT_BELOW {
        // Rust writes `1e21`, browsers write `1e+21`
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => formatted,
        };
    }
    format!("{}", value)
}

/// Convert text to a number following browser `Number(text)` rules.
///
/// Surrounding whitespace is ignored and blank text converts to `0`. Accepts
/// an optional sign, decimal and exponent forms, unsigned `0x`/`0o`/`0b`
/// literals and `Infinity`. Everything else is `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = trim_js(text);
    if trimmed.is_empty() {
        return Some(0.0);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if let Some(radix_value) = parse_radix_literal(trimmed) {
        return radix_value;
    }

    // Rust accepts "inf", "nan" and friends; browsers do not.
    let decimal_chars = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !decimal_chars {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Returns `Some(result)` when `text` carries a radix prefix.
fn parse_radix_literal(text: &str) -> Option<Option<f64>> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let digits = &text[2..];
    if digits.is_empty() {
        return Some(None);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value)
}
