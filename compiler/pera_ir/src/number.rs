//! Canonical number formatting.
//!
//! Numbers are plain `f64`. They print the way the language's reference
//! behaviour prints them: integral values without a fraction, the special
//! values spelled `Infinity`, `-Infinity` and `NaN`.

/// Magnitudes from which numbers switch to exponent notation.
const EXPONENT_THRESHOLD: f64 = 1e21;
/// Non-zero magnitudes below this also use exponent notation.
const SMALL_THRESHOLD: f64 = 1e-6;

/// Render a number in its canonical textual form.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 {
        // covers -0
        return "0".to_owned();
    }
    if n.abs() >= EXPONENT_THRESHOLD || n.abs() < SMALL_THRESHOLD {
        let text = format!("{n:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}
