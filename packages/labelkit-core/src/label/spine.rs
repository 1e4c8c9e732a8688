//! Spine label helpers: call number stacking and the short barcode form.

/// Leading characters of a barcode that never appear on a spine label.
const SPINE_PREFIX_LEN: usize = 4;

/// Short bracketed form of `barcode` shown on spine labels.
///
/// Drops the first four characters when the barcode is longer than four,
/// strips leading zeros, and wraps what is left in brackets. Returns an
/// empty string when nothing is left.
///
/// ```
/// use labelkit_core::label::spine_barcode_text;
///
/// assert_eq!(spine_barcode_text("111000000072"), "[72]");
/// assert_eq!(spine_barcode_text("0000"), "");
/// ```
pub fn spine_barcode_text(barcode: &str) -> String {
    let rest = if barcode.chars().count() > SPINE_PREFIX_LEN {
        barcode
            .char_indices()
            .nth(SPINE_PREFIX_LEN)
            .map(|(i, _)| &barcode[i..])
            .unwrap_or_default()
    } else {
        barcode
    };

    let digits = rest.trim_start_matches('0');
    if digits.is_empty() {
        String::new()
    } else {
        format!("[{}]", digits)
    }
}

/// Whitespace-separated call number tokens, top to bottom.
pub fn call_number_lines(call_number: &str) -> Vec<&str> {
    call_number.split_whitespace().collect()
}
