//! Case-insensitive and numeric-aware string ordering.
//!
//! Characters are ranked punctuation < digits < letters, letters compare
//! case-insensitively first. Equal strings under that ordering fall back
//! to a case pass that places lowercase before uppercase.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Orders text without treating digit runs as numbers.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    compare(a, b, false)
}

/// Orders text with digit runs compared by numeric value, so `"9" < "10"`.
pub fn compare_natural(a: &str, b: &str) -> Ordering {
    compare(a, b, true)
}

fn compare(a: &str, b: &str, numeric: bool) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let (ca, cb) = match (left.peek(), right.peek()) {
            (None, None) => return tie_break(a, b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(&ca), Some(&cb)) => (ca, cb),
        };

        if numeric && ca.is_ascii_digit() && cb.is_ascii_digit() {
            let ord = compare_digit_runs(&mut left, &mut right);
            if ord != Ordering::Equal {
                return ord;
            }
            continue;
        }

        let ord = primary_key(ca).cmp(&primary_key(cb));
        if ord != Ordering::Equal {
            return ord;
        }
        left.next();
        right.next();
    }
}

fn primary_key(c: char) -> (u8, char) {
    let class = if c.is_ascii_digit() || c.is_numeric() {
        1
    } else if c.is_alphanumeric() {
        2
    } else {
        0
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

fn compare_digit_runs(left: &mut Peekable<Chars<'_>>, right: &mut Peekable<Chars<'_>>) -> Ordering {
    let a = take_digits(left);
    let b = take_digits(right);
    let a_value = a.trim_start_matches('0');
    let b_value = b.trim_start_matches('0');
    a_value
        .len()
        .cmp(&b_value.len())
        .then_with(|| a_value.cmp(b_value))
}

// Strings equal at the primary level: lowercase sorts before uppercase,
// then plain code point order.
fn tie_break(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        return match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => ca.cmp(&cb),
        };
    }
    a.len().cmp(&b.len())
}
