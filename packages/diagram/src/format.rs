//! Number formatting for stack sizes and info text.


/// Format an integer with thousands separators, e.g. `1,234,567`.
pub fn format_int(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a float with two decimal places.
pub fn format_double(d: f64) -> String {
    format!("{:.2}", d)
}


#[test]
fn test_format_int() {
    assert_eq!(format_int(0), "0");
    assert_eq!(format_int(999), "999");
    assert_eq!(format_int(1000), "1,000");
    assert_eq!(format_int(1234567), "1,234,567");
    assert_eq!(format_int(-144000), "-144,000");
}

#[test]
fn test_format_double() {
    assert_eq!(format_double(1.0), "1.00");
    assert_eq!(format_double(2.345), "2.35");
}
