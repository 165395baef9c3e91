use num_traits::Num;

/// Parses a numeric literal by prefix: `0x` hex, `0b` binary, otherwise
/// decimal. Returns `None` when the digits do not fit `T` or are malformed.
pub fn parse<T: Num>(s: &str) -> Option<T> {
    let (digits, radix) = if let Some(hex) = s.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(bin) = s.strip_prefix("0b") {
        (bin, 2)
    } else {
        (s, 10)
    };
    if digits.is_empty() || digits.starts_with(|c: char| c == '+' || c == '-') {
        return None;
    }
    T::from_str_radix(digits, radix).ok()
}

/// Like [`parse`], but also accepts a leading `-` on decimal values.
pub fn parse_signed(s: &str) -> Option<i64> {
    match s.strip_prefix('-') {
        Some(rest) if !rest.starts_with("0x") && !rest.starts_with("0b") => {
            parse::<i64>(rest).map(|v| -v)
        }
        Some(_) => None,
        None => parse::<i64>(s),
    }
}

/// Low byte of `v`, plus whether anything was lost. Negative values in
/// `-128..0` wrap to their two's complement byte without loss.
pub fn to_byte(v: i64) -> (u8, bool) {
    let fits = (-128..=255).contains(&v);
    (v as u8, !fits)
}
