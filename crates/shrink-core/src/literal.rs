//! Literal rendering: quoted strings and canonical numbers.

/// Escape `s` for a double-quoted JavaScript string literal.
///
/// Printable ASCII passes through. NUL and the non-characters U+FFFE/U+FFFF
/// are always hex-escaped; other non-printables only when `escape_unicode`,
/// astral characters then becoming a `\u` surrogate pair.
pub fn escape_string(s: &str, escape_unicode: bool) -> String {
    let units: Vec<u16> = s.encode_utf16().collect();
    escape_units(&units, escape_unicode)
}

/// Same as [`escape_string`] over raw UTF-16 units. An unpaired surrogate
/// is always written as `\uXXXX`.
pub fn escape_units(units: &[u16], escape_unicode: bool) -> String {
    let mut out = String::with_capacity(units.len() + 2);
    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(ch) => escape_char(&mut out, ch, escape_unicode),
            Err(lone) => out.push_str(&format!("\\u{:04x}", lone.unpaired_surrogate())),
        }
    }
    out
}

fn escape_char(out: &mut String, ch: char, escape_unicode: bool) {
    let c = ch as u32;
    if (0x20..=0x7E).contains(&c) && ch != '"' && ch != '\\' {
        out.push(ch);
        return;
    }
    let short = match ch {
        '\u{8}' => Some('b'),
        '\u{C}' => Some('f'),
        '\n' => Some('n'),
        '\r' => Some('r'),
        '\t' => Some('t'),
        '\u{B}' => Some('v'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        _ => None,
    };
    if let Some(escape) = short {
        out.push('\\');
        out.push(escape);
    } else if escape_unicode || c == 0 || c == 0xFFFE || c == 0xFFFF {
        let mut pair = [0u16; 2];
        for unit in ch.encode_utf16(&mut pair) {
            if *unit < 256 {
                out.push_str(&format!("\\x{:02x}", unit));
            } else {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    } else {
        out.push(ch);
    }
}

/// Render a number the way ECMAScript `Number.prototype.toString()` does.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value == 0.0 {
        return "0".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity".into() } else { "-Infinity".into() };
    }

    let sign = if value < 0.0 { "-" } else { "" };
    // `{:e}` yields the shortest round-trip digits.
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let k = digits.len() as i32;
    let n = exponent + 1;
    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        format!("{}.{}", &digits[..n as usize], &digits[n as usize..])
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let e_sign = if e >= 0 { '+' } else { '-' };
        if k == 1 {
            format!("{}e{}{}", digits, e_sign, e.abs())
        } else {
            format!("{}.{}e{}{}", &digits[..1], &digits[1..], e_sign, e.abs())
        }
    };
    format!("{}{}", sign, body)
}
