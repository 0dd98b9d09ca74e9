/// Decode a small, explicitly limited subset of HTML character references.
///
/// Contract:
/// - Named references decoded: see `NAMED_ENTITIES`. Each must be semicolon-terminated.
/// - Numeric references decoded only when well-formed and semicolon-terminated:
///   `&#38;` (decimal) and `&#x26;` (hex).
/// - Only valid Unicode scalar values decode; invalid scalars pass through unchanged.
/// - Missing semicolons, unknown names, malformed numerics, or overlong digit runs are left
///   unchanged.
///
/// Link rewriting re-encodes only `&` (as `&amp;`) when matching decoded attribute values
/// against raw source text. A value written with any other reference (`&#38;`, `&quot;`,
/// `&lt;`, ...) decodes here but is not found again in the raw text, so its link is left
/// unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    if memchr::memchr(b'&', bytes).is_none() {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    let mut copy_start = 0;

    while i < bytes.len() {
        let Some(rel) = memchr::memchr(b'&', &bytes[i..]) else {
            break;
        };
        i += rel;

        // Flush bytes up to '&' unchanged (preserves UTF-8).
        out.push_str(&s[copy_start..i]);

        match decode_reference_at(s, i) {
            Some((ch, consumed)) => {
                out.push(ch);
                i += consumed;
            }
            None => {
                out.push('&');
                i += 1;
            }
        }
        copy_start = i;
    }

    out.push_str(&s[copy_start..]);
    out
}

const NAMED_ENTITIES: &[(&[u8], char)] = &[
    (b"amp;", '&'),
    (b"lt;", '<'),
    (b"gt;", '>'),
    (b"quot;", '"'),
    (b"apos;", '\''),
    (b"nbsp;", '\u{00A0}'),
];

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

/// Decode the reference starting at the `&` at `start`, returning the character and the
/// number of bytes consumed (including `&` and `;`).
fn decode_reference_at(s: &str, start: usize) -> Option<(char, usize)> {
    let rest = &s.as_bytes()[start + 1..];

    for (name, ch) in NAMED_ENTITIES {
        if rest.starts_with(name) {
            return Some((*ch, 1 + name.len()));
        }
    }

    let after_hash = rest.strip_prefix(b"#")?;
    let (digits_start, is_hex) = match after_hash.first() {
        Some(b'x' | b'X') => (2, true),
        _ => (1, false),
    };
    let max_digits = if is_hex { MAX_HEX_DIGITS } else { MAX_DEC_DIGITS };
    let end = scan_numeric_entity(rest, digits_start, max_digits, is_hex)?;

    let digits = &s[start + 1 + digits_start..start + 1 + end];
    let radix = if is_hex { 16 } else { 10 };
    let ch = u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)?;
    Some((ch, 1 + end + 1))
}

// Bounded scan to avoid quadratic behavior on adversarial input.
fn scan_numeric_entity(bytes: &[u8], start: usize, max_digits: usize, is_hex: bool) -> Option<usize> {
    let mut digits = 0usize;
    for (offset, &b) in bytes.iter().enumerate().skip(start) {
        if b == b';' {
            return (digits > 0).then_some(offset);
        }
        if digits == max_digits {
            return None;
        }
        let ok = if is_hex {
            b.is_ascii_hexdigit()
        } else {
            b.is_ascii_digit()
        };
        if !ok {
            return None;
        }
        digits += 1;
    }
    None
}
