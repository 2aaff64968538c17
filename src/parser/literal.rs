/// Strip the delimiters from a struct tag literal.
///
/// Raw literals (`` `...` ``) are returned verbatim. Interpreted literals (`"..."`) have their
/// escape sequences decoded so the result is the tag's actual value.
#[must_use]
pub fn strip_tag_literal(lit: &str) -> String {
    if let Some(inner) = lit.strip_prefix('`') {
        return inner.strip_suffix('`').unwrap_or(inner).to_string();
    }
    if let Some(inner) = lit.strip_prefix('"') {
        return unescape(inner.strip_suffix('"').unwrap_or(inner));
    }
    lit.to_string()
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(esc) = chars.next() else {
            out.push('\\');
            break;
        };
        match esc {
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            '\\' | '"' | '\'' => out.push(esc),
            'x' => push_code(&mut out, &mut chars, 2, 16, "\\x"),
            'u' => push_code(&mut out, &mut chars, 4, 16, "\\u"),
            'U' => push_code(&mut out, &mut chars, 8, 16, "\\U"),
            '0'..='7' => {
                let mut code = esc.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}

fn push_code(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    digits: usize,
    radix: u32,
    prefix: &str,
) {
    let mut raw = String::with_capacity(digits);
    for _ in 0..digits {
        match chars.peek() {
            Some(d) if d.is_digit(radix) => {
                raw.push(*d);
                chars.next();
            }
            _ => break,
        }
    }
    match u32::from_str_radix(&raw, radix).ok().and_then(char::from_u32) {
        Some(c) if raw.len() == digits => out.push(c),
        // Malformed escape: keep it as written
        _ => {
            out.push_str(prefix);
            out.push_str(&raw);
        }
    }
}
