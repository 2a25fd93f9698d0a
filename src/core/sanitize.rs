// src/core/sanitize.rs

/// Decode the handful of HTML entities that show up in table text.
/// Single pass, so `&amp;lt;` becomes `&lt;` and not `<`.
pub fn normalize_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        // Entities are short; don't scan a whole paragraph for a ';'
        let semi = tail.char_indices().take(12).find(|&(_, c)| c == ';').map(|(i, _)| i);
        let decoded = semi.and_then(|i| decode_entity(&tail[1..i]).map(|ch| (ch, i)));

        match decoded {
            Some((ch, i)) => {
                out.push(ch);
                rest = &tail[i + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "nbsp" => Some(' '),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Collapse whitespace runs to a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_decode_once() {
        assert_eq!(normalize_entities("A&nbsp;&amp;&nbsp;B"), "A & B");
        assert_eq!(normalize_entities("&amp;lt;"), "&lt;");
        assert_eq!(normalize_entities("Jo&#227;o &#x41;"), "João A");
    }

    #[test]
    fn unknown_entities_are_kept() {
        assert_eq!(normalize_entities("R&D &bogus; &"), "R&D &bogus; &");
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(normalize_ws("  Ana \n\t  Maria  "), "Ana Maria");
    }
}
