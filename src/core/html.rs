// src/core/html.rs
//
// Tolerant, case-insensitive element scanning over raw HTML.
// No DOM: we locate `<tag …>…</tag>` blocks by byte offsets and read what we need.

use super::sanitize::{normalize_entities, normalize_ws};

/// ASCII-only lowercase; keeps byte offsets identical to the source.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Byte offsets of one element inside its document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub open_end: usize,
    pub close_start: usize,
    pub end: usize,
}

/// Source text plus a lowercase shadow used for matching.
pub struct Doc<'a> {
    src: &'a str,
    lc: String,
}

impl<'a> Doc<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, lc: to_lower(src) }
    }

    /// `<td class="x">` part of the element
    pub fn open_tag(&self, sp: Span) -> &'a str { &self.src[sp.start..sp.open_end] }

    /// Everything between the open and close tag
    pub fn inner(&self, sp: Span) -> &'a str { &self.src[sp.open_end..sp.close_start] }

    /// Next `<tag` at or after `from` whose name ends right after `tag`
    /// (so `<th` never matches `<thead>`).
    fn find_open(&self, tag: &str, from: usize) -> Option<usize> {
        let pat = join!("<", tag);
        let mut pos = from;
        loop {
            let i = self.lc.get(pos..)?.find(&pat)? + pos;
            if name_ends_at(&self.lc, i + pat.len()) {
                return Some(i);
            }
            pos = i + 1;
        }
    }

    fn find_close(&self, tag: &str, from: usize) -> Option<usize> {
        let pat = join!("</", tag);
        let mut pos = from;
        loop {
            let i = self.lc.get(pos..)?.find(&pat)? + pos;
            if name_ends_at(&self.lc, i + pat.len()) {
                return Some(i);
            }
            pos = i + 1;
        }
    }

    /// Next complete `<tag …>…</tag>` block at or after `from`.
    /// Same-name nesting is balanced; an unclosed element yields `None`.
    pub fn next_element(&self, tag: &str, from: usize) -> Option<Span> {
        let start = self.find_open(tag, from)?;
        let open_end = self.src[start..].find('>')? + start + 1;

        let mut depth = 1usize;
        let mut pos = open_end;
        loop {
            let close = self.find_close(tag, pos)?;
            if let Some(o) = self.find_open(tag, pos).filter(|&o| o < close) {
                depth += 1;
                pos = o + 1;
                continue;
            }
            depth -= 1;
            let close_end = self.src[close..].find('>').map(|g| close + g + 1).unwrap_or(self.src.len());
            if depth == 0 {
                return Some(Span { start, open_end, close_start: close, end: close_end });
            }
            pos = close_end;
        }
    }

    /// All top-level `tag` blocks inside `within` (or the whole doc).
    pub fn elements(&self, tag: &str, within: Option<Span>) -> Vec<Span> {
        let (mut pos, limit) = match within {
            Some(sp) => (sp.open_end, sp.close_start),
            None => (0, self.src.len()),
        };
        let mut out = Vec::new();
        while let Some(sp) = self.next_element(tag, pos) {
            if sp.end > limit { break; }
            pos = sp.end;
            out.push(sp);
        }
        out
    }

    /// First element, in document order and of any tag, whose class list contains `class`.
    /// Open tags without a matching close (void elements) are skipped.
    pub fn first_with_class(&self, class: &str) -> Option<Span> {
        let mut pos = 0;
        while let Some(i) = self.lc.get(pos..)?.find('<').map(|i| i + pos) {
            pos = i + 1;
            let name: String = self.lc[pos..]
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect();
            if name.is_empty() { continue; }
            let Some(open_end) = self.src[i..].find('>').map(|g| i + g + 1) else { break };
            if !has_class(&self.src[i..open_end], class) { continue; }
            if let Some(sp) = self.next_element(&name, i) {
                return Some(sp);
            }
        }
        None
    }

    /// First `tag` element whose open tag carries `attr="value"` (value compared exactly).
    pub fn find_with_attr(&self, tag: &str, attr: &str, value: &str) -> Option<Span> {
        let mut pos = 0;
        while let Some(sp) = self.next_element(tag, pos) {
            if attr_value(self.open_tag(sp), attr).as_deref() == Some(value) {
                return Some(sp);
            }
            pos = sp.open_end;
        }
        None
    }
}

fn name_ends_at(lc: &str, at: usize) -> bool {
    match lc.as_bytes().get(at) {
        None => true,
        Some(b) => b.is_ascii_whitespace() || *b == b'>' || *b == b'/',
    }
}

/// Read one attribute from an open tag, e.g. `attr_value(r#"<th data-column="fame">"#, "data-column")`.
/// Handles double, single and unquoted values; names compare case-insensitively.
pub fn attr_value(open_tag: &str, name: &str) -> Option<String> {
    let b = open_tag.as_bytes();
    let n = b.len();

    // Skip "<tagname"
    let mut i = 1;
    while i < n && !b[i].is_ascii_whitespace() && b[i] != b'>' && b[i] != b'/' { i += 1; }

    while i < n {
        while i < n && (b[i].is_ascii_whitespace() || b[i] == b'/') { i += 1; }
        if i >= n || b[i] == b'>' { return None; }

        let name_start = i;
        while i < n && !b[i].is_ascii_whitespace() && !matches!(b[i], b'=' | b'>' | b'/') { i += 1; }
        let attr_name = &open_tag[name_start..i];

        while i < n && b[i].is_ascii_whitespace() { i += 1; }
        let value = if i < n && b[i] == b'=' {
            i += 1;
            while i < n && b[i].is_ascii_whitespace() { i += 1; }
            match b.get(i) {
                Some(&q) if q == b'"' || q == b'\'' => {
                    let vs = i + 1;
                    let ve = open_tag[vs..].find(q as char).map(|e| vs + e).unwrap_or(n);
                    i = (ve + 1).min(n);
                    &open_tag[vs..ve]
                }
                _ => {
                    let vs = i;
                    while i < n && !b[i].is_ascii_whitespace() && b[i] != b'>' { i += 1; }
                    &open_tag[vs..i]
                }
            }
        } else {
            ""
        };

        if attr_name.eq_ignore_ascii_case(name) {
            return Some(normalize_entities(value));
        }
    }
    None
}

/// Does the open tag's `class` list contain `class` (exact token match)?
pub fn has_class(open_tag: &str, class: &str) -> bool {
    attr_value(open_tag, "class")
        .map(|v| v.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// Visible text: tags dropped, entities decoded, whitespace collapsed.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&normalize_entities(&out))
}
