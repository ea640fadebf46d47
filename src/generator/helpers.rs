//! String helpers shared by destination paths and every template binding.
//!
//! Registered as minijinja filters by [`register_helpers`]:
//!
//! | Filter | Example |
//! |---|---|
//! | `proper` | `chain state` → `Chain State` |
//! | `lower` / `upper` | ASCII-only case changes |
//! | `plural` / `singular` | `transaction` ↔ `transactions` |
//! | `camel` | `block_number` → `blockNumber` |
//! | `go_name` | `block_number` → `BlockNumber` |
//! | `first_upper` / `first_lower` | first character only |
//! | `lower_no_spaces` | `Chain Data` → `chaindata` |
//! | `pad(width)` | right-pads with spaces |

use minijinja::Environment;

/// Title-case every word (English rules): first letter upper, the rest lower.
///
/// Letters, digits, `_` and `'` continue a word; anything else ends it and is kept as-is.
pub fn proper(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphanumeric() || c == '_' || c == '\'' {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

pub fn lower(s: &str) -> String {
    s.to_ascii_lowercase()
}

pub fn upper(s: &str) -> String {
    s.to_ascii_uppercase()
}

pub fn lower_no_spaces(s: &str) -> String {
    lower(&s.replace(' ', ""))
}

pub fn first_upper(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn first_lower(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `snake_case` to `camelCase`; spaces are dropped and the first character lowered.
pub fn camel(s: &str) -> String {
    if s.chars().count() < 2 {
        return s.to_string();
    }
    let mut result = String::with_capacity(s.len());
    let mut to_upper = false;
    for c in s.chars() {
        if c == '_' {
            to_upper = true;
            continue;
        }
        if to_upper {
            result.extend(c.to_uppercase());
            to_upper = false;
        } else {
            result.push(c);
        }
    }
    first_lower(&result).replace(' ', "")
}

pub fn go_name(s: &str) -> String {
    first_upper(&camel(s))
}

pub fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.chars().count());
    format!("{s}{}", " ".repeat(fill))
}

pub fn plural(s: &str) -> String {
    if s.ends_with('s') || s.ends_with("ed") || s.ends_with("ing") {
        s.to_string()
    } else if s.ends_with('x') {
        format!("{s}es")
    } else if s.ends_with('y') {
        format!("{s}ies")
    } else if matches!(s, "config" | "session" | "publish") {
        s.to_string()
    } else {
        format!("{s}s")
    }
}

pub fn singular(s: &str) -> String {
    const EXCLUSIONS: [&str; 5] = ["baddress", "status", "stats", "series", "dalledress"];
    let lowered = s.to_lowercase();
    if lowered == "addresses" {
        return s[..s.len() - 2].to_string();
    }
    if !EXCLUSIONS.contains(&lowered.as_str()) {
        if let Some(stripped) = s.strip_suffix(['s', 'S']) {
            return stripped.to_string();
        }
    }
    s.to_string()
}

/// Install the helper vocabulary as filters on a template environment.
pub fn register_helpers(env: &mut Environment<'_>) {
    env.add_filter("proper", |s: String| proper(&s));
    env.add_filter("lower", |s: String| lower(&s));
    env.add_filter("upper", |s: String| upper(&s));
    env.add_filter("lower_no_spaces", |s: String| lower_no_spaces(&s));
    env.add_filter("first_upper", |s: String| first_upper(&s));
    env.add_filter("first_lower", |s: String| first_lower(&s));
    env.add_filter("camel", |s: String| camel(&s));
    env.add_filter("go_name", |s: String| go_name(&s));
    env.add_filter("pad", |s: String, width: usize| pad(&s, width));
    env.add_filter("plural", |s: String| plural(&s));
    env.add_filter("singular", |s: String| singular(&s));
}
