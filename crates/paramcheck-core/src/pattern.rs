//! Regex constraints with `/pattern/flags` literal syntax
//!
//! A constraint string that starts with `/` and has another `/` at least one
//! character later is read as a literal: everything after the last `/` is the
//! flag list and the rest (slashes included) is the pattern. Any other string
//! is a bare pattern with no flags.
//!
//! Without the `u` or `v` flag the Perl classes `\d`, `\w` and `\b` (and
//! their negations) are ASCII-only; `\s` always covers Unicode whitespace.
//!
//! Copyright (c) 2025 Paramcheck Team
//! Licensed under the Apache-2.0 license

use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::borrow::Cow;

/// Flags accepted after the closing slash
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternFlags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
    pub sticky: bool,
    /// Unicode-aware Perl classes (`u` or `v`)
    pub unicode: bool,
}

impl PatternFlags {
    /// Parse a flag list such as `"im"`.
    ///
    /// `u` and `v` switch the Perl classes to Unicode; `g` and `d` are
    /// accepted and ignored since a constraint is tested once.
    pub fn parse(flags: &str) -> Result<Self, String> {
        let mut parsed = Self::default();
        let mut seen = String::new();
        for flag in flags.chars() {
            if seen.contains(flag) {
                return Err(format!("duplicate flag '{}'", flag));
            }
            seen.push(flag);
            match flag {
                'i' => parsed.case_insensitive = true,
                'm' => parsed.multi_line = true,
                's' => parsed.dot_matches_new_line = true,
                'y' => parsed.sticky = true,
                'u' | 'v' => parsed.unicode = true,
                'g' | 'd' => {}
                other => return Err(format!("unsupported flag '{}'", other)),
            }
        }
        Ok(parsed)
    }
}

/// A compiled regex constraint
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a constraint string, either bare or in `/pattern/flags` form
    pub fn compile(constraint: &str) -> Result<Self, String> {
        let (body, flags) = split_literal(constraint);
        let flags = PatternFlags::parse(flags)?;

        let body: Cow<'_, str> = if flags.unicode {
            Cow::Borrowed(body)
        } else {
            Cow::Owned(ascii_perl_classes(body))
        };
        let body: Cow<'_, str> = if flags.sticky {
            Cow::Owned(format!(r"\A(?:{})", body))
        } else {
            body
        };

        let regex = RegexBuilder::new(&body)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_matches_new_line)
            .build()
            .map_err(|e| e.to_string())?;

        Ok(Self {
            source: constraint.to_string(),
            regex,
        })
    }

    /// The constraint string as configured
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Test a JSON value, stringified with [`stringify`]
    pub fn matches(&self, value: &Value) -> bool {
        self.regex.is_match(&stringify(value))
    }
}

/// Rewrite `\d`, `\w`, `\b` and their negations into ASCII-only forms.
///
/// Inside a bracket class the replacement is a class item (`0-9`,
/// `[:^word:]`); outside it is a standalone class or an ASCII word boundary.
fn ascii_perl_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(next) = chars.next() else {
                    out.push(c);
                    break;
                };
                let replacement = match (next, in_class) {
                    ('d', false) => "[0-9]",
                    ('D', false) => "[^0-9]",
                    ('w', false) => "[0-9A-Za-z_]",
                    ('W', false) => "[^0-9A-Za-z_]",
                    ('b', false) => r"(?-u:\b)",
                    ('B', false) => r"(?-u:\B)",
                    ('d', true) => "0-9",
                    ('D', true) => "[:^digit:]",
                    ('w', true) => "0-9A-Za-z_",
                    ('W', true) => "[:^word:]",
                    _ => {
                        out.push(c);
                        out.push(next);
                        continue;
                    }
                };
                out.push_str(replacement);
            }
            '[' if !in_class => {
                in_class = true;
                out.push(c);
                // a leading `]` or `^]` is literal
                if chars.as_str().starts_with('^') {
                    out.push('^');
                    chars.next();
                }
                if chars.as_str().starts_with(']') {
                    out.push(']');
                    chars.next();
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Split a constraint into pattern and flags.
///
/// `/a/b/i` yields the pattern `a/b` and the flags `i`; a string without the
/// literal shape is returned whole with no flags.
pub fn split_literal(constraint: &str) -> (&str, &str) {
    if is_literal(constraint) {
        let inner = &constraint[1..];
        if let Some(last) = inner.rfind('/') {
            return (&inner[..last], &inner[last + 1..]);
        }
    }
    (constraint, "")
}

fn is_literal(constraint: &str) -> bool {
    constraint
        .strip_prefix('/')
        .and_then(|rest| rest.char_indices().nth(1))
        .map_or(false, |(offset, _)| constraint[1 + offset..].contains('/'))
}

/// Text form of a value as seen by a regex constraint.
///
/// Strings pass through, numbers use their shortest decimal form (integral
/// floats drop the fraction), booleans become `true`/`false`, and objects,
/// arrays and `null` become their JSON text.
pub fn stringify(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
                Cow::Owned(format!("{}", f))
            }
            _ => Cow::Owned(n.to_string()),
        },
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            Cow::Owned(serde_json::to_string(value).unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_literal() {
        assert_eq!(split_literal("/^[a-z]+$/i"), ("^[a-z]+$", "i"));
        assert_eq!(split_literal("/a/b/i"), ("a/b", "i"));
        assert_eq!(split_literal("/abc/"), ("abc", ""));
        assert_eq!(split_literal("^abc$"), ("^abc$", ""));
    }

    #[test]
    fn test_short_strings_are_bare_patterns() {
        // a slash right after the opening one does not close a literal
        assert_eq!(split_literal("//i"), ("//i", ""));
        assert_eq!(split_literal("/"), ("/", ""));
        assert_eq!(split_literal("/a"), ("/a", ""));
    }

    #[test]
    fn test_flags() {
        let flags = PatternFlags::parse("imsy").unwrap();
        assert!(flags.case_insensitive && flags.multi_line);
        assert!(flags.dot_matches_new_line && flags.sticky);
        assert_eq!(PatternFlags::parse("gd").unwrap(), PatternFlags::default());
        assert!(PatternFlags::parse("u").unwrap().unicode);
        assert!(PatternFlags::parse("v").unwrap().unicode);
        assert!(PatternFlags::parse("ii").is_err());
        assert!(PatternFlags::parse("x").is_err());
    }

    #[test]
    fn test_case_insensitive_literal() {
        let pattern = Pattern::compile("/^[a-z]+$/i").unwrap();
        assert!(pattern.matches(&json!("ABC")));
        assert!(!pattern.matches(&json!("abc1")));
    }

    #[test]
    fn test_sticky_anchors_at_start() {
        let sticky = Pattern::compile("/b/y").unwrap();
        assert!(sticky.matches(&json!("bc")));
        assert!(!sticky.matches(&json!("abc")));

        let plain = Pattern::compile("b").unwrap();
        assert!(plain.matches(&json!("abc")));
    }

    #[test]
    fn test_perl_classes_are_ascii_without_unicode_flag() {
        let digits = Pattern::compile(r"^\d+$").unwrap();
        assert!(digits.matches(&json!("123")));
        assert!(!digits.matches(&json!("١٢٣")));

        let word = Pattern::compile(r"^\w+$").unwrap();
        assert!(word.matches(&json!("hello_1")));
        assert!(!word.matches(&json!("héllo")));

        let boundary = Pattern::compile(r"\bfoo\b").unwrap();
        assert!(boundary.matches(&json!("a foo b")));
        assert!(boundary.matches(&json!("éfooé")));
        assert!(!boundary.matches(&json!("_foo")));
        assert!(!Pattern::compile(r"^\W$").unwrap().matches(&json!("_")));
        assert!(Pattern::compile(r"^\D+$").unwrap().matches(&json!("١٢٣")));
    }

    #[test]
    fn test_perl_classes_inside_brackets() {
        let pattern = Pattern::compile(r"^[\d.-]+$").unwrap();
        assert!(pattern.matches(&json!("1.5-2")));
        assert!(!pattern.matches(&json!("١.٢")));

        let negated = Pattern::compile(r"^[\W\d]+$").unwrap();
        assert!(negated.matches(&json!("-1 2")));
        assert!(!negated.matches(&json!("a")));
        assert!(negated.matches(&json!("é")));

        // escaped backslash is not a class escape
        assert!(Pattern::compile(r"^\\d$").unwrap().matches(&json!(r"\d")));
        // a leading `]` stays inside the class
        assert!(Pattern::compile(r"^[]\d]+$").unwrap().matches(&json!("]1")));
    }

    #[test]
    fn test_unicode_flag_keeps_unicode_classes() {
        let digits = Pattern::compile(r"/^\d+$/u").unwrap();
        assert!(digits.matches(&json!("١٢٣")));

        let word = Pattern::compile(r"/^\w+$/v").unwrap();
        assert!(word.matches(&json!("héllo")));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(Pattern::compile("(").is_err());
        assert!(Pattern::compile("/abc/q").is_err());
    }

    #[test]
    fn test_stringify() {
        assert_eq!(stringify(&json!("text")), "text");
        assert_eq!(stringify(&json!(42)), "42");
        assert_eq!(stringify(&json!(2.0)), "2");
        assert_eq!(stringify(&json!(2.5)), "2.5");
        assert_eq!(stringify(&json!(true)), "true");
        assert_eq!(stringify(&Value::Null), "null");
        assert_eq!(stringify(&json!({"a": 1})), r#"{"a":1}"#);
        assert_eq!(stringify(&json!([1, "x"])), r#"[1,"x"]"#);
    }

    #[test]
    fn test_object_values_match_their_json_text() {
        let pattern = Pattern::compile(r#""id":\d+"#).unwrap();
        assert!(pattern.matches(&json!({"id": 7})));
        assert!(!pattern.matches(&json!({"id": "7"})));
    }
}
