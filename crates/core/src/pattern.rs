//! Glob expression compilation and literal-root merging.
//!
//! An expression is a `/`-separated path where `*` matches one segment's
//! worth of non-separator characters and `**` between separators matches
//! zero or more whole segments. Expressions name directories, so the
//! compiled matcher accepts every resource name located at or below the
//! expression, never names with only a partial-segment overlap.

use std::fmt;
use std::hash::{Hash, Hasher};

use once_cell::sync::Lazy;
use regex::Regex;

static DEEP_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*{2,}/").unwrap());
static STAR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*{2,}").unwrap());
static STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*").unwrap());

/// One compiled path expression: an anchored matcher plus the literal
/// (wildcard-free) root it starts from.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    matcher: Regex,
    root: String,
}

impl PathPattern {
    /// Compiles a raw expression. Never fails: malformed wildcard runs
    /// still produce a valid, possibly overly permissive matcher.
    pub fn compile(expression: &str) -> Self {
        let raw = expression.trim().to_string();
        let expr = raw.trim_end_matches('/');

        let mut escaped = String::with_capacity(expr.len());
        for ch in expr.chars() {
            match ch {
                '*' | '/' => escaped.push(ch),
                '.' | '^' | '$' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\' => {
                    escaped.push('\\');
                    escaped.push(ch);
                }
                _ => escaped.push(ch),
            }
        }

        // `/**/` means "this segment or deeper"; any remaining run of two
        // or more stars matches across separators, a single star stays
        // within one segment.
        let text = DEEP_RUN.replace_all(&escaped, "(/|/.+/)");
        let text = STAR_RUN.replace_all(&text, ".+");
        let text = STAR.replace_all(&text, "[^/]+");

        // Resource names are longer than the expression by construction,
        // so the tail accepts anything below the validated prefix.
        let matcher = Regex::new(&format!("^{}(/.*)?$", text))
            .unwrap_or_else(|_| Regex::new("^$").unwrap());

        Self {
            root: literal_root(expr),
            raw,
            matcher,
        }
    }

    /// True if `name` lies at or below this expression.
    pub fn matches(&self, name: &str) -> bool {
        self.matcher.is_match(name)
    }

    /// The wildcard-free leading segments of the expression, always
    /// separator-terminated so the merge prefix test stays segment-safe.
    pub fn literal_root(&self) -> &str {
        &self.root
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Two expressions are the same pattern iff their original text is equal.
impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for PathPattern {}

impl Hash for PathPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn literal_root(expr: &str) -> String {
    let mut root = String::new();
    for segment in expr.split('/') {
        if segment.contains('*') {
            break;
        }
        root.push_str(segment);
        root.push('/');
    }
    root
}

/// Drops every root that a shorter admitted root already covers.
///
/// Candidates are taken length-ascending (shorter = broader, scanned
/// first) and admitted unless an already-admitted root is a prefix of
/// them; admission order is preserved. The union of subtrees under the
/// result covers every input root, and no subtree is walked twice for
/// roots sharing an admitted ancestor.
pub fn merge_roots<'a, I>(roots: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut candidates: Vec<&str> = roots.into_iter().collect();
    candidates.sort_by_key(|r| r.len());

    let mut merged: Vec<String> = Vec::new();
    for candidate in candidates {
        if !merged.iter().any(|kept| candidate.starts_with(kept.as_str())) {
            merged.push(candidate.to_string());
        }
    }
    merged
}
