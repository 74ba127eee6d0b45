//! Filter-expression compiler.
//!
//! Rewrites a human-written filter such as
//! `pageviews > 100 && browser == Firefox` into the wire syntax expected by
//! the `filters` parameter: `ga:pageviews>100;ga:browser==Firefox`, then
//! percent-encodes it.
//!
//! Supported operators are `!~ =~ == != > < >= <= =@ !@`, combined with
//! `&&` (wire `;`) and `||` (wire `,`). Literal `,` and `;` inside values are
//! backslash-escaped before the boolean operators are rewritten, so they can
//! never be mistaken for the wire-level separators.
//!
//! Compile a filter once. Feeding an already-compiled (percent-encoded)
//! string back in encodes it a second time; field prefixing on its own is
//! idempotent because a `ga:`-prefixed name is never prefixed again.

use regex::Regex;
use std::sync::OnceLock;

/// Operator alternation, longest operators first so `>=` wins over `>`.
const OPERATORS: &str = "!~|=~|==|!=|>=|<=|=@|!@|>|<";

struct Patterns {
    whitespace: Regex,
    field: Regex,
    quotes: Regex,
    and: Regex,
    or: Regex,
    operator: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let compile = |pattern: &str| Regex::new(pattern).expect("filter pattern is valid");
        Patterns {
            whitespace: compile(r"\s+"),
            field: compile(&format!(
                r"(?i)(&&\s*|\|\|\s*|^)([a-z][a-z0-9]*)(\s*(?:{OPERATORS}))"
            )),
            quotes: compile(r#"['"]"#),
            and: compile(r"\s*&&\s*"),
            or: compile(r"\s*\|\|\s*"),
            operator: compile(&format!(r"\s*({OPERATORS})\s*")),
        }
    })
}

/// Rewrite a filter into wire syntax without percent-encoding it.
///
/// Returns an empty string when nothing is left after cleanup.
pub fn rewrite_filter(raw: &str) -> String {
    let p = patterns();

    let collapsed = p.whitespace.replace_all(raw.trim(), " ");
    let escaped = collapsed.replace(',', "\\,").replace(';', "\\;");
    let prefixed = p.field.replace_all(&escaped, "${1}ga:${2}${3}");
    let unquoted = p.quotes.replace_all(&prefixed, "");
    let anded = p.and.replace_all(&unquoted, ";");
    let ored = p.or.replace_all(&anded, ",");
    p.operator.replace_all(&ored, "$1").into_owned()
}

/// Compile a filter into its percent-encoded wire form.
///
/// Returns `None` when the expression is empty after cleanup, meaning the
/// `filters` parameter should be omitted.
pub fn compile_filter(raw: &str) -> Option<String> {
    let wire = rewrite_filter(raw);
    if wire.is_empty() {
        None
    } else {
        Some(urlencoding::encode(&wire).into_owned())
    }
}
