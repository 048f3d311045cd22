//! Denylist screening of raw expression text.
//!
//! Screening runs on the text itself, before and independently of parsing.
//! Each rule is a whole-word pattern; a name is blocked wherever it appears,
//! including inside string literals and as an ordinary property name. A
//! context field that happens to be called `constructor` is therefore
//! refused along with the real thing. Only ASCII letters, digits and `_`
//! continue a word, so a `$` next to a blocked name (`$eval`) does not
//! hide it.
//!
//! The evaluator has no way to reach any of these names even when they get
//! through (there are no calls, and lookups only see context data), so the
//! list is a second wall rather than the only one.

use std::sync::LazyLock;

use regex::Regex;

/// The kind of unsafe construct a blocked name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenyCategory {
    /// String-to-code compilers and their constructors
    CodeExecution,
    /// Dynamic module and resource loading
    ModuleLoading,
    /// Runtime, environment and global-object handles
    GlobalAccess,
    /// Network calls, promises and timers
    AsyncPrimitive,
    /// Reflection and prototype-chain access
    Reflection,
}

impl DenyCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DenyCategory::CodeExecution => "code execution",
            DenyCategory::ModuleLoading => "module loading",
            DenyCategory::GlobalAccess => "global object access",
            DenyCategory::AsyncPrimitive => "network or scheduling primitive",
            DenyCategory::Reflection => "reflection or prototype access",
        }
    }
}

impl std::fmt::Display for DenyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct DenyRule {
    pub category: DenyCategory,
    pub pattern: Regex,
}

const RULE_SOURCES: &[(DenyCategory, &[&str])] = &[
    (
        DenyCategory::CodeExecution,
        &[
            "eval",
            "Function",
            "AsyncFunction",
            "GeneratorFunction",
            "AsyncGeneratorFunction",
            "execScript",
            "WebAssembly",
        ],
    ),
    (
        DenyCategory::ModuleLoading,
        &["require", "import", "importScripts"],
    ),
    (
        DenyCategory::GlobalAccess,
        &[
            "process",
            "global",
            "globalThis",
            "window",
            "document",
            "this",
            "self",
            "arguments",
            "module",
            "exports",
            "__dirname",
            "__filename",
            "Deno",
            "Bun",
        ],
    ),
    (
        DenyCategory::AsyncPrimitive,
        &[
            "fetch",
            "XMLHttpRequest",
            "WebSocket",
            "Promise",
            "setTimeout",
            "setInterval",
            "setImmediate",
            "queueMicrotask",
        ],
    ),
    (
        DenyCategory::Reflection,
        &[
            "__proto__",
            "constructor",
            "prototype",
            "Reflect",
            "Proxy",
            "defineProperty",
            "defineProperties",
            "setPrototypeOf",
            "getPrototypeOf",
            "getOwnPropertyDescriptor",
            "__defineGetter__",
            "__defineSetter__",
            "__lookupGetter__",
            "__lookupSetter__",
        ],
    ),
];

/// Compiled rules, in the order they are checked.
pub static DENY_RULES: LazyLock<Vec<DenyRule>> = LazyLock::new(|| {
    RULE_SOURCES
        .iter()
        .map(|(category, names)| {
            let alternation = names
                .iter()
                .map(|name| regex::escape(name))
                .collect::<Vec<_>>()
                .join("|");
            // `$` is a boundary, so `$process` is blocked like `process`
            let source = format!(r"(?:^|[^A-Za-z0-9_])(?:{})(?:[^A-Za-z0-9_]|$)", alternation);
            DenyRule {
                category: *category,
                pattern: Regex::new(&source).expect("deny rule pattern is valid"),
            }
        })
        .collect()
});

/// Returns the category of the first rule `text` trips, if any.
pub fn find_blocked(text: &str) -> Option<DenyCategory> {
    DENY_RULES
        .iter()
        .find(|rule| rule.pattern.is_match(text))
        .map(|rule| rule.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_only() {
        assert_eq!(find_blocked("evaluation > 1"), None);
        assert_eq!(find_blocked("item.processed"), None);
        assert_eq!(find_blocked("selfie"), None);
        assert_eq!(find_blocked("my_constructor_name"), None);
        assert_eq!(find_blocked("eval"), Some(DenyCategory::CodeExecution));
        assert_eq!(find_blocked("a.constructor"), Some(DenyCategory::Reflection));
        assert_eq!(find_blocked("x[\"__proto__\"]"), Some(DenyCategory::Reflection));
    }

    #[test]
    fn test_dollar_is_a_word_boundary() {
        assert_eq!(find_blocked("$process"), Some(DenyCategory::GlobalAccess));
        assert_eq!(find_blocked("process$"), Some(DenyCategory::GlobalAccess));
        assert_eq!(find_blocked("$eval$"), Some(DenyCategory::CodeExecution));
        assert_eq!(find_blocked("$processed"), None);
        assert_eq!(find_blocked("(process)"), Some(DenyCategory::GlobalAccess));
    }

    #[test]
    fn test_rules_checked_in_order() {
        assert_eq!(
            find_blocked("constructor || eval"),
            Some(DenyCategory::CodeExecution)
        );
    }
}
