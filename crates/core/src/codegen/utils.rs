//! Common utilities for TypeScript/JavaScript code generation.
//!
//! Shared helpers for identifiers, string literals and property access.

/// Check if a name needs bracket notation (or quoting) for property/key access.
///
/// Returns true if the name:
/// - Is empty
/// - Doesn't start with a letter, underscore, or dollar sign
/// - Contains characters other than alphanumeric, underscore, or dollar sign
pub fn needs_bracket_notation(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape text for a single-quoted string literal.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// A single-quoted string literal.
pub fn string_literal(s: &str) -> String {
    format!("'{}'", escape_js_string(s))
}

/// Escape text for the static part of a template literal.
pub fn escape_template(s: &str) -> String {
    s.replace('\\', "\\\\").replace('`', "\\`").replace("${", "\\${")
}

/// Quote a property key if it is not a valid identifier.
pub fn quote_if_needed(name: &str) -> String {
    if needs_bracket_notation(name) {
        string_literal(name)
    } else {
        name.to_string()
    }
}

/// Format a property access expression (e.g. `request.id` or `request['x-id']`).
pub fn format_param_access(obj: &str, prop: &str) -> String {
    if needs_bracket_notation(prop) {
        format!("{obj}[{}]", string_literal(prop))
    } else {
        format!("{obj}.{prop}")
    }
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first letter of a string.
pub fn uncapitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Identifier-safe PascalCase suffix for a field name (`x-id` becomes `XId`).
pub fn pascal_identifier(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric() && c != '_' && c != '$')
        .filter(|part| !part.is_empty())
        .map(capitalize_first)
        .collect()
}
