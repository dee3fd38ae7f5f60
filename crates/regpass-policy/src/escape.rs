//! Escaping of user-supplied text embedded into grep patterns
//!
//! Rendered patterns live inside a double-quoted shell word passed to
//! `grep -E`. Two layers are handled here:
//! - pattern metacharacters are backslash-escaped so they match literally
//! - `"` and `` ` `` are backslash-escaped so they cannot end the shell word
//!
//! Inside double quotes the shell also strips the backslash in front of `$`
//! and `\`. Bracket expressions do not care (`$` is literal there), but a
//! literal sequence does, so [`escape_literal`] doubles those two escapes.

/// Characters escaped by [`escape_pattern`]
const PATTERN_SPECIAL: &[char] = &[
    '(', ')', '[', ']', '{', '}', '?', '*', '+', '-', '|', '^', '$', '\\', '.', '&', '~', '#',
    ' ', '\t', '\n', '\r', '\x0b', '\x0c',
];

/// Characters that would terminate or rewrite a double-quoted shell word
const SHELL_SPECIAL: &[char] = &['"', '`'];

/// Escape `text` so every character is matched literally.
///
/// Characters outside the metacharacter set pass through unchanged, so
/// `%`, `@` and `!` stay bare here.
pub fn escape_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if PATTERN_SPECIAL.contains(&c) || SHELL_SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

/// Escape a required sequence for a double-quoted `grep -E` argument.
///
/// Like [`escape_pattern`], except `$` becomes `\\\$` and `\` becomes
/// `\\\\`, so grep still sees `\$` and `\\` after the shell removes
/// one layer.
pub fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        match c {
            '$' => escaped.push_str(r"\\\$"),
            '\\' => escaped.push_str(r"\\\\"),
            c if PATTERN_SPECIAL.contains(&c) || SHELL_SPECIAL.contains(&c) => {
                escaped.push('\\');
                escaped.push(c);
            }
            c => escaped.push(c),
        }
    }

    escaped
}

/// Escape a character set for use between `[` and `]`.
///
/// Same as [`escape_pattern`] but `!` is always written as `\!`; bracket
/// expressions containing a bare `!` behave differently across
/// grep-compatible engines and shells.
pub fn escape_class(chars: &str) -> String {
    escape_pattern(chars).replace('!', "\\!")
}
