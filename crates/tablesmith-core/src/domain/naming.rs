//! Identifier conventions.
//!
//! Raw SQL identifiers (`user_info`, `Order-Line`, `created at`) are split on
//! word separators and recombined into the casing each target position needs:
//!
//! | function                 | `user_info` |
//! |--------------------------|-------------|
//! | [`derive_member_name`]   | `userInfo`  |
//! | [`derive_pascal_name`]   | `UserInfo`  |
//! | [`derive_route_segment`] | `user-info` |
//!
//! All three are total: any input produces a (possibly empty) output.

/// Word separators recognized in raw identifiers.
fn is_separator(c: char) -> bool {
    c == '_' || c == '-' || c.is_whitespace()
}

fn segments(identifier: &str) -> impl Iterator<Item = &str> {
    identifier.split(is_separator).filter(|s| !s.is_empty())
}

/// Upper-cases the first character and lower-cases the remainder.
pub fn pascal_segment(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// camelCase member name: first segment fully lower-cased, the rest
/// Pascal-cased.
pub fn derive_member_name(identifier: &str) -> String {
    let mut parts = segments(identifier);
    let mut out = match parts.next() {
        Some(first) => first.to_lowercase(),
        None => return String::new(),
    };
    for part in parts {
        out.push_str(&pascal_segment(part));
    }
    out
}

/// PascalCase type name.
pub fn derive_pascal_name(identifier: &str) -> String {
    segments(identifier).map(pascal_segment).collect()
}

/// kebab-case route segment: lower-cased, each separator replaced with a
/// single hyphen.
pub fn derive_route_segment(identifier: &str) -> String {
    identifier
        .chars()
        .map(|c| if is_separator(c) { '-' } else { c })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Java reserved words and literals that cannot be used as field names.
const JAVA_RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

pub fn is_java_reserved(name: &str) -> bool {
    JAVA_RESERVED.contains(&name)
}

/// A legal Java identifier: a letter, `_` or `$` followed by letters, digits,
/// `_` or `$`, and not a reserved word.
pub fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$');
    starts_well
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !is_java_reserved(name)
}

/// Appends an underscore to Java reserved words (`class` -> `class_`).
pub fn java_safe(name: String) -> String {
    if is_java_reserved(&name) {
        name + "_"
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_identifiers() {
        assert_eq!(derive_member_name("user_info"), "userInfo");
        assert_eq!(derive_pascal_name("user_info"), "UserInfo");
        assert_eq!(derive_route_segment("user_info"), "user-info");
    }

    #[test]
    fn already_camel_input_is_flattened() {
        assert_eq!(derive_member_name("userInfo"), "userinfo");
        assert_eq!(derive_pascal_name("userInfo"), "Userinfo");
    }

    #[test]
    fn upper_case_input() {
        assert_eq!(derive_member_name("CREATED_AT"), "createdAt");
        assert_eq!(derive_pascal_name("ORDER_LINE"), "OrderLine");
        assert_eq!(derive_route_segment("ORDER_LINE"), "order-line");
    }

    #[test]
    fn repeated_and_edge_separators_are_skipped() {
        assert_eq!(derive_member_name("_user__name_"), "userName");
        assert_eq!(derive_pascal_name("order-line item"), "OrderLineItem");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(derive_member_name(""), "");
        assert_eq!(derive_pascal_name(""), "");
        assert_eq!(derive_route_segment(""), "");
        assert_eq!(derive_member_name("___"), "");
    }

    #[test]
    fn single_segment() {
        assert_eq!(derive_member_name("id"), "id");
        assert_eq!(derive_pascal_name("user"), "User");
    }

    #[test]
    fn java_identifier_rules() {
        assert!(is_java_identifier("UserInfo"));
        assert!(is_java_identifier("_tmp$1"));
        assert!(!is_java_identifier(""));
        assert!(!is_java_identifier("2fa"));
        assert!(!is_java_identifier("class"));
        assert!(!is_java_identifier("../Pwn"));
        assert!(!is_java_identifier("user.info"));
    }

    #[test]
    fn reserved_words_get_suffix() {
        assert_eq!(java_safe("class".into()), "class_");
        assert_eq!(java_safe("className".into()), "className");
    }
}
