/// Escape sequences for characters that are not legal in target identifiers.
pub const SPECIAL_CHARACTERS: &[(char, &str)] = &[
    ('!', "__BANG__"),
    ('$', "__DOLLAR__"),
    ('#', "__POUND__"),
    ('-', "__DASH__"),
    ('@', "__AT__"),
    ('%', "__PER__"),
    ('^', "__HAT__"),
    ('*', "__STAR__"),
    ('>', "__GT__"),
    ('<', "__LT__"),
    ('?', "__QEST__"),
    ('~', "__CURL__"),
    ('|', "__PIPE__"),
    ('+', "__PLUS__"),
    ('/', "__SLASH__"),
    ('\\', "__BSLASH__"),
];

/// Rewrites source identifiers into identifiers that are legal in a target
/// language.
///
/// The rules apply in order:
/// 1. names that are operator tokens of the target pass through unchanged
/// 2. reserved words of the target are replaced by their escape token
/// 3. every special character is replaced by its escape sequence
#[derive(Debug)]
pub struct Mangler {
    reserved_words: &'static [(&'static str, &'static str)],
    operator_tokens: &'static [&'static str],
}

impl Mangler {
    pub const fn new(
        reserved_words: &'static [(&'static str, &'static str)],
        operator_tokens: &'static [&'static str],
    ) -> Self {
        Self {
            reserved_words,
            operator_tokens,
        }
    }

    pub fn is_operator_token(&self, name: &str) -> bool {
        self.operator_tokens.contains(&name)
    }

    pub fn reserved_word(&self, name: &str) -> Option<&'static str> {
        self.reserved_words
            .iter()
            .find(|(word, _)| *word == name)
            .map(|(_, escaped)| *escaped)
    }

    pub fn mangle(&self, name: &str) -> String {
        if self.is_operator_token(name) {
            return name.to_string();
        }

        if let Some(escaped) = self.reserved_word(name) {
            return escaped.to_string();
        }

        let mut buffer = String::with_capacity(name.len());
        for c in name.chars() {
            match escape_character(c) {
                Some(escaped) => buffer.push_str(escaped),
                None => buffer.push(c),
            }
        }
        buffer
    }
}

#[inline]
fn escape_character(c: char) -> Option<&'static str> {
    SPECIAL_CHARACTERS
        .iter()
        .find(|(special, _)| *special == c)
        .map(|(_, escaped)| *escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESERVED: &[(&str, &str)] = &[("default", "__DEFAULT__"), ("return", "__RETURN__")];
    const OPERATORS: &[&str] = &["+", "===", "<"];
    const MANGLER: Mangler = Mangler::new(RESERVED, OPERATORS);

    #[test]
    fn test_mangle_special_characters() {
        assert_eq!(MANGLER.mangle("list?"), "list__QEST__");
        assert_eq!(MANGLER.mangle("set-car!"), "set__DASH__car__BANG__");
        assert_eq!(MANGLER.mangle("->vector"), "__DASH____GT__vector");
        assert_eq!(MANGLER.mangle("a\\b"), "a__BSLASH__b");
    }

    #[test]
    fn test_mangle_reserved_words() {
        assert_eq!(MANGLER.mangle("default"), "__DEFAULT__");
        assert_eq!(MANGLER.mangle("return"), "__RETURN__");
        assert_eq!(MANGLER.mangle("returns"), "returns");
    }

    #[test]
    fn test_operator_tokens_pass_through() {
        assert_eq!(MANGLER.mangle("+"), "+");
        assert_eq!(MANGLER.mangle("==="), "===");
        assert_eq!(MANGLER.mangle("<="), "__LT__=");
    }

    #[quickcheck]
    fn prop_plain_identifiers_are_unchanged(name: String) -> bool {
        let plain: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();

        MANGLER.reserved_word(&plain).is_some() || MANGLER.mangle(&plain) == plain
    }

    #[quickcheck]
    fn prop_mangling_is_deterministic(name: String) -> bool {
        MANGLER.mangle(&name) == MANGLER.mangle(&name)
    }

    #[quickcheck]
    fn prop_mangling_is_injective(lhs: String, rhs: String) -> bool {
        // escape sequences never occur in source identifiers
        if lhs.contains("__") || rhs.contains("__") || lhs == rhs {
            return true;
        }

        MANGLER.mangle(&lhs) != MANGLER.mangle(&rhs)
    }

    #[quickcheck]
    fn prop_mangled_names_contain_no_special_characters(name: String) -> bool {
        MANGLER.is_operator_token(&name)
            || MANGLER
                .mangle(&name)
                .chars()
                .all(|c| escape_character(c).is_none())
    }
}
