//! Gateway utility functions.

/// Expand `${VAR}` and `${VAR:-default}` patterns with environment values.
///
/// Unset or empty variables expand to the default, or to an empty string
/// when none is given. An unterminated `${` is kept literally.
pub fn expand_env_vars(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

/// [`expand_env_vars`] over an arbitrary lookup.
pub fn expand_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            result.push_str(&rest[start..]);
            return result;
        };
        let expr = &after[..end];
        let (name, default) = match expr.split_once(":-") {
            Some((name, default)) => (name, default),
            None => (expr, ""),
        };
        match lookup(name).filter(|v| !v.is_empty()) {
            Some(value) => result.push_str(&value),
            None => result.push_str(default),
        }
        rest = &after[end + 1..];
    }
    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::expand_with;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "HOST" => Some("0.0.0.0".to_owned()),
            "EMPTY" => Some(String::new()),
            _ => None,
        }
    }

    #[test]
    fn expands_known_and_defaults() {
        assert_eq!(expand_with("bind = \"${HOST}:3000\"", lookup), "bind = \"0.0.0.0:3000\"");
        assert_eq!(expand_with("${MISSING:-8080}", lookup), "8080");
        assert_eq!(expand_with("${EMPTY:-x}", lookup), "x");
        assert_eq!(expand_with("a${MISSING}b", lookup), "ab");
    }

    #[test]
    fn leaves_unterminated_pattern() {
        assert_eq!(expand_with("cost: $5 ${HOST", lookup), "cost: $5 ${HOST");
    }
}
