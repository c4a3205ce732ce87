//! Pure string helpers for building resource chains.
//!
//! Both routing variants pair path segments two at a time, but in opposite
//! orders: the web variant reads `resource/param/resource/param`, the rest
//! variant reads `param/resource/param`. The alternation order is exactly
//! what is easy to get wrong, so each walk is its own tested function.

/// Uppercase the first character of a token.
///
/// # Example
/// ```
/// use switchboard_core::chain::capitalize;
///
/// assert_eq!(capitalize("comments"), "Comments");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Split a path into its non-empty segments. Leading, trailing and doubled
/// slashes never produce tokens.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Walk segments resource-name first: odd positions are resource names
/// (capitalized into the chain), even positions are parameter values.
///
/// `["edit", "5", "comments", "3"]` yields chain `"EditComments"` and
/// params `["5", "3"]`.
pub fn resource_first(parts: &[&str]) -> (String, Vec<String>) {
    let mut chain = String::new();
    let mut params = Vec::new();

    let mut i = 0;
    while i < parts.len() {
        chain.push_str(&capitalize(parts[i]));

        if i + 1 < parts.len() {
            params.push(parts[i + 1].to_string());
        }

        i += 2;
    }

    (chain, params)
}

/// Walk segments parameter first: odd positions are parameter values, even
/// positions are sub-resource names. Inverse pairing of [`resource_first`].
///
/// `["5", "comments", "3"]` yields chain `"Comments"` and params
/// `["5", "3"]`.
pub fn parameter_first(parts: &[&str]) -> (String, Vec<String>) {
    let mut chain = String::new();
    let mut params = Vec::new();

    let mut i = 0;
    while i < parts.len() {
        params.push(parts[i].to_string());

        if i + 1 < parts.len() {
            chain.push_str(&capitalize(parts[i + 1]));
        }

        i += 2;
    }

    (chain, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("users"), "Users");
        assert_eq!(capitalize("Users"), "Users");
        assert_eq!(capitalize("x"), "X");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_segments_drops_empty_tokens() {
        assert_eq!(segments("users/5"), vec!["users", "5"]);
        assert_eq!(segments("/users/5/"), vec!["users", "5"]);
        assert_eq!(segments(""), Vec::<&str>::new());
        assert_eq!(segments("/"), Vec::<&str>::new());
    }

    #[test]
    fn test_resource_first_alternation() {
        let (chain, params) = resource_first(&["edit", "5"]);
        assert_eq!(chain, "Edit");
        assert_eq!(params, vec!["5"]);

        let (chain, params) = resource_first(&["edit", "5", "comments", "3"]);
        assert_eq!(chain, "EditComments");
        assert_eq!(params, vec!["5", "3"]);

        // Odd tail: a final resource name without a parameter.
        let (chain, params) = resource_first(&["edit", "5", "comments"]);
        assert_eq!(chain, "EditComments");
        assert_eq!(params, vec!["5"]);
    }

    #[test]
    fn test_parameter_first_alternation() {
        let (chain, params) = parameter_first(&["5"]);
        assert_eq!(chain, "");
        assert_eq!(params, vec!["5"]);

        let (chain, params) = parameter_first(&["5", "comments"]);
        assert_eq!(chain, "Comments");
        assert_eq!(params, vec!["5"]);

        let (chain, params) = parameter_first(&["5", "comments", "3"]);
        assert_eq!(chain, "Comments");
        assert_eq!(params, vec!["5", "3"]);
    }
}
