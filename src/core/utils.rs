//! String transformation utilities for generated identifiers

/// Converts a string to snake_case.
///
/// Handles camelCase, PascalCase, kebab-case and space-separated input.
///
/// # Examples
/// ```
/// use grpc_clientgen::core::utils::to_snake_case;
///
/// assert_eq!(to_snake_case("userProfile"), "user_profile");
/// assert_eq!(to_snake_case("user-profile"), "user_profile");
/// assert_eq!(to_snake_case("account"), "account");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_is_lowercase = false;

    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 && prev_is_lowercase {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase();
        } else if matches!(ch, '-' | '_' | ' ' | '.') {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_is_lowercase = false;
        }
    }

    result.trim_matches('_').to_string()
}

/// Converts a string to PascalCase, used for generated TypeScript type names.
///
/// # Examples
/// ```
/// use grpc_clientgen::core::utils::to_proper_case;
///
/// assert_eq!(to_proper_case("account"), "Account");
/// assert_eq!(to_proper_case("user-profile"), "UserProfile");
/// ```
pub fn to_proper_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

/// Converts a string to camelCase, used for generated TypeScript bindings.
pub fn to_camel_case(s: &str) -> String {
    let mut words = to_snake_case(s)
        .split('_')
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>()
        .into_iter();

    match words.next() {
        None => String::new(),
        Some(first) => first + &words.map(|w| capitalize(&w)).collect::<String>(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("account"), "account");
        assert_eq!(to_snake_case("userProfile"), "user_profile");
        assert_eq!(to_snake_case("UserProfile"), "user_profile");
        assert_eq!(to_snake_case("user-profile"), "user_profile");
        assert_eq!(to_snake_case("user_profile"), "user_profile");
        assert_eq!(to_snake_case("user.profile"), "user_profile");
        assert_eq!(to_snake_case("--edge--"), "edge");
    }

    #[test]
    fn test_to_proper_case() {
        assert_eq!(to_proper_case("account"), "Account");
        assert_eq!(to_proper_case("user-profile"), "UserProfile");
        assert_eq!(to_proper_case("user_profile"), "UserProfile");
        assert_eq!(to_proper_case("userProfile"), "UserProfile");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("account"), "account");
        assert_eq!(to_camel_case("user-profile"), "userProfile");
        assert_eq!(to_camel_case("UserProfile"), "userProfile");
        assert_eq!(to_camel_case(""), "");
    }
}
