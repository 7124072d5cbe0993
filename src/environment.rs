use std::env;
use std::str::FromStr;

/// Retrieves an environment variable and splits it into a vector of strings based on a delimiter.
///
/// Empty segments are dropped, so an unset variable yields an empty vector.
///
/// # Arguments
/// - `var`: The name of the environment variable.
/// - `delimiter`: The character to split the environment variable's value by.
///
/// # Returns
/// - `Vec<String>`
pub fn get_env_var_as_vec(var: &str, delimiter: char) -> Vec<String> {
    env::var(var)
        .unwrap_or_default()
        .split(delimiter)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parses an environment variable into `T`, falling back to `default` when the
/// variable is unset or does not parse.
pub fn get_env_var_or<T: FromStr>(var: &str, default: T) -> T {
    env::var(var)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_as_vec() {
        env::set_var("HERALD_TEST_VEC", " alpha ; beta;;gamma ");
        assert_eq!(
            get_env_var_as_vec("HERALD_TEST_VEC", ';'),
            vec!["alpha", "beta", "gamma"]
        );
        assert!(get_env_var_as_vec("HERALD_TEST_UNSET_VEC", ';').is_empty());
    }

    #[test]
    fn test_env_var_or() {
        env::set_var("HERALD_TEST_NUM", "42");
        env::set_var("HERALD_TEST_BAD_NUM", "forty-two");
        assert_eq!(get_env_var_or("HERALD_TEST_NUM", 7u32), 42);
        assert_eq!(get_env_var_or("HERALD_TEST_BAD_NUM", 7u32), 7);
        assert_eq!(get_env_var_or("HERALD_TEST_UNSET_NUM", 0.5f64), 0.5);
    }
}
