//! `${VAR}` expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Strings without `${` are returned as-is, so bare `$VAR` and URLs that
/// happen to contain a dollar sign pass through untouched.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar {
            name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.name),
    })
}

/// Expand an optional value in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(v) = value.as_deref() {
        *value = Some(expand_env(v, field)?);
    }
    Ok(())
}

struct UnsetVar {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("PRESS_EXPAND_SIMPLE", "127.0.0.1");
        }
        let result = expand_env("${PRESS_EXPAND_SIMPLE}", "server.host").unwrap();
        assert_eq!(result, "127.0.0.1");
        unsafe {
            std::env::remove_var("PRESS_EXPAND_SIMPLE");
        }
    }

    #[test]
    fn test_expand_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("PRESS_EXPAND_UNSET");
        }
        let result = expand_env("${PRESS_EXPAND_UNSET:-0.0.0.0}", "server.host").unwrap();
        assert_eq!(result, "0.0.0.0");
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("PRESS_EXPAND_CDN", "cdn.example.com");
        }
        let result = expand_env("https://${PRESS_EXPAND_CDN}/logo.png", "theme.logo").unwrap();
        assert_eq!(result, "https://cdn.example.com/logo.png");
        unsafe {
            std::env::remove_var("PRESS_EXPAND_CDN");
        }
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("PRESS_EXPAND_MISSING");
        }
        let err = expand_env("${PRESS_EXPAND_MISSING}", "theme.logo_dark").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("PRESS_EXPAND_MISSING"));
        assert!(err.to_string().contains("theme.logo_dark"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("/img/$logo.jpg", "theme.logo").unwrap();
        assert_eq!(result, "/img/$logo.jpg");
    }

    #[test]
    fn test_expand_opt_none_stays_none() {
        let mut value = None;
        expand_opt(&mut value, "theme.logo").unwrap();
        assert!(value.is_none());
    }
}
