//! Hostname, token and organization resolution
//!
//! Each value comes from, in order: the explicit argument, the environment,
//! then a default where one exists. The environment is read through a lookup
//! function so resolution can be tested without touching process state.

use crate::config::{defaults, env};
use crate::error::{Result, TfeError};
use crate::logging::LogHandle;

/// Environment variable lookup
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Lookup backed by the process environment
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Resolve a value: argument first, then the environment variable
///
/// Empty strings count as absent.
fn resolve(arg: Option<&str>, var: &str, lookup: EnvLookup<'_>, log: LogHandle) -> Option<String> {
    if let Some(value) = arg.filter(|v| !v.is_empty()) {
        log.debug(format_args!("Using {} from argument", var));
        return Some(value.to_string());
    }
    let value = lookup(var).filter(|v| !v.is_empty())?;
    log.debug(format_args!("Using {} from environment", var));
    Some(value)
}

/// Hostname without scheme or trailing `/`, defaulting to `app.terraform.io`
pub fn resolve_hostname(arg: Option<&str>, lookup: EnvLookup<'_>, log: LogHandle) -> Result<String> {
    let raw = resolve(arg, env::HOSTNAME, lookup, log)
        .unwrap_or_else(|| defaults::HOSTNAME.to_string());

    let host = raw
        .trim()
        .trim_start_matches("https://")
        .trim_end_matches('/');
    if host.is_empty() || host.contains('/') || host.starts_with("http://") {
        return Err(TfeError::Config(format!("invalid hostname '{}'", raw)));
    }
    Ok(host.to_string())
}

/// API token; `MissingToken` when neither argument nor environment has one
pub fn resolve_token(arg: Option<&str>, lookup: EnvLookup<'_>, log: LogHandle) -> Result<String> {
    resolve(arg, env::TOKEN, lookup, log).ok_or_else(|| {
        log.error(format_args!("No API token found"));
        TfeError::MissingToken(format!(
            "No API token found. Pass a token or set the {} environment variable.",
            env::TOKEN
        ))
    })
}

/// Optional default organization
pub fn resolve_organization(arg: Option<&str>, lookup: EnvLookup<'_>, log: LogHandle) -> Option<String> {
    resolve(arg, env::ORG, lookup, log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_argument_takes_precedence() {
        let lookup = lookup_from(&[("TFE_TOKEN", "from-env"), ("TFE_ORG", "env-org")]);
        let log = LogHandle::default();
        assert_eq!(resolve_token(Some("from-arg"), &lookup, log).unwrap(), "from-arg");
        assert_eq!(
            resolve_organization(Some("arg-org"), &lookup, log).as_deref(),
            Some("arg-org")
        );
    }

    #[test]
    fn test_environment_fallback() {
        let lookup = lookup_from(&[
            ("TFE_TOKEN", "from-env"),
            ("TFE_HOSTNAME", "tfe.example.com/"),
            ("TFE_ORG", "env-org"),
        ]);
        let log = LogHandle::default();
        assert_eq!(resolve_token(None, &lookup, log).unwrap(), "from-env");
        assert_eq!(resolve_hostname(None, &lookup, log).unwrap(), "tfe.example.com");
        assert_eq!(resolve_organization(None, &lookup, log).as_deref(), Some("env-org"));
    }

    #[test]
    fn test_defaults_and_missing_token() {
        let lookup = lookup_from(&[]);
        let log = LogHandle::default();
        assert_eq!(resolve_hostname(None, &lookup, log).unwrap(), "app.terraform.io");
        assert!(resolve_organization(None, &lookup, log).is_none());
        match resolve_token(None, &lookup, log) {
            Err(TfeError::MissingToken(msg)) => assert!(msg.contains("TFE_TOKEN")),
            other => panic!("Expected MissingToken, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_values_are_absent() {
        let lookup = lookup_from(&[("TFE_TOKEN", "")]);
        assert!(resolve_token(Some(""), &lookup, LogHandle::default()).is_err());
    }

    #[test]
    fn test_hostname_normalization() {
        let lookup = lookup_from(&[]);
        let log = LogHandle::default();
        assert_eq!(
            resolve_hostname(Some("https://tfe.example.com/"), &lookup, log).unwrap(),
            "tfe.example.com"
        );
        assert!(matches!(
            resolve_hostname(Some("http://tfe.example.com"), &lookup, log),
            Err(TfeError::Config(_))
        ));
        assert!(matches!(
            resolve_hostname(Some("tfe.example.com/api"), &lookup, log),
            Err(TfeError::Config(_))
        ));
    }
}
