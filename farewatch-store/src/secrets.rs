use farewatch_core::{CoreError, CoreResult};
use farewatch_shared::Masked;

pub const SEARCH_CLIENT_ID: &str = "AMADEUS_CLIENT_ID";
pub const SEARCH_CLIENT_SECRET: &str = "AMADEUS_CLIENT_SECRET";
pub const SUMMARY_API_KEY: &str = "MISTRAL_API_KEY";
pub const SENDER_EMAIL: &str = "SENDER_EMAIL";
pub const SENDER_PASSWORD: &str = "SENDER_PASSWORD";
pub const RECIPIENT_EMAIL: &str = "RECIPIENT_EMAIL";

/// Credentials and addresses read from the process environment.
/// Never part of the configuration file.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub search_client_id: Masked<String>,
    pub search_client_secret: Masked<String>,
    pub summary_api_key: Masked<String>,
    pub sender_email: String,
    pub sender_password: Masked<String>,
    pub recipient_email: String,
}

impl Secrets {
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve every secret through `lookup`; blank values count as missing
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CoreResult<Self> {
        let mut missing = Vec::new();
        let mut get = |key: &'static str| -> String {
            match lookup(key).map(|v| v.trim().to_string()) {
                Some(value) if !value.is_empty() => value,
                _ => {
                    missing.push(key);
                    String::new()
                }
            }
        };

        let secrets = Secrets {
            search_client_id: get(SEARCH_CLIENT_ID).into(),
            search_client_secret: get(SEARCH_CLIENT_SECRET).into(),
            summary_api_key: get(SUMMARY_API_KEY).into(),
            sender_email: get(SENDER_EMAIL),
            sender_password: get(SENDER_PASSWORD).into(),
            recipient_email: get(RECIPIENT_EMAIL),
        };

        if missing.is_empty() {
            Ok(secrets)
        } else {
            Err(CoreError::ConfigurationError(format!(
                "missing environment variables: {}",
                missing.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_with(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_all_secrets_present() {
        let env = env_with(&[
            (SEARCH_CLIENT_ID, "id"),
            (SEARCH_CLIENT_SECRET, "secret"),
            (SUMMARY_API_KEY, "key"),
            (SENDER_EMAIL, "agent@example.com"),
            (SENDER_PASSWORD, "app-password"),
            (RECIPIENT_EMAIL, "me@example.com"),
        ]);
        let secrets = Secrets::from_lookup(|k| env.get(k).cloned()).unwrap();

        assert_eq!(secrets.search_client_id.expose(), "id");
        assert_eq!(secrets.recipient_email, "me@example.com");
        assert!(!format!("{:?}", secrets).contains("app-password"));
    }

    #[test]
    fn test_missing_secrets_are_listed_together() {
        let env = env_with(&[(SEARCH_CLIENT_ID, "id"), (SUMMARY_API_KEY, "  "), (SENDER_EMAIL, "a@b.c")]);
        let err = Secrets::from_lookup(|k| env.get(k).cloned()).unwrap_err();

        let msg = err.to_string();
        assert!(matches!(err, CoreError::ConfigurationError(_)));
        assert!(msg.contains("AMADEUS_CLIENT_SECRET, MISTRAL_API_KEY, SENDER_PASSWORD, RECIPIENT_EMAIL"));
        assert!(!msg.contains("AMADEUS_CLIENT_ID,"));
    }
}
