use serde::{Deserialize, Serialize};

/// Configuration for the user_registration module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserRegistrationConfig {
    /// Serve the OpenAPI document at `/openapi.json`
    #[serde(default = "default_enable_docs")]
    pub enable_docs: bool,
    #[serde(default)]
    pub cors_enabled: bool,
    /// Per-request timeout in seconds; 0 disables it
    #[serde(default = "default_request_timeout_sec")]
    pub request_timeout_sec: u64,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl Default for UserRegistrationConfig {
    fn default() -> Self {
        Self {
            enable_docs: default_enable_docs(),
            cors_enabled: false,
            request_timeout_sec: default_request_timeout_sec(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

fn default_enable_docs() -> bool {
    true
}

fn default_request_timeout_sec() -> u64 {
    30
}

fn default_body_limit_bytes() -> usize {
    1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg: UserRegistrationConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(cfg, UserRegistrationConfig::default());
        assert!(cfg.enable_docs);
        assert!(!cfg.cors_enabled);
        assert_eq!(cfg.request_timeout_sec, 30);
        assert_eq!(cfg.body_limit_bytes, 1_048_576);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res = serde_json::from_value::<UserRegistrationConfig>(json!({"page_size": 5}));
        assert!(res.is_err());
    }
}
