//! Proxy configuration.

/// Default callback base when none is configured.
const DEFAULT_CALLBACK_BASE: &str = "http://localhost:8080";

/// Where remote runtimes reach back to this service.
///
/// The callback base is the externally visible address runtimes use to
/// pull artifact bytes, injected into every rewritten deployment spec.
/// It has to be an address *they* can resolve — `localhost` only works
/// when everything shares a network namespace.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Externally visible base address of this service, no trailing
    /// slash.
    pub callback_base: String,
}

impl ProxyConfig {
    /// Configuration pointing runtimes back at `callback_base`.
    #[must_use]
    pub fn new(callback_base: impl Into<String>) -> Self {
        Self {
            callback_base: callback_base.into().trim_end_matches('/').to_owned(),
        }
    }

    /// Read `SYNAPSE_CALLBACK_URL` from the environment, defaulting to
    /// `http://localhost:8080`.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("SYNAPSE_CALLBACK_URL")
                .unwrap_or_else(|_| DEFAULT_CALLBACK_BASE.to_owned()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ProxyConfig::new("http://proxy:8080/");
        assert_eq!(config.callback_base, "http://proxy:8080");
    }

    #[test]
    fn plain_base_is_kept_as_is() {
        let config = ProxyConfig::new("http://proxy:8080");
        assert_eq!(config.callback_base, "http://proxy:8080");
    }
}
