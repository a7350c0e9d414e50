use crate::domain::errors::DomainError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const ALL_PROTOCOLS: &str = "all";

/// Proxies por protocolo (`http`, `https`, `all`) hacia su direccion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig(BTreeMap<String, String>);

impl ProxyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agrega un proxy validando su direccion.
    /// # Errors
    /// - `DomainError::InvalidProxy` si el protocolo esta vacio o la direccion no es URL.
    pub fn insert(
        &mut self,
        protocol: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<(), DomainError> {
        let protocol = protocol.into().trim().to_ascii_lowercase();
        let address = address.into().trim().to_string();

        if protocol.is_empty() {
            return Err(DomainError::InvalidProxy(
                "Proxy protocol cannot be empty".to_string(),
            ));
        }
        Url::parse(&address)
            .map_err(|e| DomainError::InvalidProxy(format!("{}: {}", address, e)))?;

        self.0.insert(protocol, address);
        Ok(())
    }

    /// Interpreta entradas `protocolo=direccion`.
    /// # Errors
    /// - `DomainError::InvalidProxy` si alguna entrada no tiene ese formato.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (protocol, address) = pair.split_once('=').ok_or_else(|| {
                DomainError::InvalidProxy(format!("Expected protocol=address, got '{}'", pair))
            })?;
            config.insert(protocol, address)?;
        }
        Ok(config)
    }

    /// Proxy para un esquema: primero el protocolo exacto, luego `all`.
    pub fn for_scheme(&self, scheme: &str) -> Option<&str> {
        self.0
            .get(&scheme.to_ascii_lowercase())
            .or_else(|| self.0.get(ALL_PROTOCOLS))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_for_scheme_prefers_exact() {
        let config = ProxyConfig::from_pairs([
            "all=socks5://127.0.0.1:1080",
            "https=http://10.0.0.1:3128",
        ])
        .unwrap();
        assert_eq!(config.for_scheme("https"), Some("http://10.0.0.1:3128"));
        assert_eq!(config.for_scheme("http"), Some("socks5://127.0.0.1:1080"));
    }

    #[test]
    fn test_proxy_without_match() {
        let config = ProxyConfig::from_pairs(["http=http://10.0.0.1:3128"]).unwrap();
        assert_eq!(config.for_scheme("https"), None);
    }

    #[test]
    fn test_proxy_invalid_pairs_fail() {
        assert!(ProxyConfig::from_pairs(["sin-igual"]).is_err());
        assert!(ProxyConfig::from_pairs(["=http://x:1"]).is_err());
        assert!(ProxyConfig::from_pairs(["https=no es url"]).is_err());
    }
}
