//! Lenient data source
//!
//! Static builds must succeed without live data, so a missing credential is
//! not fatal here. Instead of a placeholder handle the data source records
//! why it is unconfigured, and every query through it returns
//! [`DbError::NotConfigured`].

use super::client::SupabaseClient;
use super::error::DbError;
use crate::config::DatabaseConfig;

/// Outcome of configuring the database connection
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Credentials were present and valid
    Connected(SupabaseClient),
    /// Credentials were missing or invalid; holds the reason
    Unconfigured(String),
}

impl DataSource {
    /// Build a data source, never failing on missing configuration
    pub fn from_config(config: &DatabaseConfig) -> Self {
        match SupabaseClient::connect(config) {
            Ok(client) => {
                tracing::info!("Database configured");
                Self::Connected(client)
            }
            Err(e) => {
                tracing::warn!("Database not configured, pages will render without live data: {}", e);
                Self::Unconfigured(e.to_string())
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    /// Borrow the client, or explain why there is none
    pub fn client(&self) -> Result<&SupabaseClient, DbError> {
        match self {
            Self::Connected(client) => Ok(client),
            Self::Unconfigured(reason) => Err(DbError::NotConfigured {
                reason: reason.clone(),
            }),
        }
    }

    /// Take the client, or explain why there is none
    pub fn into_client(self) -> Result<SupabaseClient, DbError> {
        match self {
            Self::Connected(client) => Ok(client),
            Self::Unconfigured(reason) => Err(DbError::NotConfigured { reason }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{lock_env, clear_env, Config, ENV_DATABASE_KEY, ENV_DATABASE_URL};

    #[test]
    fn test_configured_source() {
        let source = DataSource::from_config(&DatabaseConfig::new("https://abc.supabase.co", "key"));

        assert!(source.is_configured());
        assert!(source.client().is_ok());
        assert!(source.into_client().is_ok());
    }

    #[test]
    fn test_unconfigured_source_does_not_fail() {
        let source = DataSource::from_config(&DatabaseConfig::default());

        assert!(!source.is_configured());
        let err = source.client().unwrap_err();
        assert!(err.is_not_configured());
        assert!(err.to_string().contains(ENV_DATABASE_URL));
    }

    #[test]
    fn test_invalid_url_is_unconfigured() {
        let source = DataSource::from_config(&DatabaseConfig::new("not a url", "key"));

        assert!(!source.is_configured());
        assert!(source.into_client().unwrap_err().is_not_configured());
    }

    #[test]
    fn test_from_environment() {
        let _guard = lock_env();
        clear_env();
        std::env::set_var(ENV_DATABASE_URL, "https://env.supabase.co");

        let half = DataSource::from_config(&Config::from_env().database);
        std::env::set_var(ENV_DATABASE_KEY, "env-key");
        let full = DataSource::from_config(&Config::from_env().database);
        clear_env();

        assert!(!half.is_configured());
        assert!(half.client().unwrap_err().to_string().contains(ENV_DATABASE_KEY));
        assert!(full.is_configured());
    }
}
