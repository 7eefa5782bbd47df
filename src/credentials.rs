//! MakeHub API credential, as supplied by the host's credential store.

use crate::{Error, Result};
use serde::Deserialize;

/// API credential for MakeHub. The host platform resolves and stores this;
/// the core only checks the precondition and forwards the key as a bearer
/// token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub api_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Fails with [`Error::MissingCredential`] when the key is empty or
    /// whitespace. Called before any network activity.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::MissingCredential);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_key() {
        assert!(Credentials::new("mk-123").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_and_blank() {
        assert!(matches!(
            Credentials::new("").validate(),
            Err(Error::MissingCredential)
        ));
        assert!(matches!(
            Credentials::new("   ").validate(),
            Err(Error::MissingCredential)
        ));
    }
}
