use std::env;

use serde::{Deserialize, Serialize};

use crate::store::error::{StoreError, StoreErrorKind, invalid_request};

/// Where the bearer token for the API comes from. Obtaining the token is the
/// job of the external account provider; the console only forwards it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialRef {
    Env {
        var: String,
    },
    InlineToken {
        token: String,
    },
    #[default]
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedCredential {
    pub auth_header: Option<String>,
}

impl ResolvedCredential {
    pub fn none() -> Self {
        Self { auth_header: None }
    }

    fn bearer(token: &str) -> Self {
        Self {
            auth_header: Some(format!("Bearer {}", token.trim())),
        }
    }
}

pub fn resolve_credential(reference: &CredentialRef) -> Result<ResolvedCredential, StoreError> {
    match reference {
        CredentialRef::Env { var } => {
            let token = env::var(var).map_err(|_| {
                StoreError::new(
                    StoreErrorKind::Authentication,
                    format!("missing credential environment variable {var}"),
                )
            })?;
            if token.trim().is_empty() {
                return Err(StoreError::new(
                    StoreErrorKind::Authentication,
                    format!("credential environment variable {var} is empty"),
                ));
            }
            Ok(ResolvedCredential::bearer(&token))
        }
        CredentialRef::InlineToken { token } => {
            if token.trim().is_empty() {
                return Err(invalid_request("inline credential token cannot be empty"));
            }
            Ok(ResolvedCredential::bearer(token))
        }
        CredentialRef::None => Ok(ResolvedCredential::none()),
    }
}
