//! OAuth2 service-account flow: sign a JWT assertion, trade it for a
//! bearer token.

use std::path::Path;

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;

/// The fields of a service-account key file this sink needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_owned()
}

impl ServiceAccountKey {
    /// Reads and parses a key file.
    ///
    /// # Errors
    ///
    /// - [`LoadError::CredentialsNotFound`]: `path` does not exist.
    /// - [`LoadError::Credentials`]: unreadable or not a service-account key.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::CredentialsNotFound {
                path: path.to_path_buf(),
            });
        }
        let invalid = |reason: String| LoadError::Credentials {
            path: path.to_path_buf(),
            reason,
        };
        let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Signs an RS256 assertion for `scope`.
pub(crate) fn sign_assertion(
    key: &ServiceAccountKey,
    scope: &str,
    key_path: &Path,
) -> Result<String, LoadError> {
    let invalid = |reason: String| LoadError::Credentials {
        path: key_path.to_path_buf(),
        reason,
    };
    let encoding_key =
        EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| invalid(e.to_string()))?;

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        iss: &key.client_email,
        scope,
        aud: &key.token_uri,
        iat: now,
        exp: now + TOKEN_LIFETIME_SECS,
    };

    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .map_err(|e| invalid(e.to_string()))
}

/// Exchanges a signed assertion for an access token at the key's token URI.
pub(crate) async fn fetch_access_token(
    client: &reqwest::Client,
    key: &ServiceAccountKey,
    assertion: &str,
) -> Result<String, LoadError> {
    let response = client
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])
        .send()
        .await
        .map_err(|e| LoadError::Token(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LoadError::Token(format!("HTTP {}: {body}", status.as_u16())));
    }

    response
        .json::<TokenResponse>()
        .await
        .map(|t| t.access_token)
        .map_err(|e| LoadError::Token(e.to_string()))
}
