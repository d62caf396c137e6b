use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::error;
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;

/// The only algorithm tokens are minted with and accepted under.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Shared HMAC secret for minting and verifying tokens.
#[derive(Clone)]
pub struct SigningKey(Arc<[u8]>);

impl SigningKey {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self(Arc::from(secret.as_ref()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Never print key material.
impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Identifier of the user the token was issued to.
    pub id: i32,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Claims that passed signature, algorithm and expiry checks.
///
/// Only [`TokenValidator`] can construct this, so holding one is proof of verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedClaims(Claims);

impl VerifiedClaims {
    /// The identity the token was issued to.
    pub fn identity(&self) -> i32 {
        self.0.id
    }

    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

/// Mints HS256 access tokens with a fixed time-to-live.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: Option<EncodingKey>,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(key: &SigningKey, ttl: Duration) -> Self {
        let encoding_key = if key.is_empty() {
            None
        } else {
            Some(EncodingKey::from_secret(key.as_bytes()))
        };
        Self { encoding_key, ttl }
    }

    /// Generates a token for `user_id`, issued now.
    pub fn issue(&self, user_id: i32) -> Result<String, AuthError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Generates a token for `user_id` as if issued at `issued_at`.
    ///
    /// Returns `AuthError::Signing` when the key is empty or encoding fails.
    pub fn issue_at(&self, user_id: i32, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let key = self
            .encoding_key
            .as_ref()
            .ok_or_else(|| AuthError::Signing("signing key is empty".into()))?;

        let iat = issued_at.timestamp();
        let exp = i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(|ttl| iat.checked_add(ttl))
            .ok_or_else(|| AuthError::Signing("token expiry out of range".into()))?;

        let claims = Claims {
            id: user_id,
            iat,
            exp,
        };

        encode(&Header::new(SIGNING_ALGORITHM), &claims, key).map_err(|e| {
            error!("Failed to sign token for user {}: {}", user_id, e);
            AuthError::Signing(e.to_string())
        })
    }
}

/// Verifies tokens minted by a [`TokenIssuer`] sharing the same key.
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(key: &SigningKey) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        // `exp` is still required, but compared against the caller's clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            validation,
        }
    }

    /// Verifies `token` against the current time and returns the user it identifies.
    pub fn validate(&self, token: &str) -> Result<i32, AuthError> {
        self.verify(token).map(|claims| claims.identity())
    }

    pub fn verify(&self, token: &str) -> Result<VerifiedClaims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Parses `token`, pins its algorithm, checks the signature and then checks `exp`
    /// against `now`. A token is still valid at the exact second it expires.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<VerifiedClaims, AuthError> {
        let alg = header_algorithm(token)?;
        match alg.parse::<Algorithm>() {
            Ok(parsed) if parsed == SIGNING_ALGORITHM => {}
            _ => return Err(AuthError::UnexpectedSigningMethod(alg)),
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => {
                    AuthError::UnexpectedSigningMethod(format!("{:?}", e.kind()))
                }
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                    AuthError::ClaimsTypeMismatch
                }
                _ => AuthError::MissingOrMalformedToken,
            })?;

        if now.timestamp() > claims.exp {
            return Err(AuthError::Expired);
        }

        Ok(VerifiedClaims(claims))
    }
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Reads the `alg` field of a compact JWS without trusting anything else in it.
fn header_algorithm(token: &str) -> Result<String, AuthError> {
    let mut segments = token.split('.');
    let header = segments
        .next()
        .filter(|segment| !segment.is_empty())
        .ok_or(AuthError::MissingOrMalformedToken)?;
    if segments.count() != 2 {
        return Err(AuthError::MissingOrMalformedToken);
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| AuthError::MissingOrMalformedToken)?;
    let raw: RawHeader =
        serde_json::from_slice(&bytes).map_err(|_| AuthError::MissingOrMalformedToken)?;
    Ok(raw.alg)
}
