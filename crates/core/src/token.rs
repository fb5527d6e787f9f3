//! Access tokens.
//!
//! HS256 JWTs carrying `{id, username, exp}`. Expiry is issuance time plus
//! the configured lifetime, computed in a fixed named time zone.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use episodic_common::{AppError, AppResult, config::TokenConfig};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub id: i32,
    /// Username at issuance.
    pub username: String,
    /// Expiry as a Unix timestamp.
    pub exp: i64,
}

/// Signs and verifies access tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    zone: Tz,
}

impl TokenIssuer {
    /// Create an issuer from a shared secret.
    #[must_use]
    pub fn new(secret: &str, ttl: Duration, zone: Tz) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            zone,
        }
    }

    /// Create an issuer from configuration.
    pub fn from_config(config: &TokenConfig) -> AppResult<Self> {
        let zone: Tz = config
            .timezone
            .parse()
            .map_err(|e| AppError::Config(format!("token.timezone: {e}")))?;

        let ttl = Some(config.ttl_minutes)
            .filter(|minutes| *minutes > 0)
            .and_then(Duration::try_minutes)
            .ok_or_else(|| {
                AppError::Config(format!(
                    "token.ttl_minutes: {} is out of range",
                    config.ttl_minutes
                ))
            })?;

        Ok(Self::new(&config.secret, ttl, zone))
    }

    /// Issue a token for a user, valid from now.
    pub fn issue(&self, id: i32, username: &str) -> AppResult<String> {
        self.issue_at(id, username, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, id: i32, username: &str, now: DateTime<Utc>) -> AppResult<String> {
        let expires_at = now
            .with_timezone(&self.zone)
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal("token expiry is out of range".to_string()))?;
        let claims = Claims {
            id,
            username: username.to_string(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {e}")))
    }

    /// Verify a token now.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Claims> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// Bad signatures, malformed tokens and expired tokens all yield `None`.
    #[must_use]
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .ok()?
            .claims;

        (claims.exp > now.timestamp()).then_some(claims)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .field("zone", &self.zone)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::from_config(&TokenConfig::default()).unwrap()
    }

    #[test]
    fn test_round_trip_keeps_identity() {
        let issuer = issuer();
        let now = Utc::now();
        let token = issuer.issue_at(7, "alice", now).unwrap();

        let claims = issuer.verify_at(&token, now).unwrap();
        assert_eq!(claims.id, 7);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp, (now + Duration::minutes(30)).timestamp());
    }

    #[test]
    fn test_expired_after_ttl() {
        let issuer = issuer();
        let now = Utc::now();
        let token = issuer.issue_at(7, "alice", now).unwrap();

        assert!(issuer.verify_at(&token, now + Duration::minutes(29)).is_some());
        assert!(issuer.verify_at(&token, now + Duration::minutes(31)).is_none());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let zone: Tz = "Asia/Seoul".parse().unwrap();
        let ours = TokenIssuer::new("ours", Duration::minutes(30), zone);
        let theirs = TokenIssuer::new("theirs", Duration::minutes(30), zone);

        let token = theirs.issue(1, "mallory").unwrap();
        assert!(ours.verify(&token).is_none());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(issuer().verify("not.a.token").is_none());
        assert!(issuer().verify("").is_none());
    }

    #[test]
    fn test_out_of_range_ttl_is_config_error() {
        for ttl_minutes in [i64::MAX, 0, -5] {
            let config = TokenConfig {
                ttl_minutes,
                ..TokenConfig::default()
            };
            assert!(matches!(
                TokenIssuer::from_config(&config),
                Err(AppError::Config(_))
            ));
        }
    }

    #[test]
    fn test_unknown_timezone_is_config_error() {
        let config = TokenConfig {
            timezone: "Mars/Olympus".to_string(),
            ..TokenConfig::default()
        };
        assert!(matches!(
            TokenIssuer::from_config(&config),
            Err(AppError::Config(_))
        ));
    }
}
