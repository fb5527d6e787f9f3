//! Authentication service.

use episodic_common::AppResult;
use episodic_db::{repositories::UserRepository, session::SessionFactory};
use tracing::{debug, info};
use validator::Validate;

use crate::convert::to_transfer;
use crate::token::{Claims, TokenIssuer};
use crate::transfer::{Credentials, UserResponse};

/// Login and access-token handling.
#[derive(Clone, Debug)]
pub struct AuthService {
    factory: SessionFactory,
    tokens: TokenIssuer,
}

impl AuthService {
    /// Create a new auth service.
    #[must_use]
    pub const fn new(factory: SessionFactory, tokens: TokenIssuer) -> Self {
        Self { factory, tokens }
    }

    /// The user whose username and password match exactly, if any.
    ///
    /// Passwords are compared as stored, in plaintext.
    pub async fn login(&self, credentials: &Credentials) -> AppResult<Option<UserResponse>> {
        if credentials.validate().is_err() {
            return Ok(None);
        }

        let session = self.factory.open().await?;
        let result = match session.conn() {
            Ok(conn) => UserRepository::new()
                .find_by_credentials(conn, &credentials.username, &credentials.password)
                .await
                .map(to_transfer::<_, UserResponse>),
            Err(e) => Err(e),
        };
        session.close().await;

        match &result {
            Ok(Some(user)) => info!(user_id = user.id, "Login succeeded"),
            Ok(None) => debug!(username = %credentials.username, "Login failed"),
            Err(_) => {}
        }
        result
    }

    /// Issue an access token for a user.
    pub fn issue_token(&self, user: &UserResponse) -> AppResult<String> {
        self.tokens.issue(user.id, &user.username)
    }

    /// Verify an access token. Any failure yields `None`.
    #[must_use]
    pub fn verify_token(&self, token: &str) -> Option<Claims> {
        self.tokens.verify(token)
    }

    /// The token issuer.
    #[must_use]
    pub const fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }
}
