//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::{
    ApiTokenSecret, ApiTokenVersion, AuthServiceError, IssuedApiToken, NewApiToken, NewUser,
    Session, User, UserUuid, format_api_token, parse_api_token, repository::PgAuthRepository,
    token_verifier, verifier_matches,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Register a user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::EmailTaken`] when the email is already
    /// registered, or a storage error.
    pub async fn create_user(&self, user: NewUser) -> Result<User, AuthServiceError> {
        if user.name.trim().is_empty() || !user.email.contains('@') {
            return Err(AuthServiceError::InvalidData);
        }

        Ok(self.repository.create_user(&user).await?)
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the insert fails.
    pub async fn issue_api_token(&self, user: UserUuid) -> Result<IssuedApiToken, AuthServiceError> {
        self.repository
            .get_user(user)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = ApiTokenSecret::generate();

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                user_uuid: user,
                version,
                token_hash: token_verifier(&token_uuid, version, user, &secret),
            })
            .await?;

        Ok(IssuedApiToken {
            token: format_api_token(token_uuid, version, &secret),
            metadata,
        })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Session, AuthServiceError> {
        let parsed = parse_api_token(bearer_token).map_err(|error| {
            debug!("rejected malformed api token: {error}");

            AuthServiceError::NotFound
        })?;

        let token = self
            .repository
            .find_active_api_token(parsed.token_uuid, parsed.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let computed = token_verifier(
            &parsed.token_uuid,
            parsed.version,
            token.user_uuid,
            &parsed.secret,
        );

        if token.version != parsed.version || !verifier_matches(&computed, &token.token_hash) {
            return Err(AuthServiceError::NotFound);
        }

        // Authentication does not depend on the last-used bookkeeping.
        if let Err(error) = self.repository.touch_api_token(parsed.token_uuid).await {
            warn!("failed to record api token usage: {error}");
        }

        Ok(Session::new(token.user_uuid, token.role))
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token into the caller's session.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Session, AuthServiceError>;
}
