use axum::{async_trait, extract::FromRequestParts, http::header, http::request::Parts};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Access tier, ordered: every tier includes the features below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Pro,
    Enterprise,
}

impl Tier {
    /// Parse a stored tier label; anything unrecognised is free.
    pub fn parse(value: &str) -> Self {
        match value {
            "pro" => Tier::Pro,
            "enterprise" => Tier::Enterprise,
            _ => Tier::Free,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Pro => "pro",
            Tier::Enterprise => "enterprise",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims carried by the auth provider's access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: usize,
}

pub struct AuthenticatedUser {
    pub id: String,
    pub email: Option<String>,
    pub tier: Tier,
}

impl AuthenticatedUser {
    /// Gate a handler on a minimum tier.
    pub fn require(&self, required: Tier) -> Result<(), ApiError> {
        if self.tier < required {
            return Err(ApiError::InsufficientTier {
                current: self.tier,
                required,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ApiError::Unauthorized("Missing or malformed authorization header".into())
            })?;

        let token = header
            .strip_prefix("Bearer ")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("No token provided".into()))?;

        let key = DecodingKey::from_secret(state.config.jwt_secret.as_bytes());
        let data = decode::<Claims>(token, &key, &Validation::default())
            .map_err(|err| ApiError::Unauthorized(format!("Invalid or expired token: {err}")))?;
        let claims = data.claims;

        // Tier lives in the profile row; a down database degrades to free
        // rather than locking everyone out.
        let tier = match state
            .profiles
            .get_or_create(&claims.sub, claims.email.as_deref())
            .await
        {
            Ok(profile) => Tier::parse(&profile.tier),
            Err(err) => {
                warn!(error = %err, "Profile lookup failed; defaulting to free tier");
                Tier::Free
            }
        };

        Ok(AuthenticatedUser {
            id: claims.sub,
            email: claims.email,
            tier,
        })
    }
}
