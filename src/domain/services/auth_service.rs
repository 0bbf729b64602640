use crate::domain::models::auth::{Claims, ACCESS_TOKEN_AUDIENCE};
use crate::domain::models::user::CurrentUser;
use crate::error::AppError;
use crate::config::Config;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use chrono::{Utc, Duration};
use rand::{distributions::Alphanumeric, Rng};

/// Issues and verifies the HS256 access tokens handed out by the session
/// provider. Login and refresh live outside this service.
pub struct AuthService {
    config: Config,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(config: Config) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        Self { config, encoding_key, decoding_key }
    }

    /// Returns `(access_token, csrf_token)`.
    pub fn issue_access_token(&self, user_id: &str, role: &str, ttl: Duration) -> Result<(String, String), AppError> {
        let csrf_token: String = rand::thread_rng().sample_iter(&Alphanumeric).take(32).map(char::from).collect();
        let now = Utc::now();

        let claims = Claims {
            iss: self.config.auth_issuer.clone(),
            sub: user_id.to_string(),
            aud: ACCESS_TOKEN_AUDIENCE.to_string(),
            exp: (now + ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            role: role.to_string(),
            csrf_token: csrf_token.clone(),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("JWT encoding failed: {}", e);
                AppError::Internal
            })?;

        Ok((access_token, csrf_token))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[ACCESS_TOKEN_AUDIENCE]);
        validation.set_issuer(&[self.config.auth_issuer.as_str()]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected access token: {}", e);
                AppError::Unauthorized
            })
    }

    pub fn current_user(&self, claims: &Claims) -> CurrentUser {
        CurrentUser {
            id: claims.sub.clone(),
            role: claims.role.clone(),
        }
    }
}
