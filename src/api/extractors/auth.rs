use axum::{
    extract::{FromRequestParts, FromRef},
    http::{header::AUTHORIZATION, request::Parts, Method},
};
use crate::state::AppState;
use crate::domain::models::user::CurrentUser;
use crate::error::AppError;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::Span;

/// Caller authenticated by an access token, taken from `Authorization: Bearer`
/// or, failing that, the `access_token` cookie.
pub struct AuthUser(pub CurrentUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let bearer = parts.headers.get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string);

        let (access_token, from_cookie) = match bearer {
            Some(token) => (token, false),
            None => {
                let cookies = parts.extensions.get::<Cookies>()
                    .ok_or(AppError::Unauthorized)?;
                let token = cookies.get("access_token")
                    .ok_or(AppError::Unauthorized)?
                    .value()
                    .to_string();
                (token, true)
            }
        };

        let claims = app_state.auth_service.verify(&access_token)?;

        // Cookies ride along automatically, so state-changing requests must prove intent.
        let method = &parts.method;
        if from_cookie && method != Method::GET && method != Method::HEAD && method != Method::OPTIONS {
            let csrf_header_val = parts.headers.get("X-CSRF-Token")
                .ok_or(AppError::Forbidden("Missing CSRF token".into()))?
                .to_str()
                .map_err(|_| AppError::Forbidden("Malformed CSRF token".into()))?;

            if csrf_header_val != claims.csrf_token {
                return Err(AppError::Forbidden("CSRF token mismatch".into()));
            }
        }

        let user = app_state.auth_service.current_user(&claims);

        Span::current().record("user_id", user.id.as_str());
        Span::current().record("role", user.role.as_str());

        Ok(AuthUser(user))
    }
}

pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin role required".into()));
        }
        Ok(RequireAdmin(user))
    }
}
