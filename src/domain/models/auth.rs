use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN_AUDIENCE: &str = "pitch-booking-frontend";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,

    #[serde(rename = "https://pitch-booking.local/claims/role")]
    pub role: String,

    #[serde(rename = "https://pitch-booking.local/claims/csrf")]
    pub csrf_token: String,
}
