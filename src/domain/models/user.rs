use serde::Serialize;

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_USER: &str = "USER";

/// Caller identity as asserted by the session provider's access token.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    pub role: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Owners act on their own bookings; admins act on any.
    pub fn can_manage(&self, owner_id: &str) -> bool {
        self.is_admin() || self.id == owner_id
    }
}
