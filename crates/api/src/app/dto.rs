use serde::Deserialize;

use shopgate_auth::RegisterUser;

// -------------------------
// Request DTOs
// -------------------------

/// `POST /register` body. `email` and `authority` may be omitted.
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub authority: String,
}

impl core::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("authority", &self.authority)
            .finish_non_exhaustive()
    }
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        RegisterUser {
            username: req.username,
            password: req.password,
            email: req.email,
            authority: req.authority,
        }
    }
}
