use shopgate_auth::Principal;

/// Authenticated identity attached to a request by the security middleware.
///
/// Absent for anonymous requests that were allowed through a `permitAll` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn username(&self) -> &str {
        self.principal.username()
    }
}
