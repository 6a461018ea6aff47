//! API-side authorization guard.
//!
//! Maps an HTTP request onto the access rule table and checks the selected
//! requirement against the (optional) authenticated principal.

use shopgate_auth::{AccessDenied, AccessRules, Method, Principal, authorize};

/// Authorize a request by method + path.
///
/// Methods outside the rule table's vocabulary match no rule and therefore
/// fall through to the default requirement.
pub fn authorize_request(
    rules: &AccessRules,
    method: &axum::http::Method,
    path: &str,
    principal: Option<&Principal>,
) -> Result<(), AccessDenied> {
    let matched = method
        .as_str()
        .parse::<Method>()
        .ok()
        .and_then(|m| rules.first_match(m, path));

    let requirement = match matched {
        Some((index, rule)) => {
            tracing::debug!(
                rule = index,
                pattern = rule.pattern.as_str(),
                requirement = %rule.requirement,
                "access rule matched"
            );
            &rule.requirement
        }
        None => {
            tracing::debug!(requirement = %rules.fallback(), "no access rule matched; using fallback");
            rules.fallback()
        }
    };

    let decision = authorize(requirement, principal);
    match &decision {
        Ok(()) => tracing::debug!(principal = principal.map(Principal::username), "access granted"),
        Err(denied) => tracing::debug!(principal = principal.map(Principal::username), %denied, "access denied"),
    }
    decision
}
