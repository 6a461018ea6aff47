use thiserror::Error;

use crate::{Authority, Principal};

/// What a request must satisfy once its rule has been selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Always allowed, anonymous included.
    PermitAll,
    /// Any verified identity.
    Authenticated,
    /// Verified identity holding exactly this authority.
    HasAuthority(Authority),
    /// Verified identity holding at least one of these authorities.
    HasAnyAuthority(Vec<Authority>),
}

impl Requirement {
    pub fn has_authority(name: &str) -> Self {
        Self::HasAuthority(Authority::new(name.to_string()))
    }

    /// Any of the given roles; names are accepted with or without the `ROLE_`
    /// prefix.
    pub fn has_any_role(names: &[&str]) -> Self {
        Self::HasAnyAuthority(names.iter().map(|n| Authority::role(n)).collect())
    }
}

impl core::fmt::Display for Requirement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Requirement::PermitAll => f.write_str("permitAll"),
            Requirement::Authenticated => f.write_str("authenticated"),
            Requirement::HasAuthority(a) => write!(f, "hasAuthority({a})"),
            Requirement::HasAnyAuthority(list) => {
                let names: Vec<&str> = list.iter().map(Authority::as_str).collect();
                write!(f, "hasAnyAuthority({})", names.join(","))
            }
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    /// No verified identity, but the rule needs one.
    #[error("full authentication is required to access this resource")]
    Unauthenticated,

    /// Identity verified, authorities insufficient.
    #[error("forbidden: requires {required}")]
    Forbidden { required: String },
}

/// Decide whether `principal` (or an anonymous caller) satisfies `requirement`.
///
/// - No IO
/// - No panics
pub fn authorize(requirement: &Requirement, principal: Option<&Principal>) -> Result<(), AccessDenied> {
    if let Requirement::PermitAll = requirement {
        return Ok(());
    }

    let principal = principal.ok_or(AccessDenied::Unauthenticated)?;

    let granted = match requirement {
        Requirement::PermitAll | Requirement::Authenticated => true,
        Requirement::HasAuthority(a) => principal.has_authority(a),
        Requirement::HasAnyAuthority(list) => principal.authorities().contains_any(list),
    };

    if granted {
        Ok(())
    } else {
        Err(AccessDenied::Forbidden {
            required: requirement.to_string(),
        })
    }
}
