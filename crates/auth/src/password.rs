//! One-way salted password hashing (bcrypt).

use crate::error::AuthError;

/// Cost used when none is configured.
pub const DEFAULT_COST: u32 = 10;

/// Accepted bcrypt cost range.
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// bcrypt password encoder with a fixed cost factor.
///
/// Every call to [`PasswordEncoder::encode`] generates a fresh salt, so hashing
/// the same password twice yields different strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordEncoder {
    cost: u32,
}

impl PasswordEncoder {
    /// Create an encoder. `cost` must lie in bcrypt's accepted range (4..=31).
    pub fn new(cost: u32) -> Result<Self, AuthError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(AuthError::Hashing(format!(
                "cost {cost} outside {}..={}",
                MIN_COST,
                MAX_COST
            )));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn encode(&self, raw_password: &str) -> Result<String, AuthError> {
        bcrypt::hash(raw_password, self.cost).map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Check `raw_password` against a stored hash.
    ///
    /// The salt and cost are read from the stored hash. A malformed hash never
    /// matches.
    pub fn matches(&self, raw_password: &str, stored_hash: &str) -> bool {
        if stored_hash.is_empty() {
            return false;
        }
        match bcrypt::verify(raw_password, stored_hash) {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!("stored password hash could not be parsed: {e}");
                false
            }
        }
    }
}

impl Default for PasswordEncoder {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}
