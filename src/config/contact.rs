//! Contact moderation configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Contact-request moderation settings
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ContactConfig {
    /// User id of the moderation channel receiving new contact requests
    #[serde(default)]
    pub moderator_id: String,
}

impl ContactConfig {
    /// Validate contact configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.moderator_id.trim().is_empty() {
            return Err(ValidationError::EmptyModeratorId);
        }
        Ok(())
    }
}
