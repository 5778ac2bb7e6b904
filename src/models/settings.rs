use serde::{Deserialize, Serialize};

/// Registration gating, stored as a single settings document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueSettings {
    pub registration_token: String,
    pub allow_registration: bool,
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            registration_token: "123456".to_string(),
            allow_registration: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub allow_registration: bool,
    pub registration_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTokenRequest {
    /// Omitted token means "rotate to a freshly generated one".
    pub registration_token: Option<String>,
}
