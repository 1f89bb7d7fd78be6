//! Auth Config

use clap::Args;

/// Staff authentication settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Token that unlocks product management endpoints. When unset, those
    /// endpoints always answer 401.
    #[arg(long, env = "STAFF_API_TOKEN", hide_env_values = true)]
    pub staff_api_token: Option<String>,
}
