pub mod app_config;
pub mod config;
pub mod profile;
pub mod session;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use profile::{AnalysisResult, NormalizedPost, NormalizedProfile, MAX_POST_LIMIT};
pub use session::{
    EnvSessionProvider, SessionProvider, SessionSettings, StaticSessionProvider,
    SESSION_ID_VAR, USER_AGENT_VAR,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
