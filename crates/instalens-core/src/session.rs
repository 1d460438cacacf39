//! Session credential and user-agent, resolved at request time.
//!
//! [`EnvSessionProvider`] re-reads the process environment on every call so
//! a rotated `IG_SESSIONID` takes effect without restarting the service.

/// Environment variable holding the upstream `sessionid` cookie value.
pub const SESSION_ID_VAR: &str = "IG_SESSIONID";

/// Environment variable overriding the outbound `User-Agent`.
pub const USER_AGENT_VAR: &str = "IG_USER_AGENT";

/// Credential snapshot for a single request.
///
/// Both values are trimmed; blank values are stored as `None`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionSettings {
    pub session_id: Option<String>,
    pub user_agent: Option<String>,
}

impl SessionSettings {
    #[must_use]
    pub fn new(session_id: Option<&str>, user_agent: Option<&str>) -> Self {
        Self {
            session_id: non_blank(session_id),
            user_agent: non_blank(user_agent),
        }
    }

    /// Builds settings from an env-var style lookup function.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let session_id = lookup(SESSION_ID_VAR).ok();
        let user_agent = lookup(USER_AGENT_VAR).ok();
        Self::new(session_id.as_deref(), user_agent.as_deref())
    }
}

impl std::fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSettings")
            .field(
                "session_id",
                &self.session_id.as_ref().map(|_| "[redacted]"),
            )
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Source of [`SessionSettings`], consulted once per request.
pub trait SessionProvider: Send + Sync {
    fn current(&self) -> SessionSettings;
}

/// Reads `IG_SESSIONID` / `IG_USER_AGENT` from the process environment on
/// every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSessionProvider;

impl SessionProvider for EnvSessionProvider {
    fn current(&self) -> SessionSettings {
        SessionSettings::from_lookup(|key| std::env::var(key))
    }
}

/// Fixed settings, mainly for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionProvider {
    settings: SessionSettings,
}

impl StaticSessionProvider {
    #[must_use]
    pub fn new(settings: SessionSettings) -> Self {
        Self { settings }
    }
}

impl SessionProvider for StaticSessionProvider {
    fn current(&self) -> SessionSettings {
        self.settings.clone()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}
