//! Session collaborator
//!
//! Signing in is handled elsewhere; the booking flows only need the bearer
//! token of the current session.

/// Source of the current session's bearer token
pub trait SessionProvider: Send + Sync {
    /// Bearer token, or `None` when nobody is signed in
    fn token(&self) -> Option<String>;
}

/// A session with a token fixed at construction
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    token: Option<String>,
}

impl StaticSession {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: if token.trim().is_empty() { None } else { Some(token) },
        }
    }

    /// A session with nobody signed in
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_option(token: Option<String>) -> Self {
        token.map(Self::new).unwrap_or_default()
    }
}

impl SessionProvider for StaticSession {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }
}
