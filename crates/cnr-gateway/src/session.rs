//! # Session state and its persistence
//!
//! A [`Session`] is the bearer token plus the authenticated user's
//! profile. The token is held in [`Zeroizing`] so it is wiped from memory
//! on drop. [`SessionStore`] persists the pair as a JSON file in
//! client-local storage; a stored session is only usable when both halves
//! are present, and `clear` removes the file on logout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// The two roles the backend recognizes. Any other wire value is a
/// client-side configuration error, rejected before a call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Parse the wire form ("admin" / "user").
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            _ => None,
        }
    }

    /// The pensions endpoint prefix this role is routed to.
    pub fn pensions_prefix(self) -> &'static str {
        match self {
            Self::Admin => "admin/pensions",
            Self::User => "pensions",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
        }
    }
}

/// Profile of the authenticated user, as returned by login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// An authenticated session: bearer token + user profile.
#[derive(Debug)]
pub struct Session {
    token: Zeroizing<String>,
    user: UserProfile,
}

impl Session {
    /// Assemble a session from a validated token and profile.
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: Zeroizing::new(token.into()),
            user,
        }
    }

    /// The bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The authenticated user's profile.
    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    /// The role used for endpoint routing.
    pub fn role(&self) -> Role {
        self.user.role
    }
}

/// Errors from the session store.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Reading or writing the session file failed.
    #[error("session storage I/O at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The stored session is unreadable.
    #[error("stored session at {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk shape of a persisted session.
#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: String,
    user: UserProfile,
}

/// File-backed persistence for the current session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// A store writing to the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session, if a complete one exists.
    ///
    /// An absent file is simply `None`. A file missing either the token
    /// or the profile is treated as absent as well — half a session is
    /// never usable.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SessionError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let stored: StoredSession =
            serde_json::from_str(&raw).map_err(|source| SessionError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        if stored.token.is_empty() {
            return Ok(None);
        }
        Ok(Some(Session::new(stored.token, stored.user)))
    }

    /// Persist a session, creating parent directories as needed.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let io_err = |source| SessionError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let stored = StoredSession {
            token: session.token().to_string(),
            user: session.user().clone(),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(|source| {
            SessionError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(io_err)
    }

    /// Remove the persisted session. Removing a session that does not
    /// exist is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
