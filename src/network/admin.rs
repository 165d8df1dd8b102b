//! Admin Gate
//!
//! Reset, stop-spawning and start-spawning are only allowed for callers
//! whose `Referer` is on an allow-list. This is a convenience lock for a
//! classroom setting (the admin page lives at a known URL), not real
//! authentication.

use thiserror::Error;
use tracing::{debug, warn};

/// Who may run admin operations.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum AdminPolicy {
    /// Nobody (the default when nothing is configured).
    #[default]
    DenyAll,
    /// Everybody (`*`).
    AllowAll,
    /// Callers whose referer exactly matches one of these.
    AllowList(Vec<String>),
}

/// Admin errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdminError {
    /// Caller is not allowed to run admin operations.
    #[error("forbidden")]
    Forbidden {
        /// Referer the caller presented, if any.
        referer: Option<String>,
    },
}

impl AdminPolicy {
    /// Create policy from the `HUNT_ADMIN_REFERER` environment variable.
    pub fn from_env() -> Self {
        Self::from_setting(std::env::var("HUNT_ADMIN_REFERER").ok().as_deref())
    }

    /// Parse a setting: unset or blank denies all, `*` allows all,
    /// otherwise a comma-separated list of referers.
    pub fn from_setting(setting: Option<&str>) -> Self {
        let Some(raw) = setting.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::DenyAll;
        };
        if raw == "*" {
            return Self::AllowAll;
        }
        let referers: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(String::from)
            .collect();
        if referers.is_empty() {
            Self::DenyAll
        } else {
            Self::AllowList(referers)
        }
    }

    /// Check a caller's referer.
    pub fn authorize(&self, referer: Option<&str>) -> Result<(), AdminError> {
        let allowed = match self {
            Self::DenyAll => false,
            Self::AllowAll => {
                debug!("Admin request from referer {:?}", referer);
                true
            }
            Self::AllowList(referers) => {
                referer.is_some_and(|r| referers.iter().any(|allowed| allowed == r))
            }
        };

        if allowed {
            Ok(())
        } else {
            warn!("Admin request refused (referer: {:?})", referer);
            Err(AdminError::Forbidden { referer: referer.map(String::from) })
        }
    }
}
