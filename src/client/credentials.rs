//! Module `credentials`
//!
//! Login credential shapes. An account can only be supplied together with
//! a password, so the combinations are modeled as distinct variants
//! instead of a pair of independent options.

/// Credentials for the USER / PASS / ACCT login sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    UserOnly(String),
    UserPass(String, String),
    UserPassAcct(String, String, String),
}

impl Credentials {
    /// Build credentials from loose parts. Returns `None` for the one
    /// invalid shape: an account without a password.
    pub fn from_parts(
        username: &str,
        password: Option<&str>,
        account: Option<&str>,
    ) -> Option<Self> {
        match (password, account) {
            (None, None) => Some(Self::UserOnly(username.to_string())),
            (Some(p), None) => Some(Self::UserPass(username.to_string(), p.to_string())),
            (Some(p), Some(a)) => Some(Self::UserPassAcct(
                username.to_string(),
                p.to_string(),
                a.to_string(),
            )),
            (None, Some(_)) => None,
        }
    }

    /// Conventional anonymous login.
    pub fn anonymous() -> Self {
        Self::UserPass("anonymous".to_string(), "anonymous".to_string())
    }

    pub fn username(&self) -> &str {
        match self {
            Self::UserOnly(u) | Self::UserPass(u, _) | Self::UserPassAcct(u, _, _) => u,
        }
    }

    pub fn password(&self) -> Option<&str> {
        match self {
            Self::UserOnly(_) => None,
            Self::UserPass(_, p) | Self::UserPassAcct(_, p, _) => Some(p),
        }
    }

    pub fn account(&self) -> Option<&str> {
        match self {
            Self::UserPassAcct(_, _, a) => Some(a),
            _ => None,
        }
    }
}
