//! Account roles and lifecycle edges

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Role of an account in the MFS.
///
/// The only defined transitions are `Pending -> Agent` (administrative
/// approval) and the block/unblock toggle on `Agent` accounts; roles never
/// change in any other way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// End-user wallet account.
    User,
    /// Approved cash agent with a float balance.
    Agent,
    /// Agent application awaiting administrative approval.
    Pending,
    /// Administrative account.
    Admin,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Agent => "agent",
            Self::Pending => "pending",
            Self::Admin => "admin",
        }
    }

    /// Whether this role shows up in the administrative agent review list.
    pub fn is_agent_or_pending(&self) -> bool {
        matches!(self, Self::Agent | Self::Pending)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role string encountered while parsing.
#[derive(Debug, Clone, Error)]
#[error("Unknown account type: {0}")]
pub struct UnknownAccountType(pub String);

impl FromStr for AccountType {
    type Err = UnknownAccountType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "agent" => Ok(Self::Agent),
            "pending" => Ok(Self::Pending),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownAccountType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for role in [
            AccountType::User,
            AccountType::Agent,
            AccountType::Pending,
            AccountType::Admin,
        ] {
            assert_eq!(role.as_str().parse::<AccountType>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!("superuser".parse::<AccountType>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&AccountType::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }
}
