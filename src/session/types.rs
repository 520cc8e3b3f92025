use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::EntityId;
use crate::session::token::AuthToken;

/// Account tiers the backend hands out. `temp` is a guest session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Temp,
    Personal,
    Professional,
    Business,
    Admin,
}

impl AccountType {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountType::Temp => "temp",
            AccountType::Personal => "personal",
            AccountType::Professional => "professional",
            AccountType::Business => "business",
            AccountType::Admin => "admin",
        }
    }

    pub fn is_guest(self) -> bool {
        self == AccountType::Temp
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "temp" => Some(AccountType::Temp),
            "personal" => Some(AccountType::Personal),
            "professional" => Some(AccountType::Professional),
            "business" => Some(AccountType::Business),
            "admin" => Some(AccountType::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What survives a restart: who is logged in, their token, and the first
/// feed page so the app can render before the network answers.
///
/// Field names match what the mobile client stored, so existing session
/// files stay readable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    #[serde(rename = "user")]
    pub user_id: Option<EntityId>,
    #[serde(rename = "userToken")]
    pub token: Option<AuthToken>,
    pub account_type: AccountType,
    #[serde(rename = "initialData", skip_serializing_if = "Option::is_none")]
    pub cached_feed: Option<Value>,
}

impl Session {
    pub fn new(user_id: impl Into<EntityId>, token: AuthToken, account_type: AccountType) -> Self {
        Self {
            user_id: Some(user_id.into()),
            token: Some(token),
            account_type,
            cached_feed: None,
        }
    }

    /// A user id and a non-empty token.
    pub fn is_logged_in(&self) -> bool {
        self.user_id.is_some() && self.token.as_ref().is_some_and(|t| !t.is_empty())
    }
}
