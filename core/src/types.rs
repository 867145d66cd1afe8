//! Wire types for the user-management API.
//!
//! # Design
//! Entity records are snapshots of remote state. Every field defaults when
//! absent so partial bodies such as `{"roleId":123}` still decode; the remote
//! API omits fields freely and sends `null` for empty ones, which decodes
//! to the same default. Id keys are also accepted in their `...ID` spelling.
//! Mutation records carry only what the API accepts for that operation:
//! `UpdateRole` has no `accountId` because a role cannot move between
//! accounts.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// A role as returned by the API.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Role {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(alias = "roleID")]
    pub role_id: u64,
    #[serde_as(as = "DefaultOnNull")]
    pub role_name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub role_description: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(alias = "accountID")]
    pub account_id: u64,
    #[serde_as(as = "DefaultOnNull")]
    pub account_name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub role_abilities: Vec<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub user_assignment: Vec<UserAssignment>,
    #[serde_as(as = "DefaultOnNull")]
    pub update_date: String,
    #[serde_as(as = "DefaultOnNull")]
    pub is_editable: bool,
}

/// A user holding a role.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserAssignment {
    #[serde_as(as = "DefaultOnNull")]
    pub user_email: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(alias = "accountID")]
    pub account_id: u64,
}

/// Request payload for creating a role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateRole {
    pub role_name: String,
    pub role_description: String,
    pub account_id: u64,
    pub role_abilities: Vec<String>,
}

/// Request payload for updating a role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRole {
    pub role_name: String,
    pub role_description: String,
    pub role_abilities: Vec<String>,
}

/// A user account as returned by the API.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(alias = "userID")]
    pub user_id: u64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(alias = "accountID")]
    pub account_id: u64,
    #[serde_as(as = "DefaultOnNull")]
    pub first_name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub last_name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub user_email: String,
    #[serde(rename = "rolesDetails", alias = "roleDetails")]
    #[serde_as(as = "DefaultOnNull")]
    pub role_details: Vec<RoleSummary>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleSummary {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(alias = "roleID")]
    pub role_id: u64,
    #[serde_as(as = "DefaultOnNull")]
    pub role_name: String,
}

/// Request payload for creating a user. Roles may be given by id, by name,
/// or both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub account_id: u64,
    pub user_email: String,
    #[serde(default)]
    pub role_ids: Vec<u64>,
    #[serde(default)]
    pub role_names: Vec<String>,
    pub first_name: String,
    pub last_name: String,
}

/// Outcome envelope returned by delete operations.
///
/// `code` is optional on purpose: an envelope without it decodes fine and is
/// then classified as a failure, never as success.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Envelope {
    pub code: Option<i64>,
    #[serde_as(as = "DefaultOnNull")]
    pub message: String,
    #[serde(alias = "debugInfo")]
    pub debug_info: Option<serde_json::Value>,
}
