//! Role operations.

use crate::call::{Call, Context};
use crate::endpoint::{ADD_ROLE, DELETE_ROLE, GET_ROLE, UPDATE_ROLE};
use crate::error::ApiError;
use crate::response::{self, Reply};
use crate::types::{CreateRole, Role, UpdateRole};

const ENTITY: &str = "Role";
const ROLE_ID: &str = "roleId";

impl Reply for Role {
    fn from_body(context: &Context, body: &str) -> Result<Self, ApiError> {
        response::decode(context, body)
    }
}

pub fn add(role: &CreateRole) -> Result<Call<Role>, ApiError> {
    Call::new(
        &ADD_ROLE,
        Context::new(ENTITY, "adding Role", "Role JSON response"),
    )
    .json_body(role)
}

pub fn get(role_id: u64) -> Call<Role> {
    Call::new(
        &GET_ROLE,
        Context::new(
            ENTITY,
            format!("reading Role {role_id}"),
            format!("Role {role_id} JSON response"),
        ),
    )
    .path_param(ROLE_ID, role_id)
}

pub fn update(role_id: u64, role: &UpdateRole) -> Result<Call<Role>, ApiError> {
    Call::new(
        &UPDATE_ROLE,
        Context::new(
            ENTITY,
            format!("updating Role {role_id}"),
            format!("Role {role_id} JSON response"),
        ),
    )
    .path_param(ROLE_ID, role_id)
    .json_body(role)
}

pub fn delete(role_id: u64) -> Call<()> {
    Call::new(
        &DELETE_ROLE,
        Context::new(
            ENTITY,
            format!("deleting Role {role_id}"),
            format!("Delete Role {role_id} JSON response"),
        )
        .refused_as(format!("Role {role_id} JSON response")),
    )
    .path_param(ROLE_ID, role_id)
}
