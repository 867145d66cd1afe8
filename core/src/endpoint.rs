//! Static table of the user-management endpoints.
//!
//! Templates are relative to the configured base URL. `{name}` segments are
//! filled from path parameters by the request builder.

use crate::http::HttpMethod;

pub const ROLES_PATH: &str = "user-management/v1/roles";
pub const USERS_PATH: &str = "user-management/v1/users";

/// A named endpoint: HTTP method plus URL template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: HttpMethod,
    pub template: &'static str,
}

pub const ADD_ROLE: Endpoint = Endpoint {
    name: "add_role",
    method: HttpMethod::Post,
    template: ROLES_PATH,
};

pub const GET_ROLE: Endpoint = Endpoint {
    name: "get_role",
    method: HttpMethod::Get,
    template: "user-management/v1/roles/{roleId}",
};

pub const UPDATE_ROLE: Endpoint = Endpoint {
    name: "update_role",
    method: HttpMethod::Put,
    template: "user-management/v1/roles/{roleId}",
};

pub const DELETE_ROLE: Endpoint = Endpoint {
    name: "delete_role",
    method: HttpMethod::Delete,
    template: "user-management/v1/roles/{roleId}",
};

pub const ADD_USER: Endpoint = Endpoint {
    name: "add_user",
    method: HttpMethod::Post,
    template: USERS_PATH,
};

// Users are addressed by `userEmail` + `accountId` in the query string.
pub const GET_USER: Endpoint = Endpoint {
    name: "get_user",
    method: HttpMethod::Get,
    template: USERS_PATH,
};

pub const DELETE_USER: Endpoint = Endpoint {
    name: "delete_user",
    method: HttpMethod::Delete,
    template: USERS_PATH,
};

pub static ENDPOINTS: [Endpoint; 7] = [
    ADD_ROLE,
    GET_ROLE,
    UPDATE_ROLE,
    DELETE_ROLE,
    ADD_USER,
    GET_USER,
    DELETE_USER,
];

/// Find an endpoint by operation name.
pub fn lookup(name: &str) -> Option<&'static Endpoint> {
    ENDPOINTS.iter().find(|endpoint| endpoint.name == name)
}
