//! User operations. Users have no path identity: reads and deletes are
//! keyed by `userEmail` + `accountId` in the query string.

use crate::call::{Call, Context};
use crate::endpoint::{ADD_USER, DELETE_USER, GET_USER};
use crate::error::ApiError;
use crate::response::{self, Reply};
use crate::types::{CreateUser, User};

const ENTITY: &str = "User";
const USER_EMAIL: &str = "userEmail";
const ACCOUNT_ID: &str = "accountId";

impl Reply for User {
    fn from_body(context: &Context, body: &str) -> Result<Self, ApiError> {
        response::decode(context, body)
    }
}

pub fn add(user: &CreateUser) -> Result<Call<User>, ApiError> {
    let email = &user.user_email;
    Call::new(
        &ADD_USER,
        Context::new(
            ENTITY,
            format!("adding User {email}"),
            format!("User JSON response for email {email}"),
        ),
    )
    .json_body(user)
}

pub fn get(user_email: &str, account_id: u64) -> Call<User> {
    Call::new(
        &GET_USER,
        Context::new(
            ENTITY,
            format!("reading User for Email {user_email} (account id: {account_id})"),
            format!("User JSON response for Email {user_email} (account id: {account_id})"),
        ),
    )
    .query_param(USER_EMAIL, user_email)
    .query_param(ACCOUNT_ID, account_id)
}

pub fn delete(user_email: &str, account_id: u64) -> Call<()> {
    Call::new(
        &DELETE_USER,
        Context::new(
            ENTITY,
            format!("deleting User with Email {user_email} (account id: {account_id})"),
            format!("Email {user_email} JSON response for Account ID {account_id}"),
        ),
    )
    .query_param(USER_EMAIL, user_email)
    .query_param(ACCOUNT_ID, account_id)
}
