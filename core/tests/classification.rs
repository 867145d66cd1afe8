//! Every operation against every failure class, through an injected transport.
//!
//! # Design
//! A scripted `Transport` returns one fixed outcome and records the requests
//! it saw, so each failure class can be produced without a server. Message
//! prefixes are asserted exactly as operators see them.

use std::sync::Mutex;

use incapsula_core::{
    ApiError, BoxError, ClientConfig, CreateRole, CreateUser, ErrorKind, HttpMethod, HttpRequest,
    HttpResponse, IncapsulaClient, Transport, UpdateRole,
};

const EMAIL: &str = "example@example.com";

struct Scripted {
    outcome: Result<(u16, String), String>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl Scripted {
    fn reply(status: u16, body: &str) -> Self {
        Self {
            outcome: Ok((status, body.to_string())),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn fail(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Transport for Scripted {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        self.seen.lock().unwrap().push(request.clone());
        match &self.outcome {
            Ok((status, body)) => Ok(HttpResponse::new(*status, body.as_str())),
            Err(reason) => Err(reason.clone().into()),
        }
    }
}

type Op = fn(&IncapsulaClient<Scripted>) -> Result<(), ApiError>;

struct Case {
    name: &'static str,
    method: HttpMethod,
    /// Completes "when ..." in transport and status errors.
    action: String,
    /// Completes "Error parsing ..." in decode errors.
    subject: String,
    run: Op,
}

fn case(name: &'static str, method: HttpMethod, action: String, subject: String, run: Op) -> Case {
    Case {
        name,
        method,
        action,
        subject,
        run,
    }
}

fn operations() -> Vec<Case> {
    vec![
        case(
            "add_role",
            HttpMethod::Post,
            "adding Role".to_string(),
            "Role JSON response".to_string(),
            |c| c.add_role(&create_role()).map(drop),
        ),
        case(
            "get_role",
            HttpMethod::Get,
            "reading Role 123".to_string(),
            "Role 123 JSON response".to_string(),
            |c| c.get_role(123).map(drop),
        ),
        case(
            "update_role",
            HttpMethod::Put,
            "updating Role 123".to_string(),
            "Role 123 JSON response".to_string(),
            |c| c.update_role(123, &update_role()).map(drop),
        ),
        case(
            "delete_role",
            HttpMethod::Delete,
            "deleting Role 123".to_string(),
            "Delete Role 123 JSON response".to_string(),
            |c| c.delete_role(123),
        ),
        case(
            "add_user",
            HttpMethod::Post,
            format!("adding User {EMAIL}"),
            format!("User JSON response for email {EMAIL}"),
            |c| c.add_user(&create_user()).map(drop),
        ),
        case(
            "get_user",
            HttpMethod::Get,
            format!("reading User for Email {EMAIL} (account id: 123)"),
            format!("User JSON response for Email {EMAIL} (account id: 123)"),
            |c| c.get_user(EMAIL, 123).map(drop),
        ),
        case(
            "delete_user",
            HttpMethod::Delete,
            format!("deleting User with Email {EMAIL} (account id: 123)"),
            format!("Email {EMAIL} JSON response for Account ID 123"),
            |c| c.delete_user(EMAIL, 123),
        ),
    ]
}

fn create_role() -> CreateRole {
    CreateRole {
        role_name: "Foo".to_string(),
        role_description: "Bar".to_string(),
        account_id: 123,
        role_abilities: vec!["canManageApiKey".to_string(), "canPurgeCache".to_string()],
    }
}

fn update_role() -> UpdateRole {
    UpdateRole {
        role_name: "Foo".to_string(),
        role_description: "Bar".to_string(),
        role_abilities: vec!["canManageApiKey".to_string()],
    }
}

fn create_user() -> CreateUser {
    CreateUser {
        account_id: 123,
        user_email: EMAIL.to_string(),
        role_ids: vec![1, 2],
        role_names: Vec::new(),
        first_name: "First".to_string(),
        last_name: "Last".to_string(),
    }
}

fn client(transport: Scripted) -> IncapsulaClient<Scripted> {
    let config = ClientConfig::new("http://localhost:3000", "foo", "bar").unwrap();
    IncapsulaClient::with_transport(config, transport)
}

#[test]
fn transport_failures_name_the_operation() {
    for op in operations() {
        let err = (op.run)(&client(Scripted::fail("connection refused"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport, "{}", op.name);
        assert_eq!(
            err.to_string(),
            format!("Error from Incapsula service when {}: connection refused", op.action),
            "{}",
            op.name
        );
    }
}

#[test]
fn status_failures_keep_code_and_body() {
    let body = r#"{"errorCode":1, "message": "Test Error"}"#;
    for op in operations() {
        let err = (op.run)(&client(Scripted::reply(406, body))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Status, "{}", op.name);
        assert_eq!(err.status(), Some(406), "{}", op.name);
        assert_eq!(
            err.to_string(),
            format!(
                "Error status code 406 from Incapsula service when {}: {body}",
                op.action
            ),
            "{}",
            op.name
        );
    }
}

#[test]
fn not_found_is_recognisable() {
    for op in operations() {
        let err = (op.run)(&client(Scripted::reply(404, "{}"))).unwrap_err();
        assert!(err.is_not_found(), "{}", op.name);
    }
}

#[test]
fn malformed_bodies_are_decode_failures() {
    for op in operations() {
        let err = (op.run)(&client(Scripted::reply(200, "{"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode, "{}", op.name);
        let text = err.to_string();
        assert!(
            text.starts_with(&format!("Error parsing {}: ", op.subject)),
            "{}: {text}",
            op.name
        );
        assert!(text.ends_with("\nresponse: {"), "{}: {text}", op.name);
    }
}

#[test]
fn only_deletes_apply_the_envelope_check() {
    let body = r#"{"errorCode":1,"message":"fail"}"#;
    for op in operations() {
        let result = (op.run)(&client(Scripted::reply(200, body)));
        if op.method == HttpMethod::Delete {
            let err = result.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Semantic, "{}", op.name);
            assert!(err.to_string().starts_with("Error deleting "), "{}", op.name);
            assert_eq!(err.body(), Some(body), "{}", op.name);
        } else {
            // Entity shapes tolerate unknown fields and default the rest.
            assert!(result.is_ok(), "{}", op.name);
        }
    }
}

#[test]
fn every_request_carries_credentials() {
    for op in operations() {
        let client = client(Scripted::reply(200, r#"{"code":200}"#));
        let _ = (op.run)(&client);

        let seen = client.transport().seen.lock().unwrap();
        assert_eq!(seen.len(), 1, "{}: exactly one round trip", op.name);
        assert_eq!(seen[0].method, op.method, "{}", op.name);
        let query = seen[0].query_pairs().unwrap();
        let n = query.len();
        assert!(n >= 2, "{}", op.name);
        assert_eq!(query[n - 2], ("api_id".to_string(), "foo".to_string()), "{}", op.name);
        assert_eq!(query[n - 1], ("api_key".to_string(), "bar".to_string()), "{}", op.name);
    }
}

#[test]
fn bodies_are_sent_only_for_writes() {
    for op in operations() {
        let client = client(Scripted::reply(200, r#"{"code":200}"#));
        let _ = (op.run)(&client);

        let seen = client.transport().seen.lock().unwrap();
        let has_body = seen[0].body.is_some();
        assert_eq!(
            has_body,
            matches!(op.method, HttpMethod::Post | HttpMethod::Put),
            "{}",
            op.name
        );
        if has_body {
            assert!(seen[0]
                .headers
                .contains(&("content-type".to_string(), "application/json".to_string())));
        }
    }
}
