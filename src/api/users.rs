// User accounts: sign up, email confirmation and password change.

use reqwest::Method;

use super::{check, map_unauthorized, ApiClient};
use crate::error::{ApiResult, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsersEndpoint {
    Create,
    Confirm,
    ChangePassword,
}

pub fn map_server_error(endpoint: UsersEndpoint, status: u16, description: Option<&str>) -> ErrorKind {
    if let Some(kind) = map_unauthorized(status, description) {
        return kind;
    }
    match (endpoint, status, description) {
        (UsersEndpoint::Create, 422, _) => ErrorKind::ValidationFailed,
        (UsersEndpoint::Confirm, 422, Some("invalid email or confirmation_code")) => {
            ErrorKind::InvalidConfirmationCode
        }
        (UsersEndpoint::Confirm, 422, Some("already confirmed")) => ErrorKind::AlreadyConfirmed,
        (UsersEndpoint::ChangePassword, 403, Some("existing password is invalid")) => {
            ErrorKind::InvalidCredentials
        }
        (UsersEndpoint::ChangePassword, 422, _) => ErrorKind::ValidationFailed,
        _ => ErrorKind::UnexpectedError,
    }
}

/// Register a new account. The server mails a confirmation code.
pub fn create(api: &ApiClient, email: &str, password: &str) -> ApiResult<()> {
    let req = api
        .request(Method::POST, &["users"])
        .form(&[("email", email), ("password", password)]);
    let res = api.send(req)?;
    check(res, 201, |status, desc| map_server_error(UsersEndpoint::Create, status, desc))?;
    Ok(())
}

/// Confirm an email address with the code the server mailed.
pub fn confirm(api: &ApiClient, email: &str, confirmation_code: &str) -> ApiResult<()> {
    let req = api
        .request(Method::POST, &["user", "confirm"])
        .form(&[("email", email), ("confirmation_code", confirmation_code)]);
    let res = api.send(req)?;
    check(res, 200, |status, desc| map_server_error(UsersEndpoint::Confirm, status, desc))?;
    Ok(())
}

pub fn change_password(api: &ApiClient, existing_password: &str, password: &str) -> ApiResult<()> {
    let req = api
        .authorized(Method::PUT, &["user"])?
        .form(&[("existing_password", existing_password), ("password", password)]);
    let res = api.send(req)?;
    check(res, 200, |status, desc| {
        map_server_error(UsersEndpoint::ChangePassword, status, desc)
    })?;
    Ok(())
}
