// Password grant against the OAuth token endpoint.

use reqwest::Method;
use serde::Deserialize;

use super::{check, read_json, ApiClient};
use crate::error::{ApiResult, ErrorKind};

/// Client credentials the CLI identifies itself with.
pub const CLIENT_ID: &str = "rise-cli";
pub const CLIENT_SECRET: &str = "rise-cli-public";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub fn map_server_error(status: u16, description: Option<&str>) -> ErrorKind {
    match (status, description) {
        (400, Some("user has not confirmed email address")) => ErrorKind::UnconfirmedEmail,
        (400, Some("invalid email or password")) => ErrorKind::InvalidCredentials,
        _ => ErrorKind::UnexpectedError,
    }
}

/// Exchange an email and password for an access token.
pub fn fetch_token(api: &ApiClient, email: &str, password: &str) -> ApiResult<String> {
    let req = api.request(Method::POST, &["oauth", "token"]).form(&[
        ("grant_type", "password"),
        ("username", email),
        ("password", password),
        ("client_id", CLIENT_ID),
        ("client_secret", CLIENT_SECRET),
    ]);
    let res = api.send(req)?;
    let res = check(res, 200, map_server_error)?;
    let body: TokenResponse = read_json(res)?;
    Ok(body.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_descriptions() {
        assert_eq!(
            map_server_error(400, Some("invalid email or password")),
            ErrorKind::InvalidCredentials
        );
        assert_eq!(
            map_server_error(400, Some("user has not confirmed email address")),
            ErrorKind::UnconfirmedEmail
        );
        assert_eq!(
            map_server_error(401, Some("invalid email or password")),
            ErrorKind::UnexpectedError
        );
    }
}
