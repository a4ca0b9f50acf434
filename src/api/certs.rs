// TLS certificates attached to a project's custom domain.
//
// Upload is a multipart POST with the certificate and private key as two
// file parts; fetch returns the metadata of the certificate currently
// installed. Server failures are decoded by `map_server_error` only.

use chrono::{DateTime, Utc};
use reqwest::blocking::multipart::Form;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use super::{read_error_body, read_json, ApiClient};
use crate::error::{ApiResult, AppError, ErrorKind};

/// Multipart field carrying the certificate chain.
pub const CRT_FIELD: &str = "ssl.crt";
/// Multipart field carrying the private key.
pub const KEY_FIELD: &str = "ssl.key";

/// Statuses on which an upload response carries a structured error body.
const CREATE_ERROR_STATUSES: [u16; 4] = [400, 403, 404, 422];

/// Certificate installed for a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cert {
    pub id: u64,
    pub starts_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub common_name: String,
}

#[derive(Debug, Deserialize)]
struct CertResponse {
    cert: Cert,
}

/// Which certificate call produced a response; the two have different
/// error tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertEndpoint {
    Create,
    Get,
}

/// Map an error response to an `ErrorKind`. Unknown statuses and
/// descriptions are `UnexpectedError`.
pub fn map_server_error(endpoint: CertEndpoint, status: u16, description: Option<&str>) -> ErrorKind {
    match endpoint {
        CertEndpoint::Create => {
            if !CREATE_ERROR_STATUSES.contains(&status) {
                return ErrorKind::UnexpectedError;
            }
            match description {
                Some("domain could not be found") => ErrorKind::NotFound,
                Some("project could not be found") => ErrorKind::ProjectNotFound,
                Some("Not allowed to upload certs for default domain") => ErrorKind::NotAllowedDomain,
                Some("request body is too large") => ErrorKind::FileSizeTooLarge,
                Some("certificate or private key file is missing") => ErrorKind::InvalidCerts,
                Some("certificate or private key is not valid") => ErrorKind::InvalidCerts,
                Some("ssl cert is not matched domain name") => ErrorKind::CertNotMatch,
                _ => ErrorKind::UnexpectedError,
            }
        }
        CertEndpoint::Get => match (status, description) {
            (404, Some("cert could not be found")) => ErrorKind::NotFound,
            (404, Some("project could not be found")) => ErrorKind::ProjectNotFound,
            _ => ErrorKind::UnexpectedError,
        },
    }
}

fn cert_error(kind: ErrorKind, description: Option<&str>) -> AppError {
    match (kind, description) {
        (ErrorKind::UnexpectedError | ErrorKind::NotAllowedDomain | ErrorKind::FileSizeTooLarge, _)
        | (_, None) => AppError::new(kind),
        (_, Some(desc)) => AppError::with_message(kind, desc),
    }
}

fn cert_path<'a>(project: &'a str, domain: &'a str) -> [&'a str; 5] {
    ["projects", project, "domains", domain, "cert"]
}

/// Upload a certificate and private key for `domain` of `project`.
///
/// Both files are opened before the request is sent; if either can't be
/// opened the call fails with `UnexpectedError` without touching the
/// network. File parts have a known size, so the body goes out with an
/// exact `Content-Length`.
pub fn create(
    api: &ApiClient,
    project: &str,
    domain: &str,
    crt_path: &Path,
    key_path: &Path,
) -> ApiResult<()> {
    let req = api.authorized(Method::POST, &cert_path(project, domain))?;

    let form = Form::new()
        .file(CRT_FIELD, crt_path)
        .and_then(|form| form.file(KEY_FIELD, key_path))
        .map_err(|e| {
            debug!(error = %e, "could not open certificate files");
            AppError::unexpected().caused_by(e)
        })?;

    let res = api.send(req.multipart(form))?;
    let status = res.status().as_u16();
    if status == 201 {
        return Ok(());
    }
    if !CREATE_ERROR_STATUSES.contains(&status) {
        warn!(status, "unexpected response status for certificate upload");
        return Err(AppError::unexpected());
    }

    let body = read_error_body(res)?;
    let kind = map_server_error(CertEndpoint::Create, status, body.description());
    Err(cert_error(kind, body.description()))
}

/// Fetch the certificate currently installed for `domain` of `project`.
pub fn get(api: &ApiClient, project: &str, domain: &str) -> ApiResult<Cert> {
    let req = api.authorized(Method::GET, &cert_path(project, domain))?;
    let res = api.send(req)?;

    match res.status().as_u16() {
        200 => {
            let body: CertResponse = read_json(res)?;
            Ok(body.cert)
        }
        404 => {
            let body = read_error_body(res)?;
            let kind = map_server_error(CertEndpoint::Get, 404, body.description());
            Err(cert_error(kind, body.description()))
        }
        status => {
            warn!(status, "unexpected response status for certificate fetch");
            Err(AppError::unexpected())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: [(&str, ErrorKind); 7] = [
        ("domain could not be found", ErrorKind::NotFound),
        ("project could not be found", ErrorKind::ProjectNotFound),
        ("Not allowed to upload certs for default domain", ErrorKind::NotAllowedDomain),
        ("request body is too large", ErrorKind::FileSizeTooLarge),
        ("certificate or private key file is missing", ErrorKind::InvalidCerts),
        ("certificate or private key is not valid", ErrorKind::InvalidCerts),
        ("ssl cert is not matched domain name", ErrorKind::CertNotMatch),
    ];

    #[test]
    fn create_maps_every_known_description_on_every_error_status() {
        for status in CREATE_ERROR_STATUSES {
            for (desc, kind) in KNOWN {
                assert_eq!(
                    map_server_error(CertEndpoint::Create, status, Some(desc)),
                    kind,
                    "status {} description {:?}",
                    status,
                    desc
                );
            }
        }
    }

    #[test]
    fn create_unknown_description_is_unexpected() {
        for status in CREATE_ERROR_STATUSES {
            assert_eq!(
                map_server_error(CertEndpoint::Create, status, Some("cert could not be found")),
                ErrorKind::UnexpectedError
            );
            assert_eq!(
                map_server_error(CertEndpoint::Create, status, None),
                ErrorKind::UnexpectedError
            );
        }
    }

    #[test]
    fn create_other_statuses_are_unexpected() {
        for status in [200, 201, 401, 409, 500, 502] {
            assert_eq!(
                map_server_error(CertEndpoint::Create, status, Some("domain could not be found")),
                ErrorKind::UnexpectedError
            );
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(
            map_server_error(CertEndpoint::Create, 403, Some("not allowed to upload certs for default domain")),
            ErrorKind::UnexpectedError
        );
    }

    #[test]
    fn get_table() {
        assert_eq!(
            map_server_error(CertEndpoint::Get, 404, Some("cert could not be found")),
            ErrorKind::NotFound
        );
        assert_eq!(
            map_server_error(CertEndpoint::Get, 404, Some("project could not be found")),
            ErrorKind::ProjectNotFound
        );
        assert_eq!(
            map_server_error(CertEndpoint::Get, 404, Some("domain could not be found")),
            ErrorKind::UnexpectedError
        );
        assert_eq!(
            map_server_error(CertEndpoint::Get, 400, Some("cert could not be found")),
            ErrorKind::UnexpectedError
        );
    }

    #[test]
    fn messages_follow_server_wording() {
        let err = cert_error(ErrorKind::InvalidCerts, Some("certificate or private key is not valid"));
        assert_eq!(err.to_string(), "certificate or private key is not valid");

        let err = cert_error(ErrorKind::NotAllowedDomain, Some("Not allowed to upload certs for default domain"));
        assert_eq!(err.to_string(), "not allowed domain name");

        let err = cert_error(ErrorKind::UnexpectedError, Some("boom"));
        assert_eq!(err.to_string(), "unexpected error");
        assert!(err.cause.is_none());
    }
}
