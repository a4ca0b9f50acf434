// Deployments: upload a gzipped tarball of the site to publish.

use reqwest::blocking::multipart::{Form, Part};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::{check, map_unauthorized, read_json, ApiClient};
use crate::error::{ApiResult, AppError, ErrorKind};

/// Multipart field carrying the tarball.
pub const PAYLOAD_FIELD: &str = "payload";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: u64,
    pub state: String,
    #[serde(default)]
    pub version: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct DeploymentResponse {
    deployment: Deployment,
}

pub fn map_server_error(status: u16, description: Option<&str>) -> ErrorKind {
    if let Some(kind) = map_unauthorized(status, description) {
        return kind;
    }
    match (status, description) {
        (400, Some("request body is too large")) => ErrorKind::FileSizeTooLarge,
        (404, Some("project could not be found")) => ErrorKind::ProjectNotFound,
        (422, _) => ErrorKind::ValidationFailed,
        _ => ErrorKind::UnexpectedError,
    }
}

/// Upload `tarball` as a new deployment of `project`. The server answers
/// 202 and processes the deployment asynchronously.
pub fn create(api: &ApiClient, project: &str, tarball: &Path) -> ApiResult<Deployment> {
    let req = api.authorized(Method::POST, &["projects", project, "deployments"])?;

    let part = Part::file(tarball).map_err(|e| {
        debug!(error = %e, "could not open deployment payload");
        AppError::unexpected().caused_by(e)
    })?;
    let form = Form::new().part(PAYLOAD_FIELD, part.file_name("site.tar.gz"));

    let res = api.send(req.multipart(form))?;
    let res = check(res, 202, map_server_error)?;
    let body: DeploymentResponse = read_json(res)?;
    Ok(body.deployment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table() {
        assert_eq!(
            map_server_error(400, Some("request body is too large")),
            ErrorKind::FileSizeTooLarge
        );
        assert_eq!(
            map_server_error(404, Some("project could not be found")),
            ErrorKind::ProjectNotFound
        );
        assert_eq!(map_server_error(422, Some("payload is missing")), ErrorKind::ValidationFailed);
        assert_eq!(map_server_error(500, None), ErrorKind::UnexpectedError);
    }
}
