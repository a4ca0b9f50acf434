// Projects owned by the logged-in user.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{check, map_unauthorized, read_json, ApiClient};
use crate::error::{ApiResult, ErrorKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub default_domain_enabled: bool,
}

#[derive(Debug, Deserialize)]
struct ProjectList {
    projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
struct ProjectResponse {
    project: Project,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectsEndpoint {
    List,
    Create,
    Delete,
}

pub fn map_server_error(endpoint: ProjectsEndpoint, status: u16, description: Option<&str>) -> ErrorKind {
    if let Some(kind) = map_unauthorized(status, description) {
        return kind;
    }
    match (endpoint, status, description) {
        (ProjectsEndpoint::Create, 422, Some("project name is taken")) => ErrorKind::AlreadyExists,
        (ProjectsEndpoint::Create, 422, _) => ErrorKind::ValidationFailed,
        (ProjectsEndpoint::Delete, 404, Some("project could not be found")) => {
            ErrorKind::ProjectNotFound
        }
        _ => ErrorKind::UnexpectedError,
    }
}

pub fn list(api: &ApiClient) -> ApiResult<Vec<Project>> {
    let res = api.send(api.authorized(Method::GET, &["projects"])?)?;
    let res = check(res, 200, |status, desc| {
        map_server_error(ProjectsEndpoint::List, status, desc)
    })?;
    let body: ProjectList = read_json(res)?;
    Ok(body.projects)
}

pub fn create(api: &ApiClient, name: &str) -> ApiResult<Project> {
    let req = api
        .authorized(Method::POST, &["projects"])?
        .form(&[("name", name)]);
    let res = api.send(req)?;
    let res = check(res, 201, |status, desc| {
        map_server_error(ProjectsEndpoint::Create, status, desc)
    })?;
    let body: ProjectResponse = read_json(res)?;
    Ok(body.project)
}

pub fn delete(api: &ApiClient, name: &str) -> ApiResult<()> {
    let res = api.send(api.authorized(Method::DELETE, &["projects", name])?)?;
    check(res, 200, |status, desc| {
        map_server_error(ProjectsEndpoint::Delete, status, desc)
    })?;
    Ok(())
}
