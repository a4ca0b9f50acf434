// Custom domains attached to a project.

use reqwest::Method;
use serde::Deserialize;

use super::{check, map_unauthorized, read_json, ApiClient};
use crate::error::{ApiResult, ErrorKind};

#[derive(Debug, Deserialize)]
struct DomainList {
    domains: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainsEndpoint {
    List,
    Create,
    Delete,
}

pub fn map_server_error(endpoint: DomainsEndpoint, status: u16, description: Option<&str>) -> ErrorKind {
    if let Some(kind) = map_unauthorized(status, description) {
        return kind;
    }
    match (endpoint, status, description) {
        (_, 404, Some("project could not be found")) => ErrorKind::ProjectNotFound,
        (DomainsEndpoint::Create, 422, Some("domain name is taken")) => ErrorKind::AlreadyExists,
        (DomainsEndpoint::Create, 422, Some("project cannot have more domains")) => {
            ErrorKind::LimitReached
        }
        (DomainsEndpoint::Create, 422, _) => ErrorKind::ValidationFailed,
        (DomainsEndpoint::Delete, 404, Some("domain could not be found")) => ErrorKind::NotFound,
        _ => ErrorKind::UnexpectedError,
    }
}

fn domains_path(project: &str) -> [&str; 3] {
    ["projects", project, "domains"]
}

pub fn list(api: &ApiClient, project: &str) -> ApiResult<Vec<String>> {
    let res = api.send(api.authorized(Method::GET, &domains_path(project))?)?;
    let res = check(res, 200, |status, desc| {
        map_server_error(DomainsEndpoint::List, status, desc)
    })?;
    let body: DomainList = read_json(res)?;
    Ok(body.domains)
}

pub fn create(api: &ApiClient, project: &str, domain: &str) -> ApiResult<()> {
    let req = api
        .authorized(Method::POST, &domains_path(project))?
        .form(&[("name", domain)]);
    let res = api.send(req)?;
    check(res, 201, |status, desc| {
        map_server_error(DomainsEndpoint::Create, status, desc)
    })?;
    Ok(())
}

pub fn delete(api: &ApiClient, project: &str, domain: &str) -> ApiResult<()> {
    let req = api.authorized(Method::DELETE, &["projects", project, "domains", domain])?;
    let res = api.send(req)?;
    check(res, 200, |status, desc| {
        map_server_error(DomainsEndpoint::Delete, status, desc)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_not_found_on_every_endpoint() {
        for endpoint in [DomainsEndpoint::List, DomainsEndpoint::Create, DomainsEndpoint::Delete] {
            assert_eq!(
                map_server_error(endpoint, 404, Some("project could not be found")),
                ErrorKind::ProjectNotFound
            );
        }
    }

    #[test]
    fn create_table() {
        assert_eq!(
            map_server_error(DomainsEndpoint::Create, 422, Some("domain name is taken")),
            ErrorKind::AlreadyExists
        );
        assert_eq!(
            map_server_error(DomainsEndpoint::Create, 422, Some("project cannot have more domains")),
            ErrorKind::LimitReached
        );
        assert_eq!(
            map_server_error(DomainsEndpoint::Create, 422, None),
            ErrorKind::ValidationFailed
        );
    }

    #[test]
    fn delete_missing_domain() {
        assert_eq!(
            map_server_error(DomainsEndpoint::Delete, 404, Some("domain could not be found")),
            ErrorKind::NotFound
        );
        assert_eq!(
            map_server_error(DomainsEndpoint::List, 404, Some("domain could not be found")),
            ErrorKind::UnexpectedError
        );
    }
}
