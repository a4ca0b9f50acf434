// Domain commands operate on the project named in `rise.json`.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::current_project;
use crate::api::{certs, domains};
use crate::commands::init::DEFAULT_DOMAIN_SUFFIX;
use crate::config::Settings;
use crate::ui::Ui;

pub fn list(ui: &dyn Ui, settings: &Settings) -> Result<()> {
    let api = settings.authed_api()?;
    let project = current_project(settings)?;
    let domains = domains::list(&api, &project)?;

    ui.print(&format!("Domains for {}:", project));
    ui.print(&format!("  {}.{} (default)", project, DEFAULT_DOMAIN_SUFFIX));
    for domain in &domains {
        ui.print(&format!("  {}", domain));
    }
    Ok(())
}

pub fn add(ui: &dyn Ui, settings: &Settings, domain: &str) -> Result<()> {
    let api = settings.authed_api()?;
    let project = current_project(settings)?;

    domains::create(&api, &project, domain)?;
    ui.success(&format!("{} has been added to {}.", domain, project));
    ui.print("Point your DNS at the rise servers for the domain to go live.");
    Ok(())
}

pub fn remove(ui: &dyn Ui, settings: &Settings, domain: &str) -> Result<()> {
    let api = settings.authed_api()?;
    let project = current_project(settings)?;

    domains::delete(&api, &project, domain)?;
    ui.success(&format!("{} has been removed from {}.", domain, project));
    Ok(())
}

fn path_or_prompt(ui: &dyn Ui, given: Option<&Path>, prompt: &str) -> Result<PathBuf> {
    match given {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(PathBuf::from(ui.input(prompt, None)?)),
    }
}

/// Upload a certificate and key for `domain`, prompting for whichever path
/// was not given on the command line.
pub fn upload_cert(
    ui: &dyn Ui,
    settings: &Settings,
    domain: &str,
    crt: Option<&Path>,
    key: Option<&Path>,
) -> Result<()> {
    let api = settings.authed_api()?;
    let project = current_project(settings)?;

    let crt = path_or_prompt(ui, crt, "Enter path to certificate file (.crt)")?;
    let key = path_or_prompt(ui, key, "Enter path to private key file (.key)")?;

    let spinner = ui.spinner("Uploading certificate...");
    let result = certs::create(&api, &project, domain, &crt, &key);
    spinner.finish();

    result?;
    ui.success(&format!("Certificate for {} has been uploaded.", domain));
    Ok(())
}

pub fn cert_info(ui: &dyn Ui, settings: &Settings, domain: &str) -> Result<()> {
    let api = settings.authed_api()?;
    let project = current_project(settings)?;

    let cert = certs::get(&api, &project, domain)?;
    ui.print(&format!("Certificate for {}:", domain));
    ui.print(&format!("  Common name: {}", cert.common_name));
    ui.print(&format!("  Valid from:  {}", cert.starts_at.format("%Y-%m-%d %H:%M:%S UTC")));
    ui.print(&format!("  Expires at:  {}", cert.expires_at.format("%Y-%m-%d %H:%M:%S UTC")));
    Ok(())
}
