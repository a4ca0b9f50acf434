use anyhow::Result;

use crate::api::projects;
use crate::config::Settings;
use crate::ui::Ui;

pub fn list(ui: &dyn Ui, settings: &Settings) -> Result<()> {
    let api = settings.authed_api()?;
    let projects = projects::list(&api)?;

    if projects.is_empty() {
        ui.print("You have no projects. Run `rise init` to create one.");
        return Ok(());
    }
    ui.print("Your projects:");
    for project in &projects {
        ui.print(&format!("  {}", project.name));
    }
    Ok(())
}

/// Delete a project after the user confirms.
pub fn remove(ui: &dyn Ui, settings: &Settings, name: &str) -> Result<()> {
    let api = settings.authed_api()?;

    let prompt = format!(
        "Are you sure you want to delete project {}? This cannot be undone",
        name
    );
    if !ui.confirm(&prompt, false)? {
        ui.print("Aborted.");
        return Ok(());
    }

    projects::delete(&api, name)?;
    ui.success(&format!("Project {} has been deleted.", name));
    Ok(())
}
