use anyhow::{bail, Result};

use crate::api::projects;
use crate::config::{ProjectConfig, Settings, PROJECT_CONFIG_FILE};
use crate::error::ErrorKind;
use crate::ui::Ui;

/// Suffix of the default domain every project is served on.
pub const DEFAULT_DOMAIN_SUFFIX: &str = "rise.cloud";

/// Create a project on the server and write `rise.json` for it.
pub fn run(ui: &dyn Ui, settings: &Settings) -> Result<()> {
    let api = settings.authed_api()?;

    if settings.project_config_path().exists() {
        bail!(
            "{} already exists in {}. This directory is already a rise project.",
            PROJECT_CONFIG_FILE,
            settings.project_dir.display()
        );
    }

    let path = loop {
        let path = ui.input("Enter Project Path", Some("."))?;
        if settings.project_dir.join(&path).is_dir() {
            break path;
        }
        ui.error(&format!("{} is not a directory.", path));
    };

    let project = loop {
        let name = ui.input("Enter Project Name", None)?;
        match projects::create(&api, &name) {
            Ok(project) => break project,
            Err(e) if matches!(e.kind, ErrorKind::AlreadyExists | ErrorKind::ValidationFailed) => {
                ui.error(&e.to_string());
            }
            Err(e) => return Err(e.into()),
        }
    };

    ProjectConfig {
        name: project.name.clone(),
        path,
    }
    .save(&settings.project_dir)?;

    ui.success(&format!(
        "{} project initialized. Run `rise publish` to deploy it to https://{}.{}",
        project.name, project.name, DEFAULT_DOMAIN_SUFFIX
    ));
    Ok(())
}
