use anyhow::{bail, Result};
use tracing::info;

use crate::api::deployments;
use crate::bundle;
use crate::config::{ProjectConfig, Settings};
use crate::ui::Ui;

/// Pack the publish directory and upload it as a new deployment.
pub fn run(ui: &dyn Ui, settings: &Settings) -> Result<()> {
    let api = settings.authed_api()?;
    let project = ProjectConfig::load(&settings.project_dir)?;
    let src = project.publish_dir(&settings.project_dir);

    let (tarball, files) = bundle::pack_to_tempfile(&src)?;
    if files == 0 {
        bail!("Nothing to publish: {} has no files.", src.display());
    }
    info!(files, path = %tarball.path().display(), "packed project");

    let spinner = ui.spinner(&format!("Uploading {} files...", files));
    let result = deployments::create(&api, &project.name, tarball.path());
    spinner.finish();

    let deployment = result?;
    ui.success(&format!(
        "Deployment {} of {} is {}.",
        deployment.id, project.name, deployment.state
    ));
    Ok(())
}
