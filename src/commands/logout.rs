use anyhow::Result;

use crate::config::Settings;
use crate::ui::Ui;

pub fn run(ui: &dyn Ui, settings: &Settings) -> Result<()> {
    if settings.credential_store().clear()? {
        ui.success("Logged out.");
    } else {
        ui.print("Not currently logged in.");
    }
    Ok(())
}
