use anyhow::Result;

use super::read_new_password;
use crate::api::users;
use crate::config::Settings;
use crate::ui::Ui;

pub fn change(ui: &dyn Ui, settings: &Settings) -> Result<()> {
    let api = settings.authed_api()?;
    let existing = ui.password("Enter Existing Password")?;
    let password = read_new_password(ui, "Enter New Password", "Confirm New Password")?;

    users::change_password(&api, &existing, &password)?;
    ui.success("Your password has been changed.");
    Ok(())
}
