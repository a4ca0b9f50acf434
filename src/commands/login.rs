use anyhow::Result;

use crate::api::oauth;
use crate::config::Settings;
use crate::credentials::Credentials;
use crate::ui::Ui;

/// Exchange email and password for a token and store it.
pub fn run(ui: &dyn Ui, settings: &Settings) -> Result<()> {
    let api = settings.api()?;
    let email = ui.input("Enter Email", None)?;
    let password = ui.password("Enter Password")?;

    let spinner = ui.spinner("Logging in...");
    let result = oauth::fetch_token(&api, &email, &password);
    spinner.finish();

    let access_token = result?;
    settings.credential_store().save(&Credentials {
        email: email.clone(),
        access_token,
    })?;
    ui.success(&format!("Logged in as {}.", email));
    Ok(())
}
