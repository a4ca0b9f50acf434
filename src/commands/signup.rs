use anyhow::Result;
use tracing::debug;

use super::read_new_password;
use crate::api::{oauth, users};
use crate::config::Settings;
use crate::credentials::Credentials;
use crate::error::ErrorKind;
use crate::ui::Ui;

/// Create an account, confirm the email address and log in.
///
/// Validation errors on sign-up and a wrong confirmation code re-prompt;
/// anything else ends the command. Once the account is active, a failed
/// login is only a warning.
pub fn run(ui: &dyn Ui, settings: &Settings) -> Result<()> {
    let api = settings.api()?;

    let (email, password) = loop {
        let email = ui.input("Enter Email", None)?;
        let password = read_new_password(ui, "Enter Password", "Confirm Password")?;

        match users::create(&api, &email, &password) {
            Ok(()) => break (email, password),
            Err(e) if e.kind == ErrorKind::ValidationFailed => {
                ui.error(&e.to_string());
                ui.print("There were errors in your input. Please try again.");
            }
            Err(e) => return Err(e.into()),
        }
    };

    ui.success("Your account has been created. You will receive your confirmation code shortly.");

    loop {
        let code = ui.input("Enter Confirmation Code (Check your inbox!)", None)?;
        match users::confirm(&api, &email, &code) {
            Ok(()) => break,
            Err(e) if e.kind == ErrorKind::AlreadyConfirmed => break,
            Err(e) if e.kind == ErrorKind::InvalidConfirmationCode => ui.error(&e.to_string()),
            Err(e) => return Err(e.into()),
        }
    }

    ui.success("Thanks for confirming your email address! Your account is now active!");

    match oauth::fetch_token(&api, &email, &password) {
        Ok(access_token) => {
            settings.credential_store().save(&Credentials {
                email: email.clone(),
                access_token,
            })?;
            ui.success(&format!("You are now logged in as {}.", email));
        }
        Err(e) => {
            debug!(code = e.kind.code(), "token exchange after signup failed: {}", e);
            ui.warn("Could not log you in automatically. Run `rise login` to log in.");
        }
    }
    Ok(())
}
