// Command handlers. Each one collects input through the `Ui`, makes one
// API call (signup makes a few in sequence) and prints the outcome. API
// failures are returned as `AppError` inside `anyhow::Error` and rendered
// by `report`.

use anyhow::Result;
use tracing::debug;

use crate::config::{ProjectConfig, Settings};
use crate::error::{AppError, ErrorKind};
use crate::ui::Ui;

pub mod domains;
pub mod init;
pub mod login;
pub mod logout;
pub mod password;
pub mod projects;
pub mod publish;
pub mod signup;

/// Prompt for a new password twice until both entries match.
fn read_new_password(ui: &dyn Ui, prompt: &str, confirm_prompt: &str) -> Result<String> {
    loop {
        let password = ui.password(prompt)?;
        let confirmation = ui.password(confirm_prompt)?;
        if password == confirmation {
            return Ok(password);
        }
        ui.warn("Passwords do not match. Please re-enter password.");
    }
}

/// Name of the project configured in the working directory's `rise.json`.
fn current_project(settings: &Settings) -> Result<String> {
    Ok(ProjectConfig::load(&settings.project_dir)?.name)
}

/// Print a failed command's error.
pub fn report(ui: &dyn Ui, err: &anyhow::Error) {
    let Some(app) = err.downcast_ref::<AppError>() else {
        ui.error(&format!("{:#}", err));
        return;
    };

    debug!(code = app.kind.code(), cause = ?app.cause, "command failed");
    match (app.kind, &app.cause) {
        (ErrorKind::RequestFailed, Some(cause)) => {
            ui.error(&format!("Could not reach the rise API: {}", cause));
        }
        (ErrorKind::Unauthorized, _) => {
            ui.error(&app.to_string());
            ui.print("Run `rise login` to log in again.");
        }
        (ErrorKind::UnexpectedError, _) => {
            ui.error("An unexpected error has occurred. Please try again later.");
        }
        _ => ui.error(&app.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ScriptedUi;

    #[test]
    fn password_prompt_repeats_until_match() {
        let ui = ScriptedUi::new()
            .answer("one")
            .answer("two")
            .answer("same")
            .answer("same");
        let pw = read_new_password(&ui, "Enter Password", "Confirm Password").unwrap();
        assert_eq!(pw, "same");
        assert!(ui.printed("Passwords do not match"));
    }

    #[test]
    fn report_plain_error() {
        let ui = ScriptedUi::new();
        report(&ui, &anyhow::anyhow!("rise.json not found"));
        assert_eq!(ui.output(), vec!["rise.json not found".to_string()]);
    }

    #[test]
    fn report_unauthorized_suggests_login() {
        let ui = ScriptedUi::new();
        report(&ui, &AppError::new(ErrorKind::Unauthorized).into());
        assert!(ui.printed("rise login"));
    }

    #[test]
    fn report_unexpected_hides_details() {
        let ui = ScriptedUi::new();
        report(&ui, &AppError::unexpected().into());
        assert!(ui.printed("An unexpected error has occurred"));
    }

    #[test]
    fn report_known_kind_uses_message() {
        let ui = ScriptedUi::new();
        let err = AppError::with_message(ErrorKind::CertNotMatch, "ssl cert is not matched domain name");
        report(&ui, &err.into());
        assert_eq!(ui.output(), vec!["ssl cert is not matched domain name".to_string()]);
    }
}
