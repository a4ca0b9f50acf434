// UI layer: every command talks to the terminal through the `Ui` trait, so
// command logic can be driven by a scripted implementation in tests.
//
// `TermUi` is the real terminal: prompts come from `dialoguer`, spinners from
// `indicatif`, colours from `crossterm`. `ScriptedUi` is only built for tests
// and with the `testing` feature.

use anyhow::Result;
use crossterm::style::{style, Stylize};
use dialoguer::{Confirm, Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Output sink and prompt source handed to every command.
pub trait Ui {
    fn print(&self, message: &str);
    fn success(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);

    /// Prompt for a line of text. An empty answer falls back to `default`.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String>;
    /// Prompt without echoing the answer.
    fn password(&self, prompt: &str) -> Result<String>;
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;

    /// Start a spinner; it stops when `finish` is called.
    fn spinner(&self, message: &str) -> Box<dyn Progress>;
}

pub trait Progress {
    fn finish(&self);
}

/// Interactive terminal UI.
#[derive(Debug, Default)]
pub struct TermUi;

impl Ui for TermUi {
    fn print(&self, message: &str) {
        println!("{}", message);
    }

    fn success(&self, message: &str) {
        println!("{} {}", "✔".green(), message);
    }

    fn warn(&self, message: &str) {
        eprintln!("{} {}", "!".yellow(), message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "✘".red(), style(message).red());
    }

    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new();
        input.with_prompt(prompt);
        if let Some(default) = default {
            input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn password(&self, prompt: &str) -> Result<String> {
        Ok(Password::new().with_prompt(prompt).interact()?)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new().with_prompt(prompt).default(default).interact()?)
    }

    fn spinner(&self, message: &str) -> Box<dyn Progress> {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        Box::new(Spinner(spinner))
    }
}

struct Spinner(ProgressBar);

impl Progress for Spinner {
    fn finish(&self) {
        self.0.finish_and_clear();
    }
}

#[cfg(any(test, feature = "testing"))]
pub use scripted::{Answer, ScriptedUi};

#[cfg(any(test, feature = "testing"))]
mod scripted {
    use anyhow::{bail, Result};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::{Progress, Ui};

    /// Answer queued on a `ScriptedUi`.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Answer {
        Text(String),
        Confirm(bool),
    }

    /// Non-interactive `Ui` for tests: replays queued answers in order and
    /// records everything printed.
    #[derive(Debug, Default)]
    pub struct ScriptedUi {
        answers: RefCell<VecDeque<Answer>>,
        output: RefCell<Vec<String>>,
    }

    impl ScriptedUi {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a text answer (used by `input` and `password`).
        pub fn answer(self, text: &str) -> Self {
            self.answers.borrow_mut().push_back(Answer::Text(text.to_string()));
            self
        }

        pub fn confirm_with(self, yes: bool) -> Self {
            self.answers.borrow_mut().push_back(Answer::Confirm(yes));
            self
        }

        pub fn output(&self) -> Vec<String> {
            self.output.borrow().clone()
        }

        /// Whether any printed line contains `needle`.
        pub fn printed(&self, needle: &str) -> bool {
            self.output.borrow().iter().any(|line| line.contains(needle))
        }

        pub fn remaining_answers(&self) -> usize {
            self.answers.borrow().len()
        }

        fn record(&self, line: String) {
            self.output.borrow_mut().push(line);
        }

        fn next_text(&self, prompt: &str) -> Result<String> {
            match self.answers.borrow_mut().pop_front() {
                Some(Answer::Text(text)) => Ok(text),
                Some(other) => bail!("prompt {:?} expected text, got {:?}", prompt, other),
                None => bail!("no scripted answer for prompt {:?}", prompt),
            }
        }
    }

    impl Ui for ScriptedUi {
        fn print(&self, message: &str) {
            self.record(message.to_string());
        }

        fn success(&self, message: &str) {
            self.record(message.to_string());
        }

        fn warn(&self, message: &str) {
            self.record(message.to_string());
        }

        fn error(&self, message: &str) {
            self.record(message.to_string());
        }

        fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
            let text = self.next_text(prompt)?;
            match default {
                Some(default) if text.is_empty() => Ok(default.to_string()),
                _ => Ok(text),
            }
        }

        fn password(&self, prompt: &str) -> Result<String> {
            self.next_text(prompt)
        }

        fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
            match self.answers.borrow_mut().pop_front() {
                Some(Answer::Confirm(yes)) => Ok(yes),
                Some(other) => bail!("prompt {:?} expected confirmation, got {:?}", prompt, other),
                None => bail!("no scripted answer for prompt {:?}", prompt),
            }
        }

        fn spinner(&self, message: &str) -> Box<dyn Progress> {
            self.record(message.to_string());
            Box::new(NoProgress)
        }
    }

    struct NoProgress;

    impl Progress for NoProgress {
        fn finish(&self) {}
    }
}
