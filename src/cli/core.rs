//! Core CLI loop, dispatch, and shell context helpers.

use std::io;

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use thiserror::Error;

use crate::config::{Config, ConfigManager};
use crate::errors::TrackerError;
use crate::manager::JournalManager;
use crate::storage::JsonStore;

use super::commands;
use super::io as cli_io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Fatal shell errors that abort the session.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Core(#[from] TrackerError),
}

/// Per-command failures. These are reported and the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error(transparent)]
    Dialog(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub theme: ColorfulTheme,
    pub config: Config,
    pub manager: JournalManager,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load_or_init()?;
        let store = JsonStore::new(config.data_file.clone());
        let (manager, report) = JournalManager::open(Box::new(store));

        for warning in &report.warnings {
            cli_io::print_warning(warning);
        }
        if mode == CliMode::Interactive {
            cli_io::print_info(format!("Loaded {} transaction(s).", report.loaded));
        }

        Ok(Self {
            mode,
            theme: ColorfulTheme::default(),
            config,
            manager,
            last_command: None,
            running: true,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_parts(mode: CliMode, config: Config, manager: JournalManager) -> Self {
        Self {
            mode,
            theme: ColorfulTheme::default(),
            config,
            manager,
            last_command: None,
            running: true,
        }
    }

    pub fn prompt(&self) -> String {
        format!("fintrack ({})> ", self.manager.journal().len())
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        commands::COMMANDS
            .iter()
            .flat_map(|entry| entry.names.iter().copied())
            .collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = commands::handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .command_names()
            .into_iter()
            .map(|name| (levenshtein(name, &input.to_lowercase()), name))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        match cli_io::confirm_action(&self.theme, "Exit shell?", true) {
            Ok(choice) => Ok(choice),
            Err(_) => Ok(true),
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_info("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }

    /// Reports a persistence failure as a non-fatal warning. The in-memory
    /// change already happened; only the disk write is in question.
    pub(crate) fn warn_on_save_failure(&self, result: Result<(), TrackerError>) {
        if let Err(err) = result {
            cli_io::print_warning(format!(
                "Change kept in memory but could not be saved: {err}"
            ));
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

pub(crate) fn parse_amount(input: &str) -> Result<f64, CommandError> {
    input.parse::<f64>().map_err(|_| {
        CommandError::InvalidArguments(format!("invalid amount `{}` (use a number)", input))
    })
}
