//! Command parsing and dispatch for the terminal front end

use crate::app::{App, AppError};
use crate::types::QuestionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Student,
    Admin,
    Leaderboard,
    Back,
    /// Prompts for name, email and password
    Signup,
    Setup,
    /// Option numbers are 1-based as displayed
    Answer {
        question: QuestionId,
        option: usize,
    },
    Submit,
    Refresh,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  student                 open the student area
  admin                   open the admin login
  leaderboard             show house standings and top performers
  back                    return to the start (ends the session)
  signup                  create a student account
  setup                   run the one-time admin setup
  answer <question> <n>   pick option n for a quiz question
  submit                  finish the sorting quiz
  refresh                 reload the current view
  help                    show this list
  quit                    leave";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("Type a command, or 'help' for a list".to_string());
    };

    let command = match head.to_lowercase().as_str() {
        "student" | "s" => Command::Student,
        "admin" => Command::Admin,
        "leaderboard" | "lb" => Command::Leaderboard,
        "back" | "b" => Command::Back,
        "signup" => Command::Signup,
        "setup" => Command::Setup,
        "answer" | "a" => {
            let question = words
                .next()
                .and_then(|w| w.parse::<QuestionId>().ok())
                .ok_or("Usage: answer <question> <option>")?;
            let option = words
                .next()
                .and_then(|w| w.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .ok_or("Usage: answer <question> <option>, options start at 1")?;
            Command::Answer { question, option }
        }
        "submit" | "finish" => Command::Submit,
        "refresh" | "r" => Command::Refresh,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("Unknown command '{}', try 'help'", other)),
    };

    if words.next().is_some() {
        return Err(format!("Too many arguments for '{}'", head));
    }
    Ok(command)
}

/// Run a command against the app. Returns an optional message for the user.
///
/// `Signup` and `Quit` need the terminal and are handled by the caller.
pub async fn handle_command(app: &mut App, command: Command) -> Result<Option<String>, AppError> {
    match command {
        Command::Student => app.choose_student().await.map(|_| None),
        Command::Admin => app.choose_admin().await.map(|_| None),
        Command::Leaderboard => app.choose_leaderboard().await.map(|_| None),
        Command::Back => app.back().await.map(|_| None),
        Command::Setup => app.bootstrap_admin().await.map(|_| None),
        Command::Answer { question, option } => {
            app.answer(question, option - 1).map(|_| None)
        }
        Command::Submit => {
            app.submit_quiz().await?;
            let house = app
                .session()
                .sorting()
                .map(|s| s.house.clone())
                .unwrap_or_default();
            Ok(Some(format!("The quiz has spoken: {}!", house)))
        }
        Command::Refresh => app.refresh().await.map(|_| None),
        Command::Help => Ok(Some(HELP.to_string())),
        Command::Signup | Command::Quit => Ok(None),
    }
}
