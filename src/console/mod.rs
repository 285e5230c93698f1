//! Line-oriented terminal front end

pub mod commands;
pub mod render;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};

use crate::app::{App, AppError};
use crate::router::{AuthMode, Screen};
use commands::{handle_command, parse_command, Command};

async fn prompt<R, W>(
    out: &mut W,
    lines: &mut Lines<R>,
    label: &str,
) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    out.write_all(label.as_bytes()).await?;
    out.flush().await?;
    lines.next_line().await
}

async fn signup<R, W>(
    app: &mut App,
    out: &mut W,
    lines: &mut Lines<R>,
) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if app.screen() != Screen::Auth(AuthMode::Student) {
        return Ok(Some(
            "! Open the student area first ('student')".to_string(),
        ));
    }

    let Some(name) = prompt(out, lines, "Full name: ").await? else {
        return Ok(None);
    };
    let Some(email) = prompt(out, lines, "Email: ").await? else {
        return Ok(None);
    };
    let Some(password) = prompt(out, lines, "Password: ").await? else {
        return Ok(None);
    };

    Ok(match app.signup(&name, &email, &password).await {
        Ok(_) => Some("Account created. Time for the Sorting Trial.".to_string()),
        // Shown by the auth screen itself
        Err(AppError::Client(_)) => None,
        Err(e) => Some(format!("! {}", e)),
    })
}

/// Read the next command line. While the screen's fetch is pending, returns
/// `Ok(None)` as soon as it lands so the screen can be drawn again.
async fn next_input<R>(
    app: &mut App,
    lines: &mut Lines<R>,
) -> std::io::Result<Option<Option<String>>>
where
    R: AsyncBufRead + Unpin,
{
    if !app.is_loading() {
        return lines.next_line().await.map(Some);
    }

    tokio::select! {
        line = lines.next_line() => line.map(Some),
        _ = app.settle() => Ok(None),
    }
}

/// Drive the app from `input` until `quit` or end of input
pub async fn drive<R, W>(app: &mut App, input: R, out: &mut W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        let screen = render::render(app).await;
        out.write_all(b"\n").await?;
        out.write_all(screen.as_bytes()).await?;
        out.write_all(b"> ").await?;
        out.flush().await?;

        let line = match next_input(app, &mut lines).await? {
            Some(Some(line)) => line,
            Some(None) => break,
            // Fetch finished; redraw
            None => continue,
        };

        let message = match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Signup) => signup(app, out, &mut lines).await?,
            Ok(command) => match handle_command(app, command).await {
                Ok(message) => message,
                Err(e) => Some(format!("! {}", e)),
            },
            Err(usage) => Some(usage),
        };

        if let Some(message) = message {
            out.write_all(message.as_bytes()).await?;
            out.write_all(b"\n").await?;
        }
    }

    out.flush().await?;
    Ok(())
}

/// Drive the app from stdin until `quit` or end of input
pub async fn run(app: &mut App) -> std::io::Result<()> {
    let mut stdout = tokio::io::stdout();
    drive(app, BufReader::new(tokio::io::stdin()), &mut stdout).await
}
