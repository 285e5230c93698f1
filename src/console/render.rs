//! Text rendering of the active screen

use crate::app::App;
use crate::loader::ViewState;
use crate::quiz::QuizFlow;
use crate::router::{AuthMode, Screen};
use crate::standings::HouseStanding;
use crate::views::{DashboardView, LeaderboardView};
use std::fmt::Write;

const BAR_WIDTH: u32 = 20;

fn bar(percent: u32) -> String {
    let filled = (percent * BAR_WIDTH + 50) / 100;
    let filled = filled.min(BAR_WIDTH) as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        " ".repeat(BAR_WIDTH as usize - filled)
    )
}

fn write_standings(out: &mut String, standings: &[HouseStanding]) {
    for s in standings {
        let _ = writeln!(
            out,
            "  {} {:<12} {:>6} pts {} {:>3}%",
            s.crest,
            s.name,
            s.points,
            bar(s.percent),
            s.percent
        );
    }
}

fn write_landing(out: &mut String, app: &App) {
    let _ = writeln!(out, "SHADOW ENCHANTERS");
    let _ = writeln!(out, "A house-points realm for modern wizards.");
    let _ = writeln!(
        out,
        "Join your destined house through a short quiz, earn glory, and watch your house rise."
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "House Standings");
    write_standings(out, &app.landing_preview());
    let _ = writeln!(out, "Live standings appear after setup.");
    let _ = writeln!(out);
    let _ = writeln!(out, "student | admin | leaderboard | help | quit");
}

fn write_auth(out: &mut String, app: &App, mode: AuthMode) {
    match mode {
        AuthMode::Student => {
            let _ = writeln!(out, "Student Sign Up");
            let _ = writeln!(out, "signup | back");
        }
        AuthMode::Admin => {
            let _ = writeln!(out, "Admin Login");
            let _ = writeln!(out, "setup | back");
        }
    }

    let status = app.auth_status();
    if let Some(error) = &status.error {
        let _ = writeln!(out, "! {}", error);
    }
    if let Some(notice) = &status.notice {
        let _ = writeln!(out, "{}", notice);
    }
}

fn write_quiz(out: &mut String, quiz: &QuizFlow) {
    let _ = writeln!(out, "The Sorting Trial");
    for question in quiz.bank().questions() {
        let chosen = quiz.answers().get(question.id);
        let _ = writeln!(out, "{}. {}", question.id, question.prompt);
        for (idx, option) in question.options.iter().enumerate() {
            let marker = if chosen == Some(idx) { '*' } else { ' ' };
            let _ = writeln!(out, "   {}{}) {}", marker, idx + 1, option);
        }
    }

    let _ = writeln!(
        out,
        "Answered {} of {}",
        quiz.answers().len(),
        quiz.bank().len()
    );
    if quiz.can_submit() {
        let _ = writeln!(out, "answer <question> <option> | submit | back");
    } else {
        let _ = writeln!(out, "answer <question> <option> | back");
    }
}

fn write_dashboard(out: &mut String, view: &DashboardView) {
    let _ = writeln!(out, "Welcome, {}", view.student_name);
    let _ = writeln!(out, "Your house:   {} {}", view.crest, view.house_label());
    let _ = writeln!(out, "House total:  {}", view.house_total);
    let _ = writeln!(out, "Your contribution: {}", view.contribution);
    let _ = writeln!(out);
    write_standings(out, &view.standings);
    let _ = writeln!(out);
    let _ = writeln!(out, "Recent Activity");
    if view.activity.is_empty() {
        let _ = writeln!(out, "  No activity yet.");
    }
    for item in &view.activity {
        let _ = writeln!(out, "  {:<40} {:>6}", item.reason, item.label());
    }
    let _ = writeln!(out, "leaderboard | refresh | back");
}

fn write_leaderboard(out: &mut String, view: &LeaderboardView, loading: bool) {
    let _ = writeln!(out, "Leaderboard");
    if loading {
        let _ = writeln!(out, "(loading...)");
    }
    let _ = writeln!(out, "House Standings");
    write_standings(out, &view.standings);
    let _ = writeln!(out);
    let _ = writeln!(out, "Top Performers");
    for entry in &view.top {
        let _ = writeln!(
            out,
            "  {:<24} ({}) {:>6}",
            entry.name,
            entry.house_label(),
            entry.points
        );
    }
    let _ = writeln!(out, "student | refresh | back");
}

/// Render the active screen
pub async fn render(app: &App) -> String {
    let mut out = String::new();

    match app.screen() {
        Screen::Landing => write_landing(&mut out, app),
        Screen::Auth(mode) => write_auth(&mut out, app, mode),
        Screen::Quiz => match app.quiz() {
            Some(quiz) => write_quiz(&mut out, quiz),
            None => {
                let _ = writeln!(out, "Loading...");
            }
        },
        Screen::Dashboard => match app.dashboard().await {
            ViewState::Ready(view) => write_dashboard(&mut out, &view),
            _ => {
                let _ = writeln!(out, "Loading...");
                let _ = writeln!(out, "refresh | back");
            }
        },
        Screen::Leaderboard => {
            let loading = matches!(app.leaderboard_state().await, ViewState::Loading);
            write_leaderboard(&mut out, &app.leaderboard().await, loading);
        }
    }

    out
}
