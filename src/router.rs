use crate::session::{SessionError, SessionState};
use crate::types::{Identity, SortingResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Student,
    Admin,
}

/// The screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Auth(AuthMode),
    Quiz,
    Dashboard,
    Leaderboard,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Landing => write!(f, "landing"),
            Screen::Auth(AuthMode::Student) => write!(f, "student sign-up"),
            Screen::Auth(AuthMode::Admin) => write!(f, "admin login"),
            Screen::Quiz => write!(f, "quiz"),
            Screen::Dashboard => write!(f, "dashboard"),
            Screen::Leaderboard => write!(f, "leaderboard"),
        }
    }
}

/// Everything that can move the router to another screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    ChooseStudent,
    ChooseAdmin,
    ChooseLeaderboard,
    SignupSucceeded(Identity),
    /// Admin setup was attempted, whatever the outcome
    BootstrapAttempted,
    QuizSubmitted(SortingResult),
    /// Return to the landing screen, ending the session
    Back,
}

impl NavAction {
    fn label(&self) -> &'static str {
        match self {
            NavAction::ChooseStudent => "open the student area",
            NavAction::ChooseAdmin => "open the admin login",
            NavAction::ChooseLeaderboard => "open the leaderboard",
            NavAction::SignupSucceeded(_) => "complete signup",
            NavAction::BootstrapAttempted => "run admin setup",
            NavAction::QuizSubmitted(_) => "finish the quiz",
            NavAction::Back => "go back",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("Cannot {action} from the {from} screen")]
    InvalidTransition { from: Screen, action: &'static str },

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Screen state machine. Owns the session so that screen changes and
/// session changes are applied together.
#[derive(Debug, Clone)]
pub struct ViewRouter {
    screen: Screen,
    session: SessionState,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRouter {
    pub fn new() -> Self {
        Self {
            screen: Screen::Landing,
            session: SessionState::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Where the student area leads given what the session already knows
    fn student_entry(&self) -> Screen {
        match (self.session.is_signed_in(), self.session.is_sorted()) {
            (true, true) => Screen::Dashboard,
            (true, false) => Screen::Quiz,
            _ => Screen::Auth(AuthMode::Student),
        }
    }

    /// Apply an action. On error neither the screen nor the session changes.
    pub fn dispatch(&mut self, action: NavAction) -> Result<Screen, RouteError> {
        use NavAction::*;
        use Screen::*;

        let from = self.screen;
        let label = action.label();

        let to = match (from, action) {
            (Landing | Leaderboard, ChooseStudent) => self.student_entry(),
            (Landing, ChooseAdmin) => Auth(AuthMode::Admin),
            (Landing | Dashboard, ChooseLeaderboard) => Leaderboard,

            (Auth(AuthMode::Student), SignupSucceeded(identity)) => {
                self.session.sign_in(identity)?;
                self.student_entry()
            }
            (Auth(AuthMode::Admin), BootstrapAttempted) => Auth(AuthMode::Admin),

            (Quiz, QuizSubmitted(result)) => {
                self.session.record_sorting(result)?;
                Dashboard
            }

            // Landing always starts a fresh session
            (from, Back) if from != Landing => {
                self.session.clear();
                Landing
            }

            (from, _) => {
                tracing::warn!("Rejected navigation: cannot {} from {}", label, from);
                return Err(RouteError::InvalidTransition {
                    from,
                    action: label,
                });
            }
        };

        if to != from {
            tracing::info!("Transition: {} -> {}", from, to);
        }
        self.screen = to;
        Ok(to)
    }
}
