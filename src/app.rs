//! Client orchestration: screens call the gateway and the results drive
//! the router, the quiz and the per-view fetches.

use crate::auth::{AuthStatus, SignupForm, ADMIN_BOOTSTRAP_NOTICE};
use crate::error::ClientError;
use crate::gateway::HouseApi;
use crate::loader::{ViewLoader, ViewState};
use crate::quiz::{QuestionBank, QuizError, QuizFlow, QuizPhase};
use crate::router::{AuthMode, NavAction, RouteError, Screen, ViewRouter};
use crate::session::{SessionError, SessionState};
use crate::standings::HouseStanding;
use crate::types::*;
use crate::views::{self, DashboardView, LeaderboardView};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Cannot {action} on the {screen} screen")]
    WrongScreen {
        action: &'static str,
        screen: Screen,
    },
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Route(RouteError::Session(err))
    }
}

pub struct App {
    api: Arc<dyn HouseApi>,
    bank: Arc<QuestionBank>,
    router: ViewRouter,
    quiz: Option<QuizFlow>,
    auth: AuthStatus,
    dashboard: ViewLoader<StudentDashboard>,
    overview: ViewLoader<Overview>,
}

impl App {
    pub fn new(api: Arc<dyn HouseApi>) -> Self {
        Self::with_questions(api, QuestionBank::reference())
    }

    pub fn with_questions(api: Arc<dyn HouseApi>, bank: QuestionBank) -> Self {
        Self {
            api,
            bank: Arc::new(bank),
            router: ViewRouter::new(),
            quiz: None,
            auth: AuthStatus::default(),
            dashboard: ViewLoader::new("dashboard"),
            overview: ViewLoader::new("leaderboard"),
        }
    }

    pub fn screen(&self) -> Screen {
        self.router.screen()
    }

    pub fn session(&self) -> &SessionState {
        self.router.session()
    }

    pub fn quiz(&self) -> Option<&QuizFlow> {
        self.quiz.as_ref()
    }

    pub fn auth_status(&self) -> &AuthStatus {
        &self.auth
    }

    fn expect_screen(&self, expected: Screen, action: &'static str) -> Result<(), AppError> {
        let screen = self.screen();
        if screen != expected {
            return Err(AppError::WrongScreen { action, screen });
        }
        Ok(())
    }

    /// Move to another screen, stopping the old screen's work and starting the new one's
    pub async fn navigate(&mut self, action: NavAction) -> Result<Screen, AppError> {
        let from = self.screen();
        let to = self.router.dispatch(action)?;

        if from != to {
            self.leave(from).await;
            self.enter(to).await;
        }
        Ok(to)
    }

    async fn leave(&mut self, screen: Screen) {
        match screen {
            Screen::Dashboard => self.dashboard.deactivate().await,
            Screen::Leaderboard => self.overview.deactivate().await,
            Screen::Auth(_) => self.auth.reset(),
            Screen::Landing | Screen::Quiz => {}
        }
    }

    async fn enter(&mut self, screen: Screen) {
        match screen {
            // The router has already cleared the session
            Screen::Landing => self.quiz = None,
            Screen::Auth(_) => self.auth.reset(),
            Screen::Quiz => {
                if self.quiz.is_none() {
                    self.quiz = Some(QuizFlow::new(self.bank.clone()));
                }
            }
            Screen::Dashboard => self.load_dashboard().await,
            Screen::Leaderboard => self.load_overview().await,
        }
    }

    async fn load_dashboard(&mut self) {
        let Some(identity) = self.session().identity() else {
            tracing::warn!("Dashboard opened without a signed-in student");
            return;
        };

        let api = self.api.clone();
        let user_id = identity.user_id.clone();
        self.dashboard
            .activate(async move { api.fetch_student_dashboard(&user_id).await })
            .await;
    }

    async fn load_overview(&mut self) {
        let api = self.api.clone();
        self.overview
            .activate(async move { api.fetch_overview().await })
            .await;
    }

    pub async fn choose_student(&mut self) -> Result<Screen, AppError> {
        self.navigate(NavAction::ChooseStudent).await
    }

    pub async fn choose_admin(&mut self) -> Result<Screen, AppError> {
        self.navigate(NavAction::ChooseAdmin).await
    }

    pub async fn choose_leaderboard(&mut self) -> Result<Screen, AppError> {
        self.navigate(NavAction::ChooseLeaderboard).await
    }

    pub async fn back(&mut self) -> Result<Screen, AppError> {
        self.navigate(NavAction::Back).await
    }

    /// Create a student account and continue to the quiz
    pub async fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Screen, AppError> {
        self.expect_screen(Screen::Auth(AuthMode::Student), "sign up")?;
        self.auth.reset();

        let form = SignupForm::new(name, email, password);
        let result = match form.validate() {
            Ok(()) => {
                self.api
                    .signup(&form.name, &form.email, &form.password)
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(identity) => self.navigate(NavAction::SignupSucceeded(identity)).await,
            Err(e) => {
                tracing::warn!("Signup failed: {}", e);
                self.auth.failed(&e);
                Err(e.into())
            }
        }
    }

    /// Ask the server to set up the admin account. The screen stays on admin login.
    pub async fn bootstrap_admin(&mut self) -> Result<(), AppError> {
        self.expect_screen(Screen::Auth(AuthMode::Admin), "run admin setup")?;
        self.auth.reset();

        let outcome = self.api.bootstrap_admin().await;
        self.navigate(NavAction::BootstrapAttempted).await?;

        match outcome {
            Ok(()) => {
                self.auth.noticed(ADMIN_BOOTSTRAP_NOTICE);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Admin bootstrap failed: {}", e);
                self.auth.failed(&e);
                Err(e.into())
            }
        }
    }

    pub fn answer(
        &mut self,
        question_id: QuestionId,
        option_index: usize,
    ) -> Result<QuizPhase, AppError> {
        self.expect_screen(Screen::Quiz, "answer a question")?;
        let quiz = self.quiz.as_mut().ok_or(AppError::WrongScreen {
            action: "answer a question",
            screen: Screen::Quiz,
        })?;
        Ok(quiz.answer(question_id, option_index)?)
    }

    /// Submit the quiz and continue to the dashboard
    pub async fn submit_quiz(&mut self) -> Result<Screen, AppError> {
        self.expect_screen(Screen::Quiz, "submit the quiz")?;
        let user_id = self
            .session()
            .identity()
            .map(|i| i.user_id.clone())
            .ok_or(SessionError::NotSignedIn)?;

        let api = self.api.clone();
        let quiz = self.quiz.as_mut().ok_or(AppError::WrongScreen {
            action: "submit the quiz",
            screen: Screen::Quiz,
        })?;
        let result = quiz.submit(api.as_ref(), &user_id).await?;

        self.navigate(NavAction::QuizSubmitted(result)).await
    }

    /// Fetch the current screen's data again
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        match self.screen() {
            Screen::Dashboard => self.load_dashboard().await,
            Screen::Leaderboard => self.load_overview().await,
            screen => {
                return Err(AppError::WrongScreen {
                    action: "refresh",
                    screen,
                })
            }
        }
        Ok(())
    }

    /// Whether the active screen is still waiting on its fetch
    pub fn is_loading(&self) -> bool {
        match self.screen() {
            Screen::Dashboard => self.dashboard.is_pending(),
            Screen::Leaderboard => self.overview.is_pending(),
            _ => false,
        }
    }

    /// Wait for the active screen's fetch to complete. Cancel safe.
    pub async fn settle(&mut self) {
        match self.screen() {
            Screen::Dashboard => self.dashboard.settle().await,
            Screen::Leaderboard => self.overview.settle().await,
            _ => {}
        }
    }

    pub fn landing_preview(&self) -> Vec<HouseStanding> {
        views::landing_preview()
    }

    /// Dashboard data; anything but `Ready` is shown as loading
    pub async fn dashboard(&self) -> ViewState<DashboardView> {
        self.dashboard
            .state()
            .await
            .map(|data| DashboardView::from(&data))
    }

    pub async fn leaderboard_state(&self) -> ViewState<Overview> {
        self.overview.state().await
    }

    /// Leaderboard data, empty until the overview has loaded
    pub async fn leaderboard(&self) -> LeaderboardView {
        self.overview
            .state()
            .await
            .ready()
            .map(LeaderboardView::from)
            .unwrap_or_default()
    }
}
