mod http;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;

pub use http::HttpGateway;

use crate::error::ClientResult;
use crate::types::*;

/// Operations offered by the house points service.
///
/// Every call suspends until a response or a transport failure arrives.
/// Non-success responses are normalized into [`crate::error::ClientError`]
/// with a readable message; implementations never panic on them.
#[async_trait]
pub trait HouseApi: Send + Sync {
    /// Create a student account
    async fn signup(&self, name: &str, email: &str, password: &str) -> ClientResult<Identity>;

    /// Trigger the one-time admin setup on the server
    async fn bootstrap_admin(&self) -> ClientResult<()>;

    /// Submit quiz answers in the order they were given
    async fn submit_quiz(
        &self,
        user_id: &str,
        answers: &QuizAnswerSet,
    ) -> ClientResult<SortingResult>;

    async fn fetch_student_dashboard(&self, user_id: &str) -> ClientResult<StudentDashboard>;

    async fn fetch_overview(&self) -> ClientResult<Overview>;
}
