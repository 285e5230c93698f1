//! Scripted in-memory gateway for unit tests

use super::*;
use crate::error::ClientError;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Queue of scripted replies; the default is used once the queue runs dry
struct Script<T> {
    queue: VecDeque<(Duration, ClientResult<T>)>,
    default: ClientResult<T>,
}

impl<T: Clone> Script<T> {
    fn new(default: ClientResult<T>) -> Self {
        Self {
            queue: VecDeque::new(),
            default,
        }
    }

    fn next(&mut self) -> (Duration, ClientResult<T>) {
        self.queue
            .pop_front()
            .unwrap_or_else(|| (Duration::ZERO, self.default.clone()))
    }
}

pub(crate) struct FakeGateway {
    signup: Mutex<Script<Identity>>,
    bootstrap: Mutex<Script<()>>,
    submit: Mutex<Script<SortingResult>>,
    dashboard: Mutex<Script<StudentDashboard>>,
    overview: Mutex<Script<Overview>>,
    /// Every call made, in order, e.g. "submit_quiz:u-1"
    pub calls: Mutex<Vec<String>>,
    /// Answer sets received by submit_quiz
    pub submitted: Mutex<Vec<QuizAnswerSet>>,
}

pub(crate) fn sample_dashboard(name: &str) -> StudentDashboard {
    StudentDashboard {
        student: StudentProfile {
            id: Some("u-1".to_string()),
            name: name.to_string(),
            assigned_house: Some("Ravenclaw".to_string()),
            total_points: 15,
        },
        houses: vec![Team::new("Ravenclaw", 30), Team::new("Slytherin", 10)],
        transactions: vec![Transaction {
            reason: "Helped a first-year".to_string(),
            delta: 15,
        }],
    }
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            signup: Mutex::new(Script::new(Ok(Identity {
                user_id: "u-1".to_string(),
            }))),
            bootstrap: Mutex::new(Script::new(Ok(()))),
            submit: Mutex::new(Script::new(Ok(SortingResult {
                house: "Ravenclaw".to_string(),
            }))),
            dashboard: Mutex::new(Script::new(Ok(sample_dashboard("Luna")))),
            overview: Mutex::new(Script::new(Ok(Overview::default()))),
            calls: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn push_signup(&self, reply: ClientResult<Identity>) {
        self.signup.lock().unwrap().queue.push_back((Duration::ZERO, reply));
    }

    pub fn push_bootstrap(&self, reply: ClientResult<()>) {
        self.bootstrap.lock().unwrap().queue.push_back((Duration::ZERO, reply));
    }

    pub fn push_submit(&self, reply: ClientResult<SortingResult>) {
        self.submit.lock().unwrap().queue.push_back((Duration::ZERO, reply));
    }

    pub fn push_dashboard(&self, delay: Duration, reply: ClientResult<StudentDashboard>) {
        self.dashboard.lock().unwrap().queue.push_back((delay, reply));
    }

    pub fn push_overview(&self, delay: Duration, reply: ClientResult<Overview>) {
        self.overview.lock().unwrap().queue.push_back((delay, reply));
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

async fn reply<T>((delay, result): (Duration, ClientResult<T>)) -> ClientResult<T> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    result
}

pub(crate) fn rejected(msg: &str) -> ClientError {
    ClientError::Submission(msg.to_string())
}

#[async_trait]
impl HouseApi for FakeGateway {
    async fn signup(&self, name: &str, email: &str, _password: &str) -> ClientResult<Identity> {
        self.record(format!("signup:{}:{}", name, email));
        let next = self.signup.lock().unwrap().next();
        reply(next).await
    }

    async fn bootstrap_admin(&self) -> ClientResult<()> {
        self.record("bootstrap_admin".to_string());
        let next = self.bootstrap.lock().unwrap().next();
        reply(next).await
    }

    async fn submit_quiz(
        &self,
        user_id: &str,
        answers: &QuizAnswerSet,
    ) -> ClientResult<SortingResult> {
        self.record(format!("submit_quiz:{}", user_id));
        self.submitted.lock().unwrap().push(answers.clone());
        let next = self.submit.lock().unwrap().next();
        reply(next).await
    }

    async fn fetch_student_dashboard(&self, user_id: &str) -> ClientResult<StudentDashboard> {
        self.record(format!("fetch_student_dashboard:{}", user_id));
        let next = self.dashboard.lock().unwrap().next();
        reply(next).await
    }

    async fn fetch_overview(&self) -> ClientResult<Overview> {
        self.record("fetch_overview".to_string());
        let next = self.overview.lock().unwrap().next();
        reply(next).await
    }
}
