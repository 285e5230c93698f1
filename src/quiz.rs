use crate::error::{ClientError, ClientResult};
use crate::gateway::HouseApi;
use crate::types::*;
use std::sync::Arc;

/// A single sorting question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
}

impl Question {
    pub fn new(id: QuestionId, prompt: &str, options: &[&str]) -> Self {
        Self {
            id,
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

/// The fixed set of questions a student must answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The standard three-question sorting trial
    pub fn reference() -> Self {
        Self::new(vec![
            Question::new(
                1,
                "In a challenge, you rely on...",
                &["Bravery", "Ambition", "Loyalty", "Wisdom"],
            ),
            Question::new(
                2,
                "A symbol you resonate with...",
                &["Sword", "Serpent", "Badger", "Eagle"],
            ),
            Question::new(
                3,
                "Pick a path...",
                &["Daring", "Power", "Kindness", "Knowledge"],
            ),
        ])
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Answering,
    ReadyToSubmit,
    /// A submission is in flight; answers and re-submits are rejected
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("Question {0} is not part of this quiz")]
    UnknownQuestion(QuestionId),

    #[error("Question {question_id} has no option {option_index}")]
    OptionOutOfRange {
        question_id: QuestionId,
        option_index: usize,
    },

    #[error("Answer every question before submitting ({answered} of {required} answered)")]
    Incomplete { answered: usize, required: usize },

    #[error("The quiz is already being submitted")]
    InFlight,

    #[error("The quiz has already been submitted")]
    AlreadySubmitted,

    #[error(transparent)]
    Rejected(#[from] ClientError),
}

/// In-progress answers for one run of the sorting quiz
#[derive(Debug, Clone)]
pub struct QuizFlow {
    bank: Arc<QuestionBank>,
    answers: QuizAnswerSet,
    phase: QuizPhase,
}

impl QuizFlow {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        let mut flow = Self {
            bank,
            answers: QuizAnswerSet::new(),
            phase: QuizPhase::Answering,
        };
        flow.phase = flow.answering_phase();
        flow
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn answers(&self) -> &QuizAnswerSet {
        &self.answers
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.bank
            .questions()
            .iter()
            .all(|q| self.answers.get(q.id).is_some())
    }

    pub fn can_submit(&self) -> bool {
        self.phase == QuizPhase::ReadyToSubmit
    }

    fn answering_phase(&self) -> QuizPhase {
        if self.is_complete() {
            QuizPhase::ReadyToSubmit
        } else {
            QuizPhase::Answering
        }
    }

    /// Choose an option for a question, replacing any earlier choice
    pub fn answer(
        &mut self,
        question_id: QuestionId,
        option_index: usize,
    ) -> Result<QuizPhase, QuizError> {
        match self.phase {
            QuizPhase::Submitting => return Err(QuizError::InFlight),
            QuizPhase::Submitted => return Err(QuizError::AlreadySubmitted),
            QuizPhase::Answering | QuizPhase::ReadyToSubmit => {}
        }

        let question = self
            .bank
            .get(question_id)
            .ok_or(QuizError::UnknownQuestion(question_id))?;
        if option_index >= question.options.len() {
            return Err(QuizError::OptionOutOfRange {
                question_id,
                option_index,
            });
        }

        self.answers.set(question_id, option_index);
        self.phase = self.answering_phase();
        Ok(self.phase)
    }

    /// Lock the answers for submission and return them.
    ///
    /// Fails without side effects unless every question has been answered.
    pub fn begin_submission(&mut self) -> Result<QuizAnswerSet, QuizError> {
        match self.phase {
            QuizPhase::ReadyToSubmit => {
                self.phase = QuizPhase::Submitting;
                Ok(self.answers.clone())
            }
            QuizPhase::Answering => Err(QuizError::Incomplete {
                answered: self.answers.len(),
                required: self.bank.len(),
            }),
            QuizPhase::Submitting => Err(QuizError::InFlight),
            QuizPhase::Submitted => Err(QuizError::AlreadySubmitted),
        }
    }

    /// Apply the outcome of a submission started with [`Self::begin_submission`].
    ///
    /// A failure returns the flow to `ReadyToSubmit` so the user can retry.
    pub fn finish_submission(
        &mut self,
        outcome: ClientResult<SortingResult>,
    ) -> Result<SortingResult, QuizError> {
        if self.phase != QuizPhase::Submitting {
            return Err(match self.phase {
                QuizPhase::Submitted => QuizError::AlreadySubmitted,
                _ => QuizError::Incomplete {
                    answered: self.answers.len(),
                    required: self.bank.len(),
                },
            });
        }

        match outcome {
            Ok(result) => {
                self.phase = QuizPhase::Submitted;
                Ok(result)
            }
            Err(e) => {
                tracing::warn!("Quiz submission failed: {}", e);
                self.phase = QuizPhase::ReadyToSubmit;
                Err(e.into())
            }
        }
    }

    /// Submit the answers for `user_id`. No request is made unless the quiz is complete.
    pub async fn submit(
        &mut self,
        api: &dyn HouseApi,
        user_id: &str,
    ) -> Result<SortingResult, QuizError> {
        let answers = self.begin_submission()?;
        let outcome = api.submit_quiz(user_id, &answers).await;
        self.finish_submission(outcome)
    }
}
