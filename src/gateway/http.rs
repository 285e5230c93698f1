use super::*;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::protocol::{ErrorBody, QuizSubmission, QuizSubmitResponse, SignupRequest, SignupResponse};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

/// How a single endpoint reports failure
struct Operation {
    name: &'static str,
    fallback: &'static str,
    kind: fn(String) -> ClientError,
}

const SIGNUP: Operation = Operation {
    name: "signup",
    fallback: "Signup failed",
    kind: ClientError::Validation,
};
const BOOTSTRAP: Operation = Operation {
    name: "admin bootstrap",
    fallback: "Admin setup failed",
    kind: ClientError::Setup,
};
const SUBMIT_QUIZ: Operation = Operation {
    name: "quiz submit",
    fallback: "Quiz submit failed",
    kind: ClientError::Submission,
};
const DASHBOARD: Operation = Operation {
    name: "student dashboard",
    fallback: "Failed to load dashboard",
    kind: ClientError::Fetch,
};
const OVERVIEW: Operation = Operation {
    name: "overview",
    fallback: "Failed to load overview",
    kind: ClientError::Fetch,
};

/// HTTP implementation of [`HouseApi`]
pub struct HttpGateway {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpGateway {
    /// Create a gateway for the configured backend
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.backend_url).map_err(|e| {
            ClientError::Config(format!(
                "invalid backend URL '{}': {}",
                config.backend_url, e
            ))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "backend URL '{}' cannot carry a path",
                config.backend_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    /// Build an endpoint URL below the base URL. Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        request.send().await.map_err(transport_error)
    }
}

fn transport_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Network("The house points service did not respond in time".to_string())
    } else {
        ClientError::Network(format!(
            "Could not reach the house points service: {}",
            err
        ))
    }
}

/// Error for a non-success response, using the body's `detail` when present
async fn rejection(response: Response, op: &Operation) -> ClientError {
    let status = response.status();
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message());

    tracing::warn!(
        "{} rejected with {}: {}",
        op.name,
        status,
        detail.as_deref().unwrap_or("<no detail>")
    );

    (op.kind)(detail.unwrap_or_else(|| op.fallback.to_string()))
}

/// Decode a success body into `T`, or turn a failure status into the operation's error
async fn decode<T: DeserializeOwned>(response: Response, op: &Operation) -> ClientResult<T> {
    if !response.status().is_success() {
        return Err(rejection(response, op).await);
    }

    response.json::<T>().await.map_err(|e| {
        if e.is_decode() {
            (op.kind)(format!("Unexpected response from server: {}", e))
        } else {
            // The body never arrived in full
            transport_error(e)
        }
    })
}

#[async_trait]
impl HouseApi for HttpGateway {
    async fn signup(&self, name: &str, email: &str, password: &str) -> ClientResult<Identity> {
        let body = SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };
        let url = self.endpoint(&["auth", "signup"]);
        tracing::debug!("POST {}", url);

        let response = self.send(self.client.post(url).json(&body)).await?;
        let created: SignupResponse = decode(response, &SIGNUP).await?;

        Ok(Identity {
            user_id: created.user_id,
        })
    }

    async fn bootstrap_admin(&self) -> ClientResult<()> {
        let url = self.endpoint(&["admin", "bootstrap"]);
        tracing::debug!("POST {}", url);

        let response = self.send(self.client.post(url)).await?;
        if !response.status().is_success() {
            return Err(rejection(response, &BOOTSTRAP).await);
        }
        Ok(())
    }

    async fn submit_quiz(
        &self,
        user_id: &str,
        answers: &QuizAnswerSet,
    ) -> ClientResult<SortingResult> {
        let body = QuizSubmission::from(answers);
        let url = self.endpoint(&["quiz", "submit", user_id]);
        tracing::debug!("POST {} ({} answers)", url, body.answers.len());

        let response = self.send(self.client.post(url).json(&body)).await?;
        let sorted: QuizSubmitResponse = decode(response, &SUBMIT_QUIZ).await?;

        Ok(SortingResult {
            house: sorted.assigned_house,
        })
    }

    async fn fetch_student_dashboard(&self, user_id: &str) -> ClientResult<StudentDashboard> {
        let url = self.endpoint(&["student", "dashboard", user_id]);
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(url)).await?;
        decode(response, &DASHBOARD).await
    }

    async fn fetch_overview(&self) -> ClientResult<Overview> {
        let url = self.endpoint(&["admin", "overview"]);
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(url)).await?;
        decode(response, &OVERVIEW).await
    }
}
