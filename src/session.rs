use crate::types::{Identity, SortingResult};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("A student is already signed in for this session")]
    AlreadySignedIn,

    #[error("Sign up before taking the sorting quiz")]
    NotSignedIn,

    #[error("This student has already been sorted")]
    AlreadySorted,
}

/// Identity and sorting outcome of the active session.
///
/// Lives only in memory. A sorting result never exists without an identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    identity: Option<Identity>,
    sorting: Option<SortingResult>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn sorting(&self) -> Option<&SortingResult> {
        self.sorting.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }

    pub fn is_sorted(&self) -> bool {
        self.sorting.is_some()
    }

    /// Record the identity from a successful signup
    pub fn sign_in(&mut self, identity: Identity) -> Result<(), SessionError> {
        if self.identity.is_some() {
            return Err(SessionError::AlreadySignedIn);
        }
        tracing::info!("Signed in as {}", identity.user_id);
        self.identity = Some(identity);
        Ok(())
    }

    /// Record the house assigned by the quiz
    pub fn record_sorting(&mut self, result: SortingResult) -> Result<(), SessionError> {
        if self.identity.is_none() {
            return Err(SessionError::NotSignedIn);
        }
        if self.sorting.is_some() {
            return Err(SessionError::AlreadySorted);
        }
        tracing::info!("Sorted into {}", result.house);
        self.sorting = Some(result);
        Ok(())
    }

    /// Forget identity and sorting together
    pub fn clear(&mut self) {
        if self.identity.is_some() {
            tracing::info!("Session cleared");
        }
        self.identity = None;
        self.sorting = None;
    }
}
