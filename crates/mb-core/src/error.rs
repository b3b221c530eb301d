use thiserror::Error;

#[derive(Debug, Error)]
pub enum HelpError {
    #[error("Help request not found")]
    NotFound,
    #[error("Ticket not found")]
    TicketNotFound,
    /// The store already holds a request with this ticket code.
    #[error("ticket code already in use")]
    TicketCodeTaken,
    #[error("no free ticket code after {attempts} attempts")]
    TicketCodesExhausted { attempts: usize },
    #[error("{message}")]
    InvalidInput { message: String },
    #[error("storage error: {message}")]
    Storage { message: String },
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("{kind} not found")]
    NotFound { kind: &'static str },
    #[error("Schedule entry {index} not found")]
    ScheduleEntryNotFound { index: usize },
    #[error("{message}")]
    InvalidInput { message: String },
    #[error("storage error: {message}")]
    Storage { message: String },
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("{kind} not found")]
    NotFound { kind: &'static str },
    #[error("{message}")]
    InvalidInput { message: String },
    #[error("storage error: {message}")]
    Storage { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymptomError {
    #[error("Unknown option '{value}' for question '{prompt}'")]
    UnknownOption { prompt: String, value: String },
    #[error("Check already has a result")]
    AlreadyConcluded,
    #[error("Answers stop before a result is reached")]
    Incomplete,
}

#[derive(Debug, Error)]
pub enum MonBondhuError {
    #[error(transparent)]
    Help(#[from] HelpError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Symptom(#[from] SymptomError),
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl RecordError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

impl DirectoryError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

impl HelpError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
