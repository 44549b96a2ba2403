/// Errors raised while turning questionnaire answers into a score.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LiaError {
    #[error("invalid value '{value}' for questionnaire field {field}")]
    InvalidInput { field: &'static str, value: String },
    #[error("questionnaire incomplete, unanswered fields: {}", .missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },
    #[error("invalid scoring policy: {0}")]
    InvalidPolicy(String),
}

impl LiaError {
    /// Field named by an `InvalidInput` error.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            LiaError::InvalidInput { field, .. } => Some(*field),
            _ => None,
        }
    }
}
