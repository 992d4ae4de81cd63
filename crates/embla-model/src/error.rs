use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Two events of different kinds were compared.
    #[error("cannot compare a {left} event with a {right} event")]
    TypeMismatch {
        left: &'static str,
        right: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
