use thiserror::Error;

use crate::model::{AnswerError, SettingsError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
