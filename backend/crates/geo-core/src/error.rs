use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Message identifier space exhausted after id {last_id} {location}")]
    IdentifierExhausted {
        last_id: u64,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
