pub mod error;
pub mod message_store;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use message_store::MessageStore;
pub use models::message::Message;
