pub mod create_message_request;
#[allow(clippy::module_inception)]
pub mod messages;
