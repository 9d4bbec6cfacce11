pub mod data_types;
pub mod error;
pub mod hook_types;
pub mod message_handler;
pub mod reply;
pub mod route;
pub mod timestamp;
pub mod transport;
