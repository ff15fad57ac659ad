pub mod message;
pub mod actor;
