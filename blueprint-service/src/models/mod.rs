pub mod endpoint;
pub mod prompts;
pub mod report;
pub mod rooms;

pub use endpoint::Endpoint;
