pub mod client;
pub mod errors;
pub mod response;
pub mod retry;
