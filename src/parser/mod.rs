pub mod serp_response;

pub use serp_response::*;
