pub mod request;
pub mod snippet;
