pub mod movie;
pub mod response;
