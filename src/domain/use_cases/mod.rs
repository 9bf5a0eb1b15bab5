pub mod auth;
pub mod candidates;
pub mod extractors;
pub mod jobs;
pub mod reference;
