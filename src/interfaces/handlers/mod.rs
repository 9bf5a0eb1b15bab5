pub mod auth;
pub mod candidates;
pub mod home;
pub mod jobs;
pub mod reference;
pub mod system;
