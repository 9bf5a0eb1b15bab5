pub mod candidate;
pub mod company;
pub mod job;
pub mod reference;
pub mod skill;
pub mod token;
pub mod user;
