pub mod entities;
pub mod use_cases;
pub mod pagination;
pub mod password;
pub mod search;
