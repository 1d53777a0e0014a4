pub mod cache;
pub mod health;
pub mod stats;
pub mod teams;
