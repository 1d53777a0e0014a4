pub mod comparison;
pub mod document_id;
pub mod fixture;
pub mod player;
pub mod ranking;
pub mod stats;
pub mod team;
