pub mod matches;
pub mod pending_result;
pub mod settings;
pub mod standings;
pub mod team;
pub mod user;
