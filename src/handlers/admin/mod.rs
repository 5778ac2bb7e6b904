pub mod match_handler;
pub mod result_handler;
pub mod schedule_handler;
pub mod settings_handler;
pub mod team_handler;
pub mod user_handler;
