pub mod evidence_handler;
pub mod match_handler;
pub mod result_handler;
pub mod standings_handler;
pub mod team_handler;
