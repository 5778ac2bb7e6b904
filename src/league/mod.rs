pub mod league;
pub mod resolver;
pub mod results;
pub mod schedule;
pub mod standings;
