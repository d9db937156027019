pub mod error;
pub mod team_season;
