pub mod connection;
pub mod team_seasons;
