pub mod csv_import;
pub mod team_season;
