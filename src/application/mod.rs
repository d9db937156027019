pub mod use_cases;

pub use use_cases::csv_import::CsvImportUseCase;
pub use use_cases::team_season::TeamSeasonUseCase;
