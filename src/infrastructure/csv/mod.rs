// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Season export parsing for the bulk importer

mod csv_parser;

pub use csv_parser::{CsvParser, ParsedSeasons, EXPECTED_HEADERS};
