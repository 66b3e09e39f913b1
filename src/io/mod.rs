//! Reading ingredient tables and writing potion schedules.

mod reader;
mod writer;

pub use reader::{
    load_table, read_records, read_records_from_path, EFFECT_COLUMN_PREFIX, INGREDIENT_COLUMN,
};
pub use writer::{
    write_csv, write_json, write_schedule, NamedFact, OutputFormat, PotionReport, ScheduleReport,
};
