pub mod logging;
pub mod run_record;

pub use run_record::RunRecord;
