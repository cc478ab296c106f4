pub mod driver;
pub mod outcome;
pub mod row_ctx;

pub use driver::EvaluationDriver;
pub use outcome::{RowOutcome, RunSummary};
pub use row_ctx::RowCtx;
