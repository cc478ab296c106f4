pub mod rating;
pub mod row;

pub use rating::{InputWrite, RatingInput, ScoreSheet};
pub use row::{TableRow, PENDING_MARKER};
