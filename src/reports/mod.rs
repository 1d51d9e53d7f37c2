//! Aggregations over rows already loaded by the repositories.

pub mod export;
pub mod fees;
pub mod lessons;
pub mod timetables;

pub use fees::{AdminPaymentSummary, ClassPaymentStats, ClassPaymentSummary, FeeStatus};
pub use lessons::LessonStats;
pub use timetables::{format_time, slot_display};
