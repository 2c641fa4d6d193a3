//! # recurrence-engine
//!
//! Expands calendar recurrence rules into concrete, ordered occurrence dates
//! within a requested window.
//!
//! The engine is pure: every call is a deterministic function of the rule and
//! the window, with no I/O and no shared state, so independent rules can be
//! evaluated in parallel and results can be cached by the caller.
//!
//! ## Modules
//!
//! - [`rule`]: the rule value object and its enums
//! - [`weekday`]: immutable weekday bit set
//! - [`window`]: window validation and trimming
//! - [`daily`], [`weekly`], [`monthly`], [`yearly`]: one generator per recurrence type
//! - [`ordinal`]: nth/last week scanning shared by monthly and yearly rules
//! - [`calendar`]: checked date arithmetic
//! - [`scheduler`]: single-rule and batch entry points
//! - [`error`]: Error types

pub mod calendar;
pub mod daily;
pub mod error;
pub mod monthly;
pub mod ordinal;
pub mod rule;
pub mod scheduler;
pub mod weekday;
pub mod weekly;
pub mod window;
pub mod yearly;

pub use error::ScheduleError;
pub use rule::{Ordinality, RecurrenceRule, RecurrenceType};
pub use scheduler::{evaluate_batch, evaluate_single};
pub use weekday::WeekdayMask;
pub use window::{is_window_valid, trim_to_window, DateRange};
