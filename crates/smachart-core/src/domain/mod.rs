//! # Domain Models
//!
//! Validated types for price histories.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker |
//! | [`Interval`] | Sampling interval (1m … 1d) |
//! | [`Period`] | Look-back range (1mo … max) |
//! | [`UtcDateTime`] | UTC timestamp, the series ordering key |
//! | [`Sample`] | One `(timestamp, value)` observation, value possibly absent |
//! | [`Series`] | Ordered samples for one instrument |
//! | [`PriceHistory`] | Close-price series plus request context |
//!
//! Absent observations are `Option::None`, never a NaN sentinel:
//!
//! ```rust
//! use smachart_core::{Sample, UtcDateTime};
//!
//! let ts = UtcDateTime::parse("2024-01-02T00:00:00Z").unwrap();
//! assert_eq!(Sample::observed(ts, f64::NAN).value, None);
//! ```

mod interval;
mod models;
mod period;
mod symbol;
mod timestamp;

pub use interval::Interval;
pub use models::{PriceHistory, Sample, Series};
pub use period::Period;
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
