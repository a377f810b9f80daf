//! Data models shared by the pipeline and its callers
//!
//! `settings` is the raw document a configuration source hands over; `outcome` holds the
//! structured results the pipeline reports back.

mod outcome;
mod settings;

pub use outcome::{BatchOutcome, ErrorResponse, FileError, PreviewOutcome, CANCELLED_CODE};
pub use settings::{ImageSettings, ListingOrder, NumericValue, Settings, WatermarkSettings};
