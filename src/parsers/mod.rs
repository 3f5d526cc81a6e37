pub mod smartd;
pub mod types;

pub use smartd::Smartd;
pub use types::{
    AttributeSeries, Clock, FixedClock, GlobalTimeline, ParseOptions, Parseable, ParsedLog,
    Sample, SystemClock,
};
