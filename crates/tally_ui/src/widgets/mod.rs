//! Widget implementations

mod counter;
mod spinner;

pub use counter::{
    Counter, CounterEvent, CounterMessage, CounterOptions, EntryOutcome, ManualEntry, RejectReason,
};
pub use spinner::{Spinner, SpinnerOptions};
