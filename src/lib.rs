//! utilkit - array, object and function helpers
//!
//! Two layers:
//! - typed helpers over slices and iterators ([`array`], [`function`])
//! - validated operations over JSON documents ([`object`], [`value`])

pub mod array;
pub mod config;
pub mod document;
pub mod error;
pub mod function;
pub mod key;
pub mod object;
pub mod output_policy;
pub mod path;
pub mod selector;
pub mod value;

pub use array::{group_by, unique, unique_by, Direction, OrderKey};
pub use config::Config;
pub use error::{ArgPosition, FixSuggestion, UtilError};
pub use function::{memoize, Memo};
pub use key::{DedupKey, RecordKey};
pub use object::{deep_merge, deep_merge_all, omit, pick};
pub use output_policy::{OutputFormat, OutputPolicy};
pub use path::Path;
pub use selector::Selector;
pub use value::OrderSpec;
