//! # sheetcalc-core
//!
//! Core value model for the sheetcalc formula engine.
//!
//! This crate provides the types shared by every stage of evaluation:
//! - [`Value`] - Numbers, strings, booleans, errors and lists
//! - [`ErrorKind`] - Spreadsheet error sentinels (`#DIV/0!`, `#VALUE!`, ...)
//! - [`Tag`] and [`TaggedValue`] - The `{type, value}` shape returned to callers
//!
//! ## Example
//!
//! ```rust
//! use sheetcalc_core::{ErrorKind, Tag, TaggedValue, Value};
//!
//! let value = Value::list([Value::Number(1.0), Value::Error(ErrorKind::Div0)]);
//! let tagged = TaggedValue::from(&value);
//! assert_eq!(tagged.tag, Tag::List);
//! assert_eq!(value.to_string(), "{1,#DIV/0!}");
//! ```

pub mod number;
pub mod tagged;
pub mod value;

// Re-exports for convenience
pub use number::format_number;
pub use tagged::{Tag, TaggedPayload, TaggedValue};
pub use value::{ErrorKind, SharedString, Value};
