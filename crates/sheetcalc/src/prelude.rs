//! Prelude module - common imports for sheetcalc users
//!
//! ```rust
//! use sheetcalc::prelude::*;
//! ```

pub use crate::{
    // Error types
    ErrorKind,
    FormulaError,
    FormulaResult,

    // Result types
    Tag,
    TaggedPayload,
    TaggedValue,
    Value,
};
