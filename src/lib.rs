// In: src/lib.rs

//! relinq: deferred query pipelines over in-memory ordered sequences.
//!
//! A [`Query`] is an immutable value pairing a backing sequence with the
//! ordered list of operations recorded against it. Building a chain never
//! touches data; a terminal call folds the source through every recorded
//! stage, left-to-right, and later calls re-run the fold from scratch, so
//! mutations of a shared backing sequence are visible on the next
//! materialization.
//!
//! ```
//! use relinq::sequence;
//!
//! let top = sequence(vec![3, 1, 4, 1, 5, 9, 2, 6])
//!     .filter(|n, _| n % 2 == 1)
//!     .order_by_descending(|n| *n)
//!     .take(2);
//!
//! assert_eq!(top.to_vec(), vec![9, 5]);
//! assert_eq!(top.plan().to_string(),
//!            "source -> filter -> sort(1) -> reverse -> take(2)");
//! ```

pub mod error;
pub mod lookup;
pub mod pipeline;
pub mod source;

mod stages;

pub use error::QueryError;
pub use lookup::{Group, Lookup};
pub use pipeline::ordered::OrderedQuery;
pub use pipeline::plan::{Plan, StageKind};
pub use pipeline::Query;
pub use source::{sequence, IntoSequence};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
