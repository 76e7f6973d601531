// In: src/stages/mod.rs

//! Stage executors: the pure, stateless transformation functions the
//! pipeline folds its data through.
//!
//! Each executor takes full ownership of the previous stage's output and
//! produces the next sequence; none of them sees the original source, and
//! none of them can fail. The strategic decisions (which stages exist, with
//! which parameters) are recorded by the pipeline; executors just do the
//! work.

pub(crate) mod combine;
pub(crate) mod join;
pub(crate) mod restrict;
pub(crate) mod sort;
pub(crate) mod transform;
