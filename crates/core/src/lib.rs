//! Face-aware fan-out filtering for frame-filter graphs.
//!
//! The central piece is [`fanout::MultiFaceFilter`]: a filter-graph node that
//! pairs externally detected face regions with an ordered set of child
//! filters and dispatches a cropped view of each face to its child. Face
//! regions arrive through a non-blocking [`fanout::DetectionSender`] so the
//! detection callback and the render clock never stall each other.

pub mod fanout;
pub mod filtering;
pub mod runtime;
pub mod shared;
