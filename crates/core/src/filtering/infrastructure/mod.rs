pub mod filter_factory;
pub mod invert_filter;
pub mod passthrough_filter;
pub mod pixelate_filter;
pub mod tint_filter;
