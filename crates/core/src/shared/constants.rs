/// Capacity of the frame channels inside the threaded session runner.
pub const RUNNER_CHANNEL_CAPACITY: usize = 8;

/// Child filter used by the CLI when none is requested.
pub const DEFAULT_FILTER_NAME: &str = "pixelate";

/// Default block size for the pixelate filter.
pub const DEFAULT_PIXELATE_BLOCK: usize = 16;
