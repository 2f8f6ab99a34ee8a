pub mod image_file_sink;
pub mod image_file_source;
pub mod threaded_session_runner;
