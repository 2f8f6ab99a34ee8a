use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::filtering::domain::frame_filter::FrameFilter;
use crate::runtime::domain::frame_sink::FrameSink;
use crate::runtime::domain::frame_source::FrameSource;
use crate::shared::constants::RUNNER_CHANNEL_CAPACITY;
use crate::shared::frame::Frame;

type SendError = Box<dyn std::error::Error + Send + Sync>;

/// Per-session knobs for [`ThreadedSessionRunner::run`].
pub struct SessionConfig {
    /// Called after each dispatched frame with (current, total); returning
    /// `false` cancels the session.
    pub on_progress: Option<Box<dyn Fn(usize, usize) -> bool + Send>>,
    pub cancelled: Arc<AtomicBool>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            on_progress: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// Runs one capture session: source thread → filter dispatch → sink thread.
///
/// The source and sink run on their own threads so decode and encode
/// overlap with filtering; the filter itself runs on the calling thread,
/// which is where its detection intake is drained. First error wins.
pub struct ThreadedSessionRunner {
    channel_capacity: usize,
}

impl ThreadedSessionRunner {
    pub fn new() -> Self {
        Self {
            channel_capacity: RUNNER_CHANNEL_CAPACITY,
        }
    }
}

impl Default for ThreadedSessionRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadedSessionRunner {
    pub fn run(
        &self,
        mut source: Box<dyn FrameSource>,
        mut sink: Box<dyn FrameSink>,
        filter: &mut dyn FrameFilter,
        input_path: &Path,
        output_path: &Path,
        config: SessionConfig,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let info = source.open(input_path)?;
        sink.open(output_path, &info)?;
        let total_frames = info.total_frames;

        let (frame_tx, frame_rx) =
            crossbeam_channel::bounded::<Result<Frame, SendError>>(self.channel_capacity);
        let (write_tx, write_rx) = crossbeam_channel::bounded::<Frame>(self.channel_capacity);

        let source_handle = spawn_source(source, frame_tx, config.cancelled.clone());
        let sink_handle = spawn_sink(sink, write_rx);

        let mut first_error: Option<Box<dyn std::error::Error>> = None;
        let mut sink_hung_up = false;
        let mut dispatched: usize = 0;

        for frame_result in frame_rx {
            if config.cancelled.load(Ordering::Relaxed) {
                break;
            }

            let mut frame = match frame_result {
                Ok(frame) => frame,
                Err(e) => {
                    first_error = Some(e.to_string().into());
                    break;
                }
            };

            if let Err(e) = filter.process(&mut frame) {
                first_error = Some(e);
                break;
            }

            if write_tx.send(frame).is_err() {
                // The sink thread exited mid-stream; its joined error says why.
                sink_hung_up = true;
                break;
            }

            dispatched += 1;
            if let Some(ref callback) = config.on_progress {
                if !callback(dispatched, total_frames) {
                    config.cancelled.store(true, Ordering::Relaxed);
                    break;
                }
            }
        }

        drop(write_tx);

        match join_threads(source_handle, sink_handle, first_error) {
            Ok(()) if sink_hung_up => Err("sink channel closed unexpectedly".into()),
            result => result,
        }
    }
}

fn spawn_source(
    mut source: Box<dyn FrameSource>,
    frame_tx: crossbeam_channel::Sender<Result<Frame, SendError>>,
    cancelled: Arc<AtomicBool>,
) -> std::thread::JoinHandle<Box<dyn FrameSource>> {
    std::thread::spawn(move || {
        for frame_result in source.frames() {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            let mapped = frame_result.map_err(|e| -> SendError { e.to_string().into() });
            if frame_tx.send(mapped).is_err() {
                break;
            }
        }
        source.close();
        source
    })
}

fn spawn_sink(
    mut sink: Box<dyn FrameSink>,
    write_rx: crossbeam_channel::Receiver<Frame>,
) -> std::thread::JoinHandle<Result<Box<dyn FrameSink>, SendError>> {
    std::thread::spawn(move || {
        for frame in write_rx {
            sink.write(&frame)
                .map_err(|e| -> SendError { e.to_string().into() })?;
        }
        Ok(sink)
    })
}

fn join_threads(
    source_handle: std::thread::JoinHandle<Box<dyn FrameSource>>,
    sink_handle: std::thread::JoinHandle<Result<Box<dyn FrameSink>, SendError>>,
    mut first_error: Option<Box<dyn std::error::Error>>,
) -> Result<(), Box<dyn std::error::Error>> {
    fn set_if_none(slot: &mut Option<Box<dyn std::error::Error>>, err: Box<dyn std::error::Error>) {
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    match source_handle.join() {
        Ok(mut source) => source.close(),
        Err(_) => set_if_none(&mut first_error, "source thread panicked".into()),
    }

    match sink_handle.join() {
        Ok(Ok(mut sink)) => {
            if let Err(e) = sink.close() {
                set_if_none(&mut first_error, e);
            }
        }
        Ok(Err(e)) => set_if_none(&mut first_error, e.to_string().into()),
        Err(_) => set_if_none(&mut first_error, "sink thread panicked".into()),
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fanout::MultiFaceFilter;
    use crate::filtering::infrastructure::invert_filter::InvertFilter;
    use crate::runtime::domain::stream_info::StreamInfo;
    use crate::shared::face_region::FaceRegion;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    struct VecSource {
        frames: Vec<Frame>,
        fail_at: Option<usize>,
    }

    impl VecSource {
        fn new(count: usize) -> Self {
            let frames = (0..count).map(|i| Frame::filled(8, 8, 3, 100, i)).collect();
            Self {
                frames,
                fail_at: None,
            }
        }
    }

    impl FrameSource for VecSource {
        fn open(&mut self, _path: &Path) -> Result<StreamInfo, Box<dyn std::error::Error>> {
            Ok(StreamInfo {
                width: 8,
                height: 8,
                total_frames: self.frames.len(),
                source_path: None,
            })
        }

        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            let fail_at = self.fail_at;
            Box::new(
                std::mem::take(&mut self.frames)
                    .into_iter()
                    .enumerate()
                    .map(move |(i, frame)| {
                        if fail_at == Some(i) {
                            Err("decode error".into())
                        } else {
                            Ok(frame)
                        }
                    }),
            )
        }

        fn close(&mut self) {
            self.frames.clear();
        }
    }

    struct VecSink {
        written: Arc<Mutex<Vec<Frame>>>,
        fail_writes: bool,
    }

    impl VecSink {
        fn new() -> (Self, Arc<Mutex<Vec<Frame>>>) {
            let written = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    written: Arc::clone(&written),
                    fail_writes: false,
                },
                written,
            )
        }
    }

    impl FrameSink for VecSink {
        fn open(
            &mut self,
            _path: &Path,
            _info: &StreamInfo,
        ) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }

        fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            if self.fail_writes {
                return Err("disk full".into());
            }
            self.written.lock().unwrap().push(frame.clone());
            Ok(())
        }

        fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }
    }

    fn paths() -> (std::path::PathBuf, std::path::PathBuf) {
        ("in".into(), "out".into())
    }

    #[test]
    fn test_all_frames_flow_through_in_order() {
        let (sink, written) = VecSink::new();
        let mut node = MultiFaceFilter::new();
        let (input, output) = paths();

        ThreadedSessionRunner::new()
            .run(
                Box::new(VecSource::new(5)),
                Box::new(sink),
                &mut node,
                &input,
                &output,
                SessionConfig::default(),
            )
            .unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written.len(), 5);
        let indices: Vec<_> = written.iter().map(Frame::index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_filter_runs_on_each_frame() {
        let (sink, written) = VecSink::new();
        let mut node = MultiFaceFilter::new();
        node.add_filter(Box::new(InvertFilter::new()));
        node.detection_sender().deliver(vec![FaceRegion::new(0, 0, 8, 8)]);
        let (input, output) = paths();

        ThreadedSessionRunner::new()
            .run(
                Box::new(VecSource::new(3)),
                Box::new(sink),
                &mut node,
                &input,
                &output,
                SessionConfig::default(),
            )
            .unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written.len(), 3);
        // 100 inverted everywhere, on every frame.
        assert!(written.iter().all(|f| f.data().iter().all(|&b| b == 155)));
    }

    #[test]
    fn test_progress_callback_sees_every_frame() {
        let (sink, _written) = VecSink::new();
        let mut node = MultiFaceFilter::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_inner = Arc::clone(&seen);
        let (input, output) = paths();

        let config = SessionConfig {
            on_progress: Some(Box::new(move |current, total| {
                assert_eq!(total, 4);
                seen_inner.store(current, Ordering::Relaxed);
                true
            })),
            ..Default::default()
        };

        ThreadedSessionRunner::new()
            .run(
                Box::new(VecSource::new(4)),
                Box::new(sink),
                &mut node,
                &input,
                &output,
                config,
            )
            .unwrap();

        assert_eq!(seen.load(Ordering::Relaxed), 4);
    }

    #[test]
    fn test_progress_callback_false_cancels() {
        let (sink, written) = VecSink::new();
        let mut node = MultiFaceFilter::new();
        let (input, output) = paths();

        let config = SessionConfig {
            on_progress: Some(Box::new(|current, _total| current < 2)),
            ..Default::default()
        };

        ThreadedSessionRunner::new()
            .run(
                Box::new(VecSource::new(10)),
                Box::new(sink),
                &mut node,
                &input,
                &output,
                config,
            )
            .unwrap();

        assert_eq!(written.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_pre_cancelled_session_writes_nothing() {
        let (sink, written) = VecSink::new();
        let mut node = MultiFaceFilter::new();
        let (input, output) = paths();

        let config = SessionConfig {
            cancelled: Arc::new(AtomicBool::new(true)),
            ..Default::default()
        };

        ThreadedSessionRunner::new()
            .run(
                Box::new(VecSource::new(10)),
                Box::new(sink),
                &mut node,
                &input,
                &output,
                config,
            )
            .unwrap();

        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_source_error_propagates() {
        let (sink, _written) = VecSink::new();
        let mut node = MultiFaceFilter::new();
        let mut source = VecSource::new(5);
        source.fail_at = Some(2);
        let (input, output) = paths();

        let err = ThreadedSessionRunner::new()
            .run(
                Box::new(source),
                Box::new(sink),
                &mut node,
                &input,
                &output,
                SessionConfig::default(),
            )
            .unwrap_err();

        assert!(err.to_string().contains("decode error"));
    }

    #[test]
    fn test_sink_error_propagates() {
        let (mut sink, _written) = VecSink::new();
        sink.fail_writes = true;
        let mut node = MultiFaceFilter::new();
        let (input, output) = paths();

        let err = ThreadedSessionRunner::new()
            .run(
                Box::new(VecSource::new(3)),
                Box::new(sink),
                &mut node,
                &input,
                &output,
                SessionConfig::default(),
            )
            .unwrap_err();

        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_sink_error_survives_mid_stream_hangup() {
        // Enough frames that the dispatch loop outlives the failing sink and
        // hits the closed channel; the sink's own error must still surface.
        let (mut sink, _written) = VecSink::new();
        sink.fail_writes = true;
        let mut node = MultiFaceFilter::new();
        let (input, output) = paths();

        let err = ThreadedSessionRunner::new()
            .run(
                Box::new(VecSource::new(50)),
                Box::new(sink),
                &mut node,
                &input,
                &output,
                SessionConfig::default(),
            )
            .unwrap_err();

        assert!(err.to_string().contains("disk full"));
    }
}
