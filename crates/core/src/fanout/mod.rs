pub mod detection_intake;
pub mod multi_face_filter;
pub mod patch;

pub use detection_intake::{detection_channel, DetectionReceiver, DetectionSender};
pub use multi_face_filter::{MirrorSwitch, MultiFaceFilter};
