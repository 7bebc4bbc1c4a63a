// Audio playback module
// One session owns one playback resource for the page's lifetime

pub mod resource;
pub mod session;

pub use resource::{resource_channel, PlaybackResource, ResourceEvent, ResourceEvents, ResourceNotifier};
pub use session::{AudioSession, PlaybackPhase, PlaybackStatus};
