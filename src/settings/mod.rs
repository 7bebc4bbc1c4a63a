// Settings module
// Page configuration persisted as JSON in the app directory

#[allow(clippy::module_inception)]
pub mod settings;

pub use settings::{NavSettings, PageSettings, RevealSettings, SignupSettings};
