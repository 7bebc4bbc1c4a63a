// Mailing list capture
// Validates an address and appends it to a locally stored list

pub mod list;
pub mod store;

pub use list::{MailingList, SignupError, Subscriber, DEFAULT_STORAGE_KEY};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
