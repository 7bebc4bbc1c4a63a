// Page chrome and static content

pub mod content;
pub mod view;

pub use content::{AuthorInfo, BookContent};
pub use view::{PageSnapshot, PageView};
