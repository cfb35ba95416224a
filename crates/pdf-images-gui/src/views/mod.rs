pub mod activity;
pub mod images;
pub mod notifications;

pub use activity::show_log;
pub use images::{ImagesState, Thumbnail, show_images};
pub use notifications::show_notifications;
