mod collection;
pub mod convert;
pub mod decode;
mod layout;
pub mod notify;
mod options;
mod session;
mod types;
pub mod writer;

pub use collection::{AddOutcome, ImageCollection};
pub use convert::{ConvertReport, convert, convert_to_file, output_path_in};
pub use decode::{DecodedImage, Thumbnail, decode_image, decode_thumbnail};
pub use layout::{FitMode, PageLayout};
pub use notify::{Notification, NotificationId, NotificationStack, Severity};
pub use options::*;
pub use session::*;
pub use types::*;
pub use writer::{DocumentWriter, PdfWriter};
