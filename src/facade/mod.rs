pub mod form;
pub mod notes;
pub mod notice;

pub use form::EntryForm;
pub use notes::{MovieNotes, Upserted, VALIDATION_MESSAGE};
pub use notice::{Notice, NoticeBoard, NoticeKind};
