pub mod app;
pub mod error;
pub mod event;
pub mod session;
pub mod tutor;
pub mod ui;

pub use error::TutorError;
pub use session::{ChatSession, Message, Role};
pub use tutor::TutorClient;
