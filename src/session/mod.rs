pub mod events;
pub mod worker;

pub use events::{SessionCommand, SessionEvent};
pub use worker::{Session, SessionHandle, SessionOptions};
