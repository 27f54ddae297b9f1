//! Session lifecycle and the process-wide session store

mod manager;
mod state;

pub use manager::SessionManager;
pub use state::{
    NextQuestion, ResponseRecord, Session, SessionSnapshot, SessionState, StartRequest,
};
