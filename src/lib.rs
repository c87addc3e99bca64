pub mod codec;
pub mod config;
pub mod protocol;
pub mod storage;

pub use config::BackendConfig;
pub use protocol::{Backend, LineTransport, Session};
pub use storage::{SqliteStore, TxtStore};
