pub mod config;
pub mod error;
pub mod host;
pub mod scheduler;
pub mod schema;
pub mod store;
pub mod style;

pub use config::{ScrollbarVisibility, Settings};
pub use error::{Error, Result};
pub use host::{
    Coords, Editor, EditorId, EventKind, EventOutcome, EventPort, Host, HostEvent, Rect,
    StyleSink, Workspace,
};
pub use scheduler::{Millis, TimerId, TimerQueue};
pub use store::{FileStore, MemoryStore, SettingsStore};
