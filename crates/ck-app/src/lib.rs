//! # ck-app
//!
//! Application services orchestrating the clipkeep domain through ports:
//! the history store service, the clipboard monitor, the sync engine, the
//! settings use cases, and the assembly glue binding them together.

pub mod bootstrap;
pub mod copy_from_history;
pub mod history;
pub mod monitor;
pub mod settings;
pub mod stop_handle;
pub mod sync;

pub use bootstrap::{ClipkeepCore, CoreDeps};
pub use copy_from_history::CopyFromHistory;
pub use history::HistoryService;
pub use monitor::{ClipboardMonitor, MonitorOptions};
pub use settings::SettingsService;
pub use stop_handle::StopHandle;
pub use sync::{BackgroundSyncScheduler, NoopSyncObserver, SyncEngine, SyncObserver, SyncOptions};
