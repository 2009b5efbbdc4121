//! Port traits decoupling the domain from infrastructure.

mod change_handler;
mod clipboard_device;
mod clock;
mod history_repository;
mod identity;
mod kv_store;
mod notification;
mod remote_records;
mod settings_repository;

pub use change_handler::ClipboardChangeHandler;
pub use clipboard_device::ClipboardDevicePort;
pub use clock::ClockPort;
pub use history_repository::HistoryRepositoryPort;
pub use identity::IdentityPort;
pub use kv_store::{KeyValueStorePort, CLIPBOARD_DATA_KEY, SETTINGS_KEY};
pub use notification::NotificationPort;
pub use remote_records::RemoteRecordsPort;
pub use settings_repository::SettingsRepositoryPort;
