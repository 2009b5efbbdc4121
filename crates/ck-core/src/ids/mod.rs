//! Identifier newtypes shared across the domain.

mod id_macro;

mod device_id;
mod item_id;
mod user_id;

pub use device_id::DeviceId;
pub use item_id::ItemId;
pub use user_id::UserId;
