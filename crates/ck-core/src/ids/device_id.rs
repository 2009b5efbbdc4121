use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Stable identifier of the device a clipboard item originated on.
///
/// Unlike item ids this survives restarts; it is derived from the host
/// identity by the platform layer and attached to uploaded records so other
/// devices can tell where an entry came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(String);

impl_id!(DeviceId);
