//! Local device identity.

use ck_core::device::Device;
use ck_core::ids::DeviceId;

/// Identify the local device from the host name.
///
/// The hostname doubles as the stable device id; when it cannot be resolved,
/// an OS-prefixed id derived from the given timestamp is used instead, the
/// way a first-run registration would mint one.
pub fn local_device(now_ms: i64) -> Device {
    let platform = std::env::consts::OS;
    let hostname = gethostname::gethostname();
    let name = hostname.to_string_lossy().trim().to_string();

    let id = if name.is_empty() {
        DeviceId::from_string(format!("{platform}-{now_ms}"))
    } else {
        DeviceId::from_string(name.clone())
    };

    let display_name = if name.is_empty() {
        format!("{platform} device")
    } else {
        name
    };

    Device::new(id, display_name, platform)
}
