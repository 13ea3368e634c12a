// Adapters layer: concrete ServiceManager implementations for the host's
// service-management interfaces.

pub mod process;
pub mod systemctl;

pub use process::ProcessManager;
pub use systemctl::SystemctlManager;
