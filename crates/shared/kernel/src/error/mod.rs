mod capability;
mod discovery;
mod persistence;
mod settings;

pub use capability::{CapabilityError, CapabilityErrorExt};
pub use discovery::{DiscoveryError, DiscoveryErrorExt};
pub use persistence::{PersistenceError, PersistenceErrorExt};
pub use settings::{SettingsError, SettingsErrorExt};
