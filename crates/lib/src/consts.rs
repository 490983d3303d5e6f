/// Application name used for platform data directories.
pub const APP_NAME: &str = "defstore";

/// File name of the per-tenant content definition document.
pub const DEFINITION_FILENAME: &str = "ContentDefinition.json";

/// Default container directory holding one sub-directory per tenant.
pub const DEFAULT_CONTAINER_NAME: &str = "Sites";

/// Overrides the application data root.
pub const APP_DATA_ENV: &str = "DEFSTORE_APP_DATA";

/// Overrides the container directory name.
pub const CONTAINER_ENV: &str = "DEFSTORE_CONTAINER";
