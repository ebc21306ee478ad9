/// Application name
pub const APP_NAME: &str = "Keel";

/// Application version
pub const APP_VERSION: &str = "0.1.0";

/// Root alias for the application base directory
pub const APP_ALIAS: &str = "@app";

/// Root alias for the runtime directory
pub const RUNTIME_ALIAS: &str = "@runtime";

/// Runtime directory name under the application base directory
pub const RUNTIME_DIR: &str = "runtime";

/// Alias names reserved for package-registry style references; they are
/// never resolved and cannot be registered
pub const IGNORED_ALIASES: &[&str] = &["@crates"];

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "app.json";

/// Reserved configuration section: component definitions
pub const COMPONENTS_KEY: &str = "components";

/// Reserved configuration section: child modules
pub const MODULES_KEY: &str = "modules";

/// Reserved configuration section: installable plugins
pub const PLUGINS_KEY: &str = "plugins";

/// Reserved configuration section: directory search paths
pub const SEARCH_PATHS_KEY: &str = "searchPaths";

/// Reserved configuration section: event handler declarations
pub const EVENTS_KEY: &str = "events";

/// Reserved configuration section: behavior declarations
pub const BEHAVIORS_KEY: &str = "behaviors";
