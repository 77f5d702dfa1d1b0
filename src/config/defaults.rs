//! Documented defaults for every recognized configuration path.

/// If true, files built for production are always served.
pub const FORCE_PRODUCTION_MODE: bool = false;

/// Dev-server files are served if one of these needles is present in the
/// request host.
pub const DEVELOPMENT_HOST_NEEDLES: [&str; 4] = [".test", ".local", "localhost", "127.0.0.1"];

/// Cookie or query-parameter name that forces production mode when present.
pub const PRODUCTION_HINT: &str = "vprod";

/// Origin of the vite dev server.
pub const DEVELOPMENT_URL: &str = "http://localhost:3000";

/// Directory holding built assets, relative to the web root.
pub const BUILD_OUT_DIRECTORY: &str = "build";

/// Path to the manifest file, relative to the project root.
pub const BUILD_MANIFEST: &str = "webroot/manifest.json";

/// Root directory for plugin-namespaced packages.
pub const BASE_DIRECTORY: &str = "plugins";

/// Named output region for stylesheet tags.
pub const VIEW_BLOCK_CSS: &str = "css";

/// Named output region for script tags.
pub const VIEW_BLOCK_SCRIPT: &str = "script";
