//! Filesystem locations for bundled assets.

/// Directory holding the per-level content documents (a1.toml .. b2.toml)
pub const CONTENT_DIR: &str = "content";

/// Directory served under /static
pub const STATIC_DIR: &str = "static";
