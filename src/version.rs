// Build-time version from Cargo.toml

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Binary name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// `<name> <version>`, as printed by `--version`.
pub fn banner() -> String {
    format!("{} {}", NAME, VERSION)
}
