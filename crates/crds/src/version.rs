//! Build information recorded in every status

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commit the binary was built from (`GIT_SHA` at build time)
pub const GIT_SHA: &str = match option_env!("GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

/// Build timestamp (`BUILT_AT` at build time)
pub const BUILT_AT: &str = match option_env!("BUILT_AT") {
    Some(date) => date,
    None => "unknown",
};
