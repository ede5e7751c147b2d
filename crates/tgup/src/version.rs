pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Stamped by the release build; plain `cargo build` leaves them unknown.
pub const BUILD_DATE: &str = match option_env!("TGUP_BUILD_DATE") {
    Some(v) => v,
    None => "unknown",
};
pub const COMMIT_HASH: &str = match option_env!("TGUP_COMMIT") {
    Some(v) => v,
    None => "unknown",
};

pub fn banner() -> String {
    format!("tgup version: {VERSION}\nBuild: {BUILD_DATE}\nCommit: {COMMIT_HASH}")
}
