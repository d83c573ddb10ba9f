//! Command: print version information.

/// Print the rulerunner version to stdout.
pub fn run() {
    let version = option_env!("RULERUNNER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    println!("rulerunner {version}");
}
