//! `User-Agent` header sent with every backend request.

use std::sync::OnceLock;

const CLIENT_NAME: &str = "sensu-go-rust";

static USER_AGENT: OnceLock<String> = OnceLock::new();

/// Returns the `User-Agent` value, e.g.
/// `sensu-go-rust/0.3.0 (rust/1.92; linux/x86_64)`.
///
/// Built on first use and cached.
pub(crate) fn user_agent() -> &'static str {
    USER_AGENT.get_or_init(|| {
        format!(
            "{}/{} (rust/{}; {})",
            CLIENT_NAME,
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_RUST_VERSION"),
            platform(),
        )
    })
}

/// `<os>/<arch>`, with `macos` reported as `darwin`.
fn platform() -> String {
    let os = match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    };
    format!("{}/{}", os, std::env::consts::ARCH)
}
