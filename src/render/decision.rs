//! Environment choice for one render: dev server or built assets.

use crate::config::AssetResolutionConfig;

/// Decide whether development-server URLs should be emitted.
///
/// Pure function over request-derived signals:
/// - `force_production_mode` wins over everything (production),
/// - a present production hint (cookie or query parameter, checked by the
///   host framework) forces production,
/// - otherwise development iff the request host contains one of the
///   configured needles.
pub fn is_dev<S: AsRef<str>>(
    force_production_mode: bool,
    production_hint_present: bool,
    request_host: &str,
    development_host_needles: &[S],
) -> bool {
    if force_production_mode || production_hint_present {
        return false;
    }
    development_host_needles
        .iter()
        .any(|needle| request_host.contains(needle.as_ref()))
}

/// `is_dev` with the flag and needles taken from a configuration value. An
/// absent host is treated as an empty string.
pub fn decide(
    config: &AssetResolutionConfig,
    request_host: Option<&str>,
    production_hint_present: bool,
) -> bool {
    is_dev(
        config.force_production_mode(),
        production_hint_present,
        request_host.unwrap_or(""),
        &config.development_host_needles(),
    )
}
