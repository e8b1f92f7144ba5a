//! Compile-time build information, printed by `speed_tapper --version`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Version line shown by the binary.
pub fn version_line() -> String {
    format!(
        "speed_tapper {} ({}, built {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_not_empty() {
        assert!(!BUILD_COMMIT.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn test_version_line_mentions_commit() {
        let line = version_line();
        assert!(line.starts_with("speed_tapper "));
        assert!(line.contains(BUILD_COMMIT));
    }
}
