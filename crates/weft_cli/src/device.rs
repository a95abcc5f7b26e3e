//! Device family tables: build directories and default build targets.
//!
//! Crossbar capacities are deliberately NOT tabulated here; the slot
//! capacity is always passed explicitly (`-m`) because it varies with image
//! configuration, not just device family.

/// Returns the per-device build directory under `top/`.
///
/// Several devices of the same family share one build directory.
pub fn device_build_dir(device: &str) -> Option<&'static str> {
    match device {
        "x300" | "x310" => Some("x300"),
        "e300" | "e310" => Some("e31x"),
        "e320" => Some("e320"),
        "n300" | "n310" | "n320" => Some("n3xx"),
        _ => None,
    }
}

/// Returns the default build target for a device when `-t` is not given.
pub fn default_target(device: &str) -> Option<&'static str> {
    match device {
        "x300" => Some("X300_HG"),
        "x310" => Some("X310_HG"),
        "e310" => Some("E310_SG3"),
        "e320" => Some("E320_1G"),
        "n300" => Some("N300_HG"),
        "n310" => Some("N310_HG"),
        "n320" => Some("N320_XG"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_members_share_build_dir() {
        assert_eq!(device_build_dir("x300"), Some("x300"));
        assert_eq!(device_build_dir("x310"), Some("x300"));
        assert_eq!(device_build_dir("n300"), Some("n3xx"));
        assert_eq!(device_build_dir("n320"), Some("n3xx"));
        assert_eq!(device_build_dir("e310"), Some("e31x"));
        assert_eq!(device_build_dir("e320"), Some("e320"));
    }

    #[test]
    fn unknown_device_has_no_build_dir() {
        assert_eq!(device_build_dir("z999"), None);
    }

    #[test]
    fn default_targets() {
        assert_eq!(default_target("x310"), Some("X310_HG"));
        assert_eq!(default_target("e320"), Some("E320_1G"));
        assert_eq!(default_target("n320"), Some("N320_XG"));
        assert_eq!(default_target("z999"), None);
    }
}
