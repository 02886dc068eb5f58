//! Build stamp written by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Audio backend compiled into this binary.
pub fn audio_backend() -> &'static str {
    if SPEAKER_OUTPUT {
        "speaker"
    } else {
        "silent"
    }
}

/// `dino-runner 0.1.0 (abc1234 2026-01-01, speaker)`; non-release profiles are named too.
pub fn version_line() -> String {
    let mut tags = format!("{} {}", BUILD_COMMIT, BUILD_DATE);
    if BUILD_PROFILE != "release" {
        tags.push_str(&format!(", {}", BUILD_PROFILE));
    }
    format!(
        "dino-runner {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        tags,
        audio_backend()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_is_short_hash_or_unknown() {
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn test_version_line_names_backend() {
        let line = version_line();
        assert!(line.starts_with("dino-runner "));
        assert!(line.contains(BUILD_COMMIT));
        assert!(line.ends_with(&format!("{})", audio_backend())));
    }

    #[test]
    fn test_backend_tracks_feature() {
        assert_eq!(SPEAKER_OUTPUT, cfg!(feature = "audio"));
    }
}
