//! CJK-capable font discovery.
//!
//! Resolution runs once at startup; the chosen family name is handed to the
//! chart renderer.

use font_kit::source::SystemSource;
use tracing::{debug, info, warn};

/// Text a family must be able to render to be accepted.
pub const CJK_SAMPLE: &str = "中文字体测试";

pub const FALLBACK_FAMILY: &str = "sans-serif";

pub const PREFERRED_FAMILIES: [&str; 7] = [
    "Microsoft YaHei",
    "PingFang SC",
    "Noto Sans CJK SC",
    "WenQuanYi Zen Hei",
    "SimHei",
    "SimSun",
    "Arial Unicode MS",
];

/// Installed font families and their glyph coverage.
pub trait FontCatalog {
    fn families(&self) -> Vec<String>;
    fn can_display(&self, family: &str, sample: &str) -> bool;
}

/// Catalog backed by the operating system's font source.
pub struct SystemFonts {
    source: SystemSource,
}

impl SystemFonts {
    pub fn new() -> Self {
        Self {
            source: SystemSource::new(),
        }
    }
}

impl Default for SystemFonts {
    fn default() -> Self {
        Self::new()
    }
}

impl FontCatalog for SystemFonts {
    fn families(&self) -> Vec<String> {
        match self.source.all_families() {
            Ok(families) => families,
            Err(err) => {
                warn!("Failed to enumerate system fonts: {:?}", err);
                Vec::new()
            }
        }
    }

    fn can_display(&self, family: &str, sample: &str) -> bool {
        let Ok(handle) = self.source.select_family_by_name(family) else {
            return false;
        };
        handle.fonts().iter().any(|font_handle| match font_handle.load() {
            Ok(font) => sample.chars().all(|c| font.glyph_for_char(c).is_some()),
            Err(err) => {
                debug!("Could not load a face of {}: {:?}", family, err);
                false
            }
        })
    }
}

/// Pick the family used for chart text.
///
/// Preferred families are tried in order (exact name, then case-insensitive
/// substring), then any installed family covering [`CJK_SAMPLE`], then
/// [`FALLBACK_FAMILY`].
pub fn resolve_cjk_family(catalog: &dyn FontCatalog) -> String {
    let available = catalog.families();

    for preferred in PREFERRED_FAMILIES {
        if let Some(family) = find_matched_family(preferred, &available) {
            if catalog.can_display(&family, CJK_SAMPLE) {
                info!("Using chart font family {}", family);
                return family;
            }
        }
    }

    for family in &available {
        if catalog.can_display(family, CJK_SAMPLE) {
            info!("Using chart font family {}", family);
            return family.clone();
        }
    }

    warn!("No CJK-capable font found, falling back to {}", FALLBACK_FAMILY);
    FALLBACK_FAMILY.to_string()
}

fn find_matched_family(preferred: &str, available: &[String]) -> Option<String> {
    if let Some(exact) = available.iter().find(|f| f.as_str() == preferred) {
        return Some(exact.clone());
    }
    let needle = preferred.to_lowercase();
    available
        .iter()
        .find(|f| f.to_lowercase().contains(&needle))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeCatalog {
        families: Vec<&'static str>,
        cjk: Vec<&'static str>,
    }

    impl FontCatalog for FakeCatalog {
        fn families(&self) -> Vec<String> {
            self.families.iter().map(|f| f.to_string()).collect()
        }

        fn can_display(&self, family: &str, _sample: &str) -> bool {
            self.cjk.contains(&family)
        }
    }

    #[test]
    fn test_preferred_family_wins() {
        let catalog = FakeCatalog {
            families: vec!["DejaVu Sans", "Droid Sans Fallback", "Noto Sans CJK SC"],
            cjk: vec!["Droid Sans Fallback", "Noto Sans CJK SC"],
        };
        assert_eq!(resolve_cjk_family(&catalog), "Noto Sans CJK SC");
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let catalog = FakeCatalog {
            families: vec!["wenquanyi zen hei sharp"],
            cjk: vec!["wenquanyi zen hei sharp"],
        };
        assert_eq!(resolve_cjk_family(&catalog), "wenquanyi zen hei sharp");
    }

    #[test]
    fn test_preferred_without_coverage_is_skipped() {
        let catalog = FakeCatalog {
            families: vec!["SimSun", "Droid Sans Fallback"],
            cjk: vec!["Droid Sans Fallback"],
        };
        assert_eq!(resolve_cjk_family(&catalog), "Droid Sans Fallback");
    }

    #[test]
    fn test_fallback_when_nothing_covers_sample() {
        let catalog = FakeCatalog {
            families: vec!["DejaVu Sans"],
            cjk: vec![],
        };
        assert_eq!(resolve_cjk_family(&catalog), FALLBACK_FAMILY);
    }
}
