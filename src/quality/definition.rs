use serde::{Deserialize, Serialize};

/// Release quality tier, ordered worst to best.
///
/// The derived `Ord` is the upgrade order. `storage_id` is the stable i32
/// encoding persisted in `episode_files.quality` and
/// `quality_profiles.cutoff_quality_id`; the gap at 3 is inherited from the
/// quality table this core stays wire-compatible with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quality {
    Sdtv,
    Dvd,
    Hdtv,
    Webdl,
    Bluray720p,
    Bluray1080p,
}

impl Quality {
    #[must_use]
    pub const fn storage_id(&self) -> i32 {
        match self {
            Self::Sdtv => 1,
            Self::Dvd => 2,
            Self::Hdtv => 4,
            Self::Webdl => 5,
            Self::Bluray720p => 6,
            Self::Bluray1080p => 7,
        }
    }

    #[must_use]
    pub const fn from_storage_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Self::Sdtv),
            2 => Some(Self::Dvd),
            4 => Some(Self::Hdtv),
            5 => Some(Self::Webdl),
            6 => Some(Self::Bluray720p),
            7 => Some(Self::Bluray1080p),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sdtv => "SDTV",
            Self::Dvd => "DVD",
            Self::Hdtv => "HDTV",
            Self::Webdl => "WEB-DL",
            Self::Bluray720p => "BluRay 720p",
            Self::Bluray1080p => "BluRay 1080p",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_ordering() {
        assert!(Quality::Bluray1080p > Quality::Webdl);
        assert!(Quality::Webdl > Quality::Hdtv);
        assert!(Quality::Hdtv > Quality::Dvd);
        assert!(Quality::Dvd > Quality::Sdtv);
    }

    #[test]
    fn storage_id_lookup() {
        assert_eq!(Quality::from_storage_id(4), Some(Quality::Hdtv));
        assert_eq!(Quality::from_storage_id(7), Some(Quality::Bluray1080p));
        assert_eq!(Quality::from_storage_id(3), None);
        assert_eq!(Quality::from_storage_id(99), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(Quality::Webdl.to_string(), "WEB-DL");
        assert_eq!(Quality::Bluray1080p.to_string(), "BluRay 1080p");
    }
}
