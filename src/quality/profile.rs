use super::definition::Quality;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityProfile {
    pub id: i32,

    pub name: String,

    pub cutoff: Quality,
}

/// Quality and proper flag of a file already held for an episode.
#[derive(Debug, Clone, Copy)]
pub struct HeldFile {
    pub quality: Quality,
    pub proper: bool,
}

impl QualityProfile {
    /// Decides whether a candidate release improves on the held file.
    ///
    /// Branch order is load-bearing: the cutoff check only guards the strict
    /// upgrade path. A proper repack at equal quality, and anything else not
    /// explicitly skipped, falls through to a grab.
    pub fn evaluate(
        &self,
        quality: Quality,
        proper: bool,
        current: Option<&HeldFile>,
    ) -> ReleaseDecision {
        let Some(held) = current else {
            return ReleaseDecision::Grab(GrabReason::MissingFile);
        };

        if held.quality > quality {
            return ReleaseDecision::Skip(SkipReason::HigherQualityHeld);
        }

        if held.quality == quality && held.proper == proper {
            return ReleaseDecision::Skip(SkipReason::AlreadyHeld);
        }

        if held.quality < quality && self.cutoff <= held.quality {
            return ReleaseDecision::Skip(SkipReason::CutoffReached);
        }

        ReleaseDecision::Grab(GrabReason::Upgrade)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDecision {
    Grab(GrabReason),

    Skip(SkipReason),
}

impl ReleaseDecision {
    #[must_use]
    pub const fn is_grab(&self) -> bool {
        matches!(self, Self::Grab(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabReason {
    MissingFile,
    Upgrade,
}

impl std::fmt::Display for GrabReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFile => write!(f, "no file held"),
            Self::Upgrade => write!(f, "improves on held file"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    HigherQualityHeld,
    AlreadyHeld,
    CutoffReached,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HigherQualityHeld => write!(f, "held file is higher quality"),
            Self::AlreadyHeld => write!(f, "exact release already held"),
            Self::CutoffReached => write!(f, "profile cutoff already reached"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(cutoff: Quality) -> QualityProfile {
        QualityProfile {
            id: 1,
            name: "Default".to_string(),
            cutoff,
        }
    }

    #[test]
    fn grab_when_no_file_held() {
        let decision = profile(Quality::Bluray1080p).evaluate(Quality::Hdtv, false, None);
        assert_eq!(decision, ReleaseDecision::Grab(GrabReason::MissingFile));
    }

    #[test]
    fn skip_when_held_quality_is_higher() {
        let held = HeldFile {
            quality: Quality::Bluray1080p,
            proper: false,
        };
        let decision = profile(Quality::Bluray1080p).evaluate(Quality::Webdl, true, Some(&held));
        assert_eq!(
            decision,
            ReleaseDecision::Skip(SkipReason::HigherQualityHeld)
        );
    }

    #[test]
    fn skip_exact_match() {
        let held = HeldFile {
            quality: Quality::Webdl,
            proper: false,
        };
        let decision = profile(Quality::Bluray1080p).evaluate(Quality::Webdl, false, Some(&held));
        assert_eq!(decision, ReleaseDecision::Skip(SkipReason::AlreadyHeld));
    }

    #[test]
    fn grab_proper_repack_at_equal_quality() {
        let held = HeldFile {
            quality: Quality::Webdl,
            proper: false,
        };
        let decision = profile(Quality::Webdl).evaluate(Quality::Webdl, true, Some(&held));
        assert_eq!(decision, ReleaseDecision::Grab(GrabReason::Upgrade));
    }

    #[test]
    fn skip_upgrade_once_cutoff_reached() {
        let held = HeldFile {
            quality: Quality::Webdl,
            proper: false,
        };
        let decision = profile(Quality::Webdl).evaluate(Quality::Bluray1080p, false, Some(&held));
        assert_eq!(decision, ReleaseDecision::Skip(SkipReason::CutoffReached));
    }

    #[test]
    fn grab_upgrade_below_cutoff() {
        let held = HeldFile {
            quality: Quality::Hdtv,
            proper: false,
        };
        let decision = profile(Quality::Bluray1080p).evaluate(Quality::Webdl, false, Some(&held));
        assert_eq!(decision, ReleaseDecision::Grab(GrabReason::Upgrade));
    }
}
