/// Download gating
///
/// A download walks `Idle -> Confirming -> Tracking -> Downloading -> Idle`.
/// While confirming, the proceed action is enabled only while the follow
/// acknowledgement is checked. Tracking is best effort: whatever the tracking
/// call returns, the gate moves on to downloading.
use std::time::{Duration, Instant};

use super::data::{Wallpaper, WallpaperId};

/// How long the "Downloading ..." notice stays up
pub const NOTICE_DURATION: Duration = Duration::from_millis(3000);

/// What a download needs to know about its wallpaper
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadTarget {
    pub id: WallpaperId,
    pub filename: String,
    pub title: String,
}

impl From<&Wallpaper> for DownloadTarget {
    fn from(wallpaper: &Wallpaper) -> Self {
        Self {
            id: wallpaper.id.clone(),
            filename: wallpaper.filename.clone(),
            title: wallpaper.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DownloadGate {
    #[default]
    Idle,
    /// Confirmation overlay open
    Confirming { target: DownloadTarget, acknowledged: bool },
    /// Waiting for the tracking endpoint
    Tracking { target: DownloadTarget },
    /// Fetching the file; `tracked` records whether tracking succeeded
    Downloading { target: DownloadTarget, tracked: bool },
}

impl DownloadGate {
    /// Open the confirmation overlay for `target`.
    ///
    /// Ignored while a tracked download is already in flight.
    pub fn request(&mut self, target: DownloadTarget) -> bool {
        match self {
            DownloadGate::Idle | DownloadGate::Confirming { .. } => {
                *self = DownloadGate::Confirming { target, acknowledged: false };
                true
            }
            _ => false,
        }
    }

    pub fn is_confirming(&self) -> bool {
        matches!(self, DownloadGate::Confirming { .. })
    }

    /// Target of the open overlay, if any
    pub fn pending(&self) -> Option<&DownloadTarget> {
        match self {
            DownloadGate::Confirming { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Check or uncheck the acknowledgement box
    pub fn set_acknowledged(&mut self, checked: bool) {
        if let DownloadGate::Confirming { acknowledged, .. } = self {
            *acknowledged = checked;
        }
    }

    /// Proceed is enabled only while confirming with the box checked
    pub fn can_proceed(&self) -> bool {
        matches!(self, DownloadGate::Confirming { acknowledged: true, .. })
    }

    /// Close the overlay and start tracking. Returns the target to track.
    pub fn proceed(&mut self) -> Option<DownloadTarget> {
        if !self.can_proceed() {
            return None;
        }
        match std::mem::take(self) {
            DownloadGate::Confirming { target, .. } => {
                *self = DownloadGate::Tracking { target: target.clone() };
                Some(target)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// Close the overlay without downloading
    pub fn cancel(&mut self) {
        if self.is_confirming() {
            *self = DownloadGate::Idle;
        }
    }

    /// Tracking finished (either way). Returns the target to fetch.
    pub fn tracking_finished(&mut self, tracked: bool) -> Option<DownloadTarget> {
        match std::mem::take(self) {
            DownloadGate::Tracking { target } => {
                *self = DownloadGate::Downloading { target: target.clone(), tracked };
                Some(target)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// File fetch finished; back to idle. Returns the target and whether
    /// tracking had succeeded.
    pub fn download_finished(&mut self) -> Option<(DownloadTarget, bool)> {
        match std::mem::take(self) {
            DownloadGate::Downloading { target, tracked } => Some((target, tracked)),
            other => {
                *self = other;
                None
            }
        }
    }
}

/// "Downloading <title>" notice with a filling bar
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadNotice {
    pub title: String,
    started: Instant,
}

impl DownloadNotice {
    pub fn new(title: String, now: Instant) -> Self {
        Self { title, started: now }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) < NOTICE_DURATION
    }

    /// Bar fill in percent; the bar fills during the first 10% of the notice
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started).as_secs_f32();
        let fill_time = NOTICE_DURATION.as_secs_f32() / 10.0;
        (elapsed / fill_time * 100.0).min(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> DownloadTarget {
        DownloadTarget {
            id: WallpaperId::Text("w1".into()),
            filename: "w1.png".into(),
            title: "Nebula".into(),
        }
    }

    #[test]
    fn test_proceed_requires_acknowledgement() {
        let mut gate = DownloadGate::default();
        assert!(gate.request(target()));
        assert!(!gate.can_proceed());
        assert_eq!(gate.proceed(), None);

        gate.set_acknowledged(true);
        assert!(gate.can_proceed());

        gate.set_acknowledged(false);
        assert!(!gate.can_proceed());
        assert!(gate.is_confirming());
    }

    #[test]
    fn test_full_successful_cycle() {
        let mut gate = DownloadGate::default();
        gate.request(target());
        gate.set_acknowledged(true);

        assert_eq!(gate.proceed(), Some(target()));
        assert_eq!(gate, DownloadGate::Tracking { target: target() });

        assert_eq!(gate.tracking_finished(true), Some(target()));
        assert_eq!(gate.download_finished(), Some((target(), true)));
        assert_eq!(gate, DownloadGate::Idle);
    }

    #[test]
    fn test_tracking_failure_still_downloads() {
        let mut gate = DownloadGate::default();
        gate.request(target());
        gate.set_acknowledged(true);
        gate.proceed();

        assert_eq!(gate.tracking_finished(false), Some(target()));
        assert_eq!(gate.download_finished(), Some((target(), false)));
    }

    #[test]
    fn test_cancel_and_busy_requests() {
        let mut gate = DownloadGate::default();
        gate.request(target());
        gate.cancel();
        assert_eq!(gate, DownloadGate::Idle);

        gate.request(target());
        gate.set_acknowledged(true);
        gate.proceed();
        // a second click while tracking is ignored
        assert!(!gate.request(target()));
        gate.cancel();
        assert!(matches!(gate, DownloadGate::Tracking { .. }));
    }

    #[test]
    fn test_out_of_order_events_are_ignored() {
        let mut gate = DownloadGate::default();
        assert_eq!(gate.tracking_finished(true), None);
        assert_eq!(gate.download_finished(), None);
        assert_eq!(gate, DownloadGate::Idle);
    }

    #[test]
    fn test_notice_lifetime() {
        let now = Instant::now();
        let notice = DownloadNotice::new("Nebula".into(), now);

        assert!(notice.is_visible(now + Duration::from_millis(2999)));
        assert!(!notice.is_visible(now + NOTICE_DURATION));
        assert_eq!(notice.progress(now), 0.0);
        assert_eq!(notice.progress(now + Duration::from_secs(1)), 100.0);
    }
}
