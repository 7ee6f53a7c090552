/// Browsing state of the gallery controller
///
/// Holds the active device partition and category, and hands out request
/// tokens so that a slow response to an old request can never overwrite the
/// result of a newer one.
use std::time::{Duration, Instant};
use url::Url;

use super::data::{capitalize, DeviceType};

/// Category value meaning "no filter"
pub const ALL_CATEGORIES: &str = "all";

/// Delay between a filter click and its fetch
pub const FILTER_DELAY: Duration = Duration::from_millis(500);

/// Statistics refresh period
pub const STATS_INTERVAL: Duration = Duration::from_secs(30);

/// Issued with a device load; carries the state it was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceTicket {
    pub device_token: u64,
    pub gallery_token: u64,
    pub device: DeviceType,
}

/// Issued with a filter load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryTicket {
    pub gallery_token: u64,
    pub device: DeviceType,
}

/// What part of a device response may still be applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Device switched again since: drop everything
    Stale,
    /// Device still current but a newer filter owns the gallery grid
    DeviceOnly,
    /// Apply everything
    Current,
}

#[derive(Debug, Clone)]
pub struct ViewState {
    device: DeviceType,
    category: String,
    device_token: u64,
    gallery_token: u64,
}

impl ViewState {
    pub fn new(device: DeviceType) -> Self {
        Self {
            device,
            category: ALL_CATEGORIES.to_string(),
            device_token: 0,
            gallery_token: 0,
        }
    }

    pub fn device(&self) -> DeviceType {
        self.device
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_all_categories(&self) -> bool {
        self.category == ALL_CATEGORIES
    }

    /// Switch partitions. Returns `None` (and changes nothing) if `device`
    /// is already active.
    pub fn switch_device(&mut self, device: DeviceType) -> Option<DeviceTicket> {
        if self.device == device {
            return None;
        }
        self.device = device;
        Some(self.begin_device_load())
    }

    /// Ticket for (re)loading everything for the current device
    pub fn begin_device_load(&mut self) -> DeviceTicket {
        self.device_token += 1;
        self.gallery_token += 1;
        DeviceTicket {
            device_token: self.device_token,
            gallery_token: self.gallery_token,
            device: self.device,
        }
    }

    /// Change the category filter and take a ticket for its fetch
    pub fn set_category(&mut self, category: &str) -> GalleryTicket {
        self.category = category.to_lowercase();
        self.gallery_token += 1;
        GalleryTicket {
            gallery_token: self.gallery_token,
            device: self.device,
        }
    }

    pub fn device_freshness(&self, ticket: &DeviceTicket) -> Freshness {
        if ticket.device_token != self.device_token || ticket.device != self.device {
            Freshness::Stale
        } else if ticket.gallery_token != self.gallery_token {
            Freshness::DeviceOnly
        } else {
            Freshness::Current
        }
    }

    pub fn is_gallery_current(&self, ticket: &GalleryTicket) -> bool {
        ticket.gallery_token == self.gallery_token && ticket.device == self.device
    }

    /// Whether a filter button for `category` should be highlighted
    pub fn is_active_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }

    /// Label of the filter badge
    pub fn filter_badge(&self) -> String {
        if self.is_all_categories() {
            "All categories".to_string()
        } else {
            format!("{} category", capitalize(&self.category))
        }
    }

    /// Human name of the current filter for toasts
    pub fn category_name(&self) -> String {
        if self.is_all_categories() {
            "All Categories".to_string()
        } else {
            capitalize(&self.category)
        }
    }

    /// Shareable location of the current view (`?device=` mirrored in)
    pub fn location(&self, base: &Url) -> Url {
        let mut url = base.clone();
        let kept: Vec<(String, String)> = base
            .query_pairs()
            .filter(|(key, _)| key != "device")
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        url.set_query(None);
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in &kept {
                query.append_pair(key, value);
            }
            query.append_pair("device", self.device.as_str());
        }
        url
    }
}

/// Backend reachability as observed from our own requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    #[default]
    Online,
    Offline,
}

impl Connectivity {
    /// Record the outcome of a request. Returns the new state when it changed.
    pub fn observe(&mut self, reachable: bool) -> Option<Connectivity> {
        let next = if reachable { Connectivity::Online } else { Connectivity::Offline };
        if next == *self {
            None
        } else {
            *self = next;
            Some(next)
        }
    }
}

/// Welcome banner: appears shortly after start, hides itself a few seconds later
#[derive(Debug, Clone, Copy)]
pub struct WelcomeBanner {
    started: Instant,
    dismissed: bool,
}

impl WelcomeBanner {
    pub const SHOW_AFTER: Duration = Duration::from_millis(1000);
    pub const HIDE_AFTER: Duration = Duration::from_millis(5000);

    pub fn new(now: Instant) -> Self {
        Self { started: now, dismissed: false }
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.started);
        !self.dismissed && elapsed >= Self::SHOW_AFTER && elapsed < Self::HIDE_AFTER
    }

    /// Still waiting to show or hide on its own
    pub fn is_pending(&self, now: Instant) -> bool {
        !self.dismissed && now.saturating_duration_since(self.started) < Self::HIDE_AFTER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_to_active_device_is_noop() {
        let mut view = ViewState::new(DeviceType::Mobile);
        assert_eq!(view.switch_device(DeviceType::Mobile), None);
        assert_eq!(view.device(), DeviceType::Mobile);
        assert_eq!(view.device_token, 0);
        assert_eq!(view.gallery_token, 0);
    }

    #[test]
    fn test_stale_device_response_is_dropped() {
        let mut view = ViewState::new(DeviceType::Mobile);
        let first = view.switch_device(DeviceType::Pc).unwrap();
        let second = view.switch_device(DeviceType::Mobile).unwrap();

        assert_eq!(view.device_freshness(&first), Freshness::Stale);
        assert_eq!(view.device_freshness(&second), Freshness::Current);
    }

    #[test]
    fn test_filter_after_device_switch_owns_gallery() {
        let mut view = ViewState::new(DeviceType::Mobile);
        let device = view.switch_device(DeviceType::Pc).unwrap();
        let filter = view.set_category("Nature");

        assert_eq!(view.device_freshness(&device), Freshness::DeviceOnly);
        assert!(view.is_gallery_current(&filter));
        assert_eq!(view.category(), "nature");
    }

    #[test]
    fn test_older_filter_is_stale() {
        let mut view = ViewState::new(DeviceType::Mobile);
        let old = view.set_category("cars");
        let new = view.set_category("space");

        assert!(!view.is_gallery_current(&old));
        assert!(view.is_gallery_current(&new));
    }

    #[test]
    fn test_labels() {
        let mut view = ViewState::new(DeviceType::Mobile);
        assert_eq!(view.filter_badge(), "All categories");
        assert_eq!(view.category_name(), "All Categories");

        view.set_category("nature");
        assert_eq!(view.filter_badge(), "Nature category");
        assert!(view.is_active_category("Nature"));
        assert!(!view.is_active_category("all"));
    }

    #[test]
    fn test_location_mirrors_device() {
        let base = Url::parse("http://gallery.local/?device=mobile&ref=x").unwrap();
        let mut view = ViewState::new(DeviceType::Mobile);
        view.switch_device(DeviceType::Pc);

        let location = view.location(&base);
        assert_eq!(location.as_str(), "http://gallery.local/?ref=x&device=pc");
    }

    #[test]
    fn test_connectivity_transitions() {
        let mut connectivity = Connectivity::default();
        assert_eq!(connectivity.observe(true), None);
        assert_eq!(connectivity.observe(false), Some(Connectivity::Offline));
        assert_eq!(connectivity.observe(false), None);
        assert_eq!(connectivity.observe(true), Some(Connectivity::Online));
    }

    #[test]
    fn test_welcome_banner_window() {
        let now = Instant::now();
        let mut banner = WelcomeBanner::new(now);

        assert!(!banner.is_visible(now));
        assert!(banner.is_visible(now + Duration::from_millis(1000)));
        assert!(!banner.is_visible(now + Duration::from_millis(5000)));

        banner.dismiss();
        assert!(!banner.is_visible(now + Duration::from_millis(2000)));
        assert!(!banner.is_pending(now));
    }
}
