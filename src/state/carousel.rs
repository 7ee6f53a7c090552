/// Featured-wallpaper carousel
///
/// The slide track is laid out as `[last, S0, S1, ..., Sn-1, first]`: one
/// boundary clone at each end so that wrapping from the last slide to the
/// first looks like continued motion. The index counts real slides from 0;
/// the track position of slide `i` is `i + 1`.
use std::time::Duration;

use super::data::Wallpaper;

/// How many wallpapers from a fresh result feed the carousel
pub const CAROUSEL_SIZE: usize = 5;

/// Auto-advance period
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_secs(5);

/// Minimum horizontal travel (and maximum vertical drift) of a swipe, in pixels
pub const SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Default)]
pub struct Carousel {
    slides: Vec<Wallpaper>,
    current: i32,
}

impl Carousel {
    /// Replace the content and rewind to the first slide
    pub fn replace(&mut self, slides: Vec<Wallpaper>) {
        self.slides = slides;
        self.current = 0;
    }

    /// Number of real slides (clones excluded)
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn index(&self) -> i32 {
        self.current
    }

    /// Track length including both boundary clones
    fn track_len(&self) -> i32 {
        self.slides.len() as i32 + 2
    }

    /// The slide track with its boundary clones
    pub fn track(&self) -> Vec<&Wallpaper> {
        match (self.slides.first(), self.slides.last()) {
            (Some(first), Some(last)) => std::iter::once(last)
                .chain(self.slides.iter())
                .chain(std::iter::once(first))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Horizontal offset of the track, in percent of one slide width
    pub fn offset_percent(&self) -> i32 {
        -(self.current + 1) * 100
    }

    /// Step by `direction` (+1 / -1), wrapping at both boundaries.
    ///
    /// Reaching the first clone position wraps to 0; going below 0 wraps to
    /// the last real slide. Does nothing while the carousel is empty.
    pub fn step(&mut self, direction: i32) {
        if self.slides.is_empty() {
            return;
        }

        let total = self.track_len();
        self.current += direction;

        if self.current >= total - 2 {
            self.current = 0;
        } else if self.current < 0 {
            self.current = total - 3;
        }
    }

    /// Slide currently in view
    pub fn visible(&self) -> Option<&Wallpaper> {
        let position = -self.offset_percent() / 100;
        self.track().get(position as usize).copied()
    }
}

/// Classify a drag or touch gesture.
///
/// Returns `Some(1)` for a leftward swipe (next slide), `Some(-1)` for a
/// rightward swipe, `None` when the gesture is too short or too vertical.
pub fn swipe_direction(start: (f32, f32), end: (f32, f32)) -> Option<i32> {
    let diff_x = start.0 - end.0;
    let diff_y = (start.1 - end.1).abs();

    if diff_x.abs() > SWIPE_THRESHOLD && diff_y < SWIPE_THRESHOLD {
        Some(if diff_x > 0.0 { 1 } else { -1 })
    } else {
        None
    }
}
