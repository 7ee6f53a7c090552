/// Widgets shared by the gallery and upload pages
///
/// - Wallpaper cards built from a typed view model (card.rs)
/// - Popular categories chart (chart.rs)
/// - Modal overlay (modal.rs)
/// - Message and toast stacks (notifications.rs)
/// - Carousel swipe layer (swipe.rs)

pub mod card;
pub mod chart;
pub mod modal;
pub mod notifications;
pub mod swipe;
