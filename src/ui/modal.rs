use iced::widget::{center, container, mouse_area, opaque, stack};
use iced::{Border, Color, Element, Theme};

/// Lay `content` over `base` on a dimmed backdrop.
///
/// Clicking the backdrop emits `on_blur` when one is given; without it the
/// overlay swallows every click (used by the loading overlay).
pub fn modal<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Option<Message>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let backdrop = mouse_area(center(opaque(content)).style(|_theme| container::Style {
        background: Some(
            Color {
                a: 0.8,
                ..Color::BLACK
            }
            .into(),
        ),
        ..container::Style::default()
    }));

    let backdrop = match on_blur {
        Some(message) => backdrop.on_press(message),
        None => backdrop,
    };

    stack![base.into(), opaque(backdrop)].into()
}

/// Opaque rounded panel for dialog content
pub fn panel(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(palette.background.base.color.into()),
        text_color: Some(palette.background.base.text),
        border: Border {
            radius: 12.0.into(),
            width: 1.0,
            color: palette.background.strong.color,
        },
        ..container::Style::default()
    }
}
