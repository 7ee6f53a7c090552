use iced::widget::{button, column, container, horizontal_space, row, text, Column};
use iced::{Alignment, Border, Element, Length, Theme};

use crate::state::notify::{Level, Notification, Notifications};

/// Background and text colour for a notification level
fn level_style(level: Level) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| {
        let palette = theme.extended_palette();
        let pair = match level {
            Level::Info => palette.primary.weak,
            Level::Success => palette.success.weak,
            Level::Error => palette.danger.weak,
        };

        container::Style {
            background: Some(pair.color.into()),
            text_color: Some(pair.text),
            border: Border {
                radius: 6.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        }
    }
}

/// Dismissible messages, newest last
pub fn messages<'a, Message>(
    notifications: &'a Notifications,
    on_dismiss: fn(u64) -> Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let rows = notifications.messages().map(|note: &Notification| {
        container(
            row![
                text(note.text.as_str()),
                horizontal_space(),
                button(text("✕").size(12))
                    .style(button::text)
                    .on_press(on_dismiss(note.id)),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        )
        .padding(10)
        .width(Length::Fill)
        .style(level_style(note.level))
        .into()
    });

    Column::with_children(rows).spacing(6).into()
}

/// Toasts, stacked bottom-up
pub fn toasts<'a, Message: 'a>(notifications: &'a Notifications) -> Element<'a, Message> {
    let items = notifications.toasts().map(|note| {
        container(text(note.text.as_str()).size(14))
            .padding([8, 14])
            .style(level_style(note.level))
            .into()
    });

    column![Column::with_children(items).spacing(6).align_x(Alignment::End)]
        .width(Length::Fill)
        .align_x(Alignment::End)
        .into()
}
