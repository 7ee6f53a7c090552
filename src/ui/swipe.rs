use iced::mouse::{self, Cursor};
use iced::touch;
use iced::widget::canvas::{self, Program};
use iced::{Point, Rectangle, Renderer, Theme};

use crate::state::carousel::swipe_direction;

/// Invisible layer that turns horizontal drags and touch swipes into
/// carousel steps.
///
/// It never captures a press, so buttons underneath keep working; only a
/// release that completes a swipe is captured.
pub struct SwipeArea<Message> {
    pub on_swipe: fn(i32) -> Message,
}

impl<Message> Program<Message> for SwipeArea<Message> {
    type State = DragState;

    fn draw(
        &self,
        _state: &Self::State,
        _renderer: &Renderer,
        _theme: &Theme,
        _bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        vec![]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        match event {
            // Mouse button press inside the carousel - remember where the drag started
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_in(bounds) {
                    state.start = Some(position);
                }
            }

            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                let end = cursor.position_in(bounds).or_else(|| {
                    cursor
                        .position()
                        .map(|p| Point::new(p.x - bounds.x, p.y - bounds.y))
                });
                if let Some(message) = self.finish(state, end) {
                    return (canvas::event::Status::Captured, Some(message));
                }
            }

            canvas::Event::Touch(touch::Event::FingerPressed { position, .. }) => {
                if bounds.contains(position) {
                    state.start = Some(Point::new(position.x - bounds.x, position.y - bounds.y));
                }
            }

            canvas::Event::Touch(touch::Event::FingerLifted { position, .. }) => {
                let end = Some(Point::new(position.x - bounds.x, position.y - bounds.y));
                if let Some(message) = self.finish(state, end) {
                    return (canvas::event::Status::Captured, Some(message));
                }
            }

            canvas::Event::Touch(touch::Event::FingerLost { .. }) => {
                state.start = None;
            }

            _ => {}
        }

        (canvas::event::Status::Ignored, None)
    }
}

impl<Message> SwipeArea<Message> {
    fn finish(&self, state: &mut DragState, end: Option<Point>) -> Option<Message> {
        let start = state.start.take()?;
        let end = end?;
        swipe_direction((start.x, start.y), (end.x, end.y)).map(self.on_swipe)
    }
}

/// State for drag interactions
#[derive(Debug, Clone, Default)]
pub struct DragState {
    pub start: Option<Point>,
}
