/// Popular categories bar chart
/// Horizontal bars scaled to the most downloaded category
use iced::widget::canvas::{self, Text};
use iced::{Color, Pixels, Point, Rectangle, Size};

/// Chart data: (category, downloads), already ranked
#[derive(Debug, Clone)]
pub struct CategoryChart {
    pub bars: Vec<(String, u64)>,
}

impl CategoryChart {
    /// Height needed to draw every bar
    pub fn height(&self) -> f32 {
        (self.bars.len() as f32 * ROW_HEIGHT).max(ROW_HEIGHT)
    }
}

const ROW_HEIGHT: f32 = 24.0;
const LABEL_WIDTH: f32 = 110.0;

impl<Message> canvas::Program<Message> for CategoryChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let palette = theme.palette();

        // Find the largest count for normalization
        let max_value = self.bars.iter().map(|(_, count)| *count).max().unwrap_or(0) as f32;

        if max_value < 1.0 {
            frame.fill_text(Text {
                content: "No downloads yet".to_string(),
                position: Point::new(0.0, 4.0),
                color: palette.text,
                size: Pixels(13.0),
                ..Text::default()
            });
            return vec![frame.into_geometry()];
        }

        let bar_space = (bounds.width - LABEL_WIDTH - 48.0).max(1.0);

        for (row, (name, count)) in self.bars.iter().enumerate() {
            let y = row as f32 * ROW_HEIGHT;
            let width = (*count as f32 / max_value) * bar_space;

            frame.fill_text(Text {
                content: name.clone(),
                position: Point::new(0.0, y + 4.0),
                color: palette.text,
                size: Pixels(13.0),
                ..Text::default()
            });

            frame.fill_rectangle(
                Point::new(LABEL_WIDTH, y + 4.0),
                Size::new(width.max(2.0), ROW_HEIGHT - 8.0),
                Color { a: 0.8, ..palette.primary },
            );

            frame.fill_text(Text {
                content: count.to_string(),
                position: Point::new(LABEL_WIDTH + width + 6.0, y + 4.0),
                color: palette.text,
                size: Pixels(12.0),
                ..Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}
