use crate::Message;
use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke},
    Color, Pixels, Point, Rectangle, Renderer, Size, Theme,
};
use sentimentcore::math::RateHelper;
use sentimentcore::ChartSeries;

const MARGIN_LEFT: f32 = 44.0;
const MARGIN_RIGHT: f32 = 12.0;
const MARGIN_TOP: f32 = 12.0;
const MARGIN_BOTTOM: f32 = 22.0;
const GRID_LINES: usize = 4;

/// Rolling per-second rates, one line per category. The y axis always
/// starts at zero; the x axis spans the buffered time window.
#[derive(Clone)]
pub struct SentimentChart {
    pub series: Vec<ChartSeries>,
}

fn series_color((r, g, b): (u8, u8, u8)) -> Color {
    Color::from_rgb8(r, g, b)
}

fn time_span(series: &[ChartSeries]) -> Option<(i64, i64)> {
    let mut stamps = series
        .iter()
        .flat_map(|entry| entry.points.iter())
        .map(|point| point.timestamp_ms);
    let first = stamps.next()?;
    Some(stamps.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts))))
}

fn label(frame: &mut Frame, content: String, position: Point, color: Color) {
    frame.fill_text(canvas::Text {
        content,
        position,
        color,
        size: Pixels(11.0),
        ..canvas::Text::default()
    });
}

impl canvas::Program<Message> for SentimentChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.05, 0.05, 0.05),
        );

        let plot = Rectangle {
            x: MARGIN_LEFT,
            y: MARGIN_TOP,
            width: (bounds.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (bounds.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        };
        let y_max = (RateHelper::peak(&self.series) * 1.1).max(1.0);
        let grid_color = Color::from_rgb(0.25, 0.25, 0.3);
        let label_color = Color::from_rgb(0.7, 0.7, 0.75);

        for step in 0..=GRID_LINES {
            let fraction = step as f32 / GRID_LINES as f32;
            let y = plot.y + plot.height - fraction * plot.height;
            let line = Path::line(Point::new(plot.x, y), Point::new(plot.x + plot.width, y));
            frame.stroke(&line, Stroke::default().with_color(grid_color).with_width(1.0));
            label(
                &mut frame,
                format!("{:.1}", y_max * fraction as f64),
                Point::new(4.0, y - 6.0),
                label_color,
            );
        }

        let Some((start_ms, end_ms)) = time_span(&self.series) else {
            return vec![frame.into_geometry()];
        };
        let span_ms = (end_ms - start_ms).max(1) as f32;

        label(
            &mut frame,
            format!("-{}s", (end_ms - start_ms) / 1000),
            Point::new(plot.x, plot.y + plot.height + 4.0),
            label_color,
        );
        label(
            &mut frame,
            "now".into(),
            Point::new(plot.x + plot.width - 22.0, plot.y + plot.height + 4.0),
            label_color,
        );

        for entry in &self.series {
            if entry.points.len() < 2 {
                continue;
            }
            let path = Path::new(|builder| {
                for (idx, point) in entry.points.iter().enumerate() {
                    let value = if point.value.is_finite() {
                        point.value.max(0.0)
                    } else {
                        0.0
                    };
                    let x = plot.x + (point.timestamp_ms - start_ms) as f32 / span_ms * plot.width;
                    let y = plot.y + plot.height - (value / y_max) as f32 * plot.height;
                    if idx == 0 {
                        builder.move_to(Point::new(x, y));
                    } else {
                        builder.line_to(Point::new(x, y));
                    }
                }
            });
            frame.stroke(
                &path,
                Stroke::default()
                    .with_width(2.0)
                    .with_color(series_color(entry.color)),
            );
        }

        for (idx, entry) in self.series.iter().enumerate() {
            let x = plot.x + 8.0 + idx as f32 * 90.0;
            let y = plot.y + 6.0;
            frame.fill_rectangle(
                Point::new(x, y + 3.0),
                Size::new(10.0, 10.0),
                series_color(entry.color),
            );
            label(
                &mut frame,
                entry.label.to_string(),
                Point::new(x + 14.0, y),
                Color::WHITE,
            );
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentimentcore::{Category, PlotPoint};

    fn series(category: Category, stamps: &[i64]) -> ChartSeries {
        ChartSeries {
            category,
            label: category.label(),
            color: category.color(),
            points: stamps
                .iter()
                .map(|&timestamp_ms| PlotPoint {
                    timestamp_ms,
                    value: 1.0,
                })
                .collect(),
        }
    }

    #[test]
    fn time_span_covers_every_series() {
        let all = vec![
            series(Category::Positive, &[2_000, 3_000]),
            series(Category::Negative, &[1_000, 4_000]),
        ];
        assert_eq!(time_span(&all), Some((1_000, 4_000)));
        assert_eq!(time_span(&[]), None);
    }
}
