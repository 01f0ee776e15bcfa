//! The 2D drawing-surface contract.
//!
//! The crate draws through this trait and nothing else; a host binds it to a
//! real canvas context (the method set mirrors the standard 2D canvas API:
//! paths, arcs, linear gradients with color stops, fill/stroke styles, shadow
//! blur, and region clearing). [`RecordingSurface`] is the bundled
//! implementation: it captures the command stream for tests and headless
//! runs.

use serde::{Deserialize, Serialize};

use crate::geometry::point::Point;
use crate::render::color::Rgba;

/// One stop of a linear gradient.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient line, `0.0..=1.0`.
    pub offset: f64,
    /// Color at this stop.
    pub color: Rgba,
}

/// A linear gradient between two points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    /// Gradient line start.
    pub start: Point,
    /// Gradient line end.
    pub end: Point,
    /// Color stops in offset order.
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// A two-stop gradient from `from` to `to` along `start..end`.
    #[must_use]
    pub fn between(start: Point, end: Point, from: Rgba, to: Rgba) -> Self {
        Self {
            start,
            end,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: from,
                },
                GradientStop {
                    offset: 1.0,
                    color: to,
                },
            ],
        }
    }
}

/// Line cap style for stroked paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCap {
    /// Flat end exactly at the endpoint.
    #[default]
    Butt,
    /// Semicircular end.
    Round,
    /// Square end extending past the endpoint.
    Square,
}

/// A 2D drawing surface.
///
/// Styling is stateful, as in canvas contexts: `set_*` calls configure the
/// pen, `fill`/`stroke` apply it to the current path.
pub trait Surface {
    /// Starts a new path, discarding the current one.
    fn begin_path(&mut self);
    /// Closes the current path.
    fn close_path(&mut self);
    /// Moves the pen without drawing.
    fn move_to(&mut self, point: Point);
    /// Adds a straight segment from the pen to `point`.
    fn line_to(&mut self, point: Point);
    /// Adds a circular arc centered at `center` from `start_angle` to
    /// `end_angle` (radians).
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64);
    /// Sets a solid fill color.
    fn set_fill_color(&mut self, color: Rgba);
    /// Sets a linear-gradient fill.
    fn set_fill_gradient(&mut self, gradient: &LinearGradient);
    /// Sets the stroke color.
    fn set_stroke_color(&mut self, color: Rgba);
    /// Sets the stroke width.
    fn set_line_width(&mut self, width: f64);
    /// Sets the stroke cap style.
    fn set_line_cap(&mut self, cap: LineCap);
    /// Configures a glow: shadow blur radius and color.
    fn set_shadow(&mut self, blur: f64, color: Rgba);
    /// Removes any configured glow.
    fn clear_shadow(&mut self);
    /// Fills the current path with the configured fill style.
    fn fill(&mut self);
    /// Strokes the current path with the configured stroke style.
    fn stroke(&mut self);
    /// Clears the rectangle at `origin` with the given extent.
    fn clear_rect(&mut self, origin: Point, width: f64, height: f64);
}

// =============================================================================
// RECORDING SURFACE
// =============================================================================

/// One recorded drawing command.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// `begin_path` was called.
    BeginPath,
    /// `close_path` was called.
    ClosePath,
    /// Pen moved to the point.
    MoveTo(Point),
    /// Segment added to the point.
    LineTo(Point),
    /// Arc added: center, radius, start angle, end angle.
    Arc(Point, f64, f64, f64),
    /// Solid fill color set.
    FillColor(Rgba),
    /// Gradient fill set.
    FillGradient(LinearGradient),
    /// Stroke color set.
    StrokeColor(Rgba),
    /// Stroke width set.
    LineWidth(f64),
    /// Stroke cap set.
    LineCapStyle(LineCap),
    /// Glow configured: blur and color.
    Shadow(f64, Rgba),
    /// Glow removed.
    ClearShadow,
    /// Current path filled.
    Fill,
    /// Current path stroked.
    Stroke,
    /// Rectangle cleared: origin, width, height.
    ClearRect(Point, f64, f64),
}

/// A [`Surface`] that records every command it receives.
///
/// # Examples
///
/// ```rust
/// use meshlight::geometry::Point;
/// use meshlight::render::{DrawCommand, RecordingSurface, Surface};
///
/// let mut surface = RecordingSurface::new();
/// surface.begin_path();
/// surface.move_to(Point::new(1.0, 2.0));
/// assert_eq!(surface.commands().len(), 2);
/// assert_eq!(surface.commands()[0], DrawCommand::BeginPath);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Creates an empty recording surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands recorded so far, in call order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drops all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Counts recorded commands matching `predicate`.
    pub fn count_matching(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn move_to(&mut self, point: Point) {
        self.commands.push(DrawCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.commands.push(DrawCommand::LineTo(point));
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        self.commands
            .push(DrawCommand::Arc(center, radius, start_angle, end_angle));
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::FillColor(color));
    }

    fn set_fill_gradient(&mut self, gradient: &LinearGradient) {
        self.commands
            .push(DrawCommand::FillGradient(gradient.clone()));
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::StrokeColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.commands.push(DrawCommand::LineCapStyle(cap));
    }

    fn set_shadow(&mut self, blur: f64, color: Rgba) {
        self.commands.push(DrawCommand::Shadow(blur, color));
    }

    fn clear_shadow(&mut self) {
        self.commands.push(DrawCommand::ClearShadow);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn clear_rect(&mut self, origin: Point, width: f64, height: f64) {
        self.commands
            .push(DrawCommand::ClearRect(origin, width, height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_call_order() {
        let mut surface = RecordingSurface::new();
        surface.begin_path();
        surface.arc(Point::ORIGIN, 5.0, 0.0, std::f64::consts::TAU);
        surface.fill();
        surface.close_path();

        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::BeginPath,
                DrawCommand::Arc(Point::ORIGIN, 5.0, 0.0, std::f64::consts::TAU),
                DrawCommand::Fill,
                DrawCommand::ClosePath,
            ]
        );
    }

    #[test]
    fn gradient_between_has_two_stops() {
        let g = LinearGradient::between(
            Point::ORIGIN,
            Point::new(10.0, 0.0),
            Rgba::BLACK,
            Rgba::opaque(255, 255, 255),
        );
        assert_eq!(g.stops.len(), 2);
        assert_eq!(g.stops[0].offset, 0.0);
        assert_eq!(g.stops[1].offset, 1.0);
    }

    #[test]
    fn count_matching_filters_commands() {
        let mut surface = RecordingSurface::new();
        surface.fill();
        surface.stroke();
        surface.fill();
        assert_eq!(
            surface.count_matching(|c| matches!(c, DrawCommand::Fill)),
            2
        );
    }
}
