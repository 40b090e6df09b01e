//! The drawing target for a diagram.
//!
//! The renderer only talks to the [`Surface`] trait. Two implementations are provided:
//! [`CommandList`] records every call so a draw can be inspected, and [`SvgSurface`] builds an
//! SVG document.
use crate::{config::PlotRect, coords::Point, wind_barb::Primitive};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha, 255 is opaque.
    pub a: u8,
}

impl Color {
    /// An opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// A color with transparency.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// The color as `#rrggbb`, ignoring alpha.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewt_diagram::surface::Color;
    ///
    /// assert_eq!(Color::rgb(255, 0, 16).to_hex(), "#ff0010");
    /// ```
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a fraction.
    #[inline]
    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

/// How lines are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Line color.
    pub color: Color,
    /// Line width.
    pub width: f64,
    /// Dash and gap lengths, solid if `None`.
    pub dash: Option<(f64, f64)>,
}

impl Stroke {
    /// A solid line.
    #[inline]
    pub fn solid(color: Color, width: f64) -> Self {
        Stroke {
            color,
            width,
            dash: None,
        }
    }

    /// A dashed line.
    #[inline]
    pub fn dashed(color: Color, width: f64, dash: f64, gap: f64) -> Self {
        Stroke {
            color,
            width,
            dash: Some((dash, gap)),
        }
    }
}

/// Which point of the text is placed at the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum TextAnchor {
    /// The text starts at the anchor.
    #[strum(serialize = "start")]
    Start,
    /// The text is centered on the anchor.
    #[strum(serialize = "middle")]
    Middle,
    /// The text ends at the anchor.
    #[strum(serialize = "end")]
    End,
}

/// How text is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size.
    pub size: f64,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Clockwise rotation in degrees about the anchor.
    pub rotation: f64,
}

impl TextStyle {
    /// Unrotated text.
    #[inline]
    pub fn new(color: Color, size: f64, anchor: TextAnchor) -> Self {
        TextStyle {
            color,
            size,
            anchor,
            rotation: 0.0,
        }
    }

    /// Builder method for the rotation.
    #[inline]
    pub fn with_rotation(self, rotation: f64) -> Self {
        TextStyle { rotation, ..self }
    }
}

/// The layers of a diagram, in the order they are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[allow(missing_docs)]
pub enum Group {
    HeightAxis,
    Isobars,
    Isotherms,
    DryAdiabats,
    MoistAdiabats,
    MixingRatios,
    Border,
    Temperature,
    DewPoint,
    WindBarbs,
    Title,
    Legend,
}

/// Something a diagram can be drawn on.
pub trait Surface {
    /// Start a new frame, filled with `background`.
    fn clear(&mut self, background: Color);

    /// Everything drawn until the matching `end_group` belongs to `group`.
    fn begin_group(&mut self, group: Group);

    /// Close a group opened with `begin_group`.
    fn end_group(&mut self, group: Group);

    /// Clip drawing to a rectangle, or stop clipping with `None`.
    fn set_clip(&mut self, rect: Option<PlotRect>);

    /// A straight line.
    fn line(&mut self, from: Point, to: Point, stroke: &Stroke);

    /// Connected line segments.
    fn polyline(&mut self, points: &[Point], stroke: &Stroke);

    /// A filled polygon.
    fn polygon(&mut self, points: &[Point], fill: Color);

    /// An open circle.
    fn circle(&mut self, center: Point, radius: f64, stroke: &Stroke);

    /// A text label.
    fn text(&mut self, at: Point, text: &str, style: &TextStyle);

    /// Draw the primitives of a wind barb. Pennants are filled with the stroke color.
    fn primitives(&mut self, prims: &[Primitive], stroke: &Stroke) {
        for prim in prims {
            match *prim {
                Primitive::Segment { from, to } => self.line(from, to, stroke),
                Primitive::Triangle(ref pnts) => self.polygon(pnts, stroke.color),
                Primitive::Circle { center, radius } => self.circle(center, radius, stroke),
            }
        }
    }
}

/// A recorded call on a `CommandList`.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum DrawCommand {
    Clear(Color),
    BeginGroup(Group),
    EndGroup(Group),
    Clip(Option<PlotRect>),
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<Point>,
        fill: Color,
    },
    Circle {
        center: Point,
        radius: f64,
        stroke: Stroke,
    },
    Text {
        at: Point,
        text: String,
        style: TextStyle,
    },
}

/// A surface that remembers what was drawn on it.
///
/// Clearing the surface throws away everything recorded before, so after a draw it holds exactly
/// one frame.
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded since the last clear.
    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Has nothing been recorded?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The commands drawn inside `group`, not including the group markers.
    pub fn in_group(&self, group: Group) -> impl Iterator<Item = &DrawCommand> {
        let mut inside = false;
        self.commands.iter().filter(move |cmd| match cmd {
            DrawCommand::BeginGroup(g) if *g == group => {
                inside = true;
                false
            }
            DrawCommand::EndGroup(g) if *g == group => {
                inside = false;
                false
            }
            _ => inside,
        })
    }

    /// The vertices of every polyline drawn in `group`.
    pub fn polylines(&self, group: Group) -> impl Iterator<Item = &[Point]> {
        self.in_group(group).filter_map(|cmd| match cmd {
            DrawCommand::Polyline { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }

    /// The strings of every text command drawn in `group`.
    pub fn texts(&self, group: Group) -> impl Iterator<Item = &str> {
        self.in_group(group).filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for CommandList {
    fn clear(&mut self, background: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(background));
    }

    fn begin_group(&mut self, group: Group) {
        self.commands.push(DrawCommand::BeginGroup(group));
    }

    fn end_group(&mut self, group: Group) {
        self.commands.push(DrawCommand::EndGroup(group));
    }

    fn set_clip(&mut self, rect: Option<PlotRect>) {
        self.commands.push(DrawCommand::Clip(rect));
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn polyline(&mut self, points: &[Point], stroke: &Stroke) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            stroke: *stroke,
        });
    }

    fn polygon(&mut self, points: &[Point], fill: Color) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            fill,
        });
    }

    fn circle(&mut self, center: Point, radius: f64, stroke: &Stroke) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            stroke: *stroke,
        });
    }

    fn text(&mut self, at: Point, text: &str, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_owned(),
            style: *style,
        });
    }
}

/// A surface that writes an SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    defs: String,
    body: String,
    clip_count: usize,
    clip_open: bool,
}

impl SvgSurface {
    /// Create a surface of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        SvgSurface {
            width,
            height,
            defs: String::new(),
            body: String::new(),
            clip_count: 0,
            clip_open: false,
        }
    }

    /// The complete SVG document.
    pub fn to_svg(&self) -> String {
        let mut doc = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
             viewBox=\"0 0 {w} {h}\">\n",
            w = self.width,
            h = self.height
        );
        if !self.defs.is_empty() {
            doc.push_str("<defs>\n");
            doc.push_str(&self.defs);
            doc.push_str("</defs>\n");
        }
        doc.push_str(&self.body);
        if self.clip_open {
            doc.push_str("</g>\n");
        }
        doc.push_str("</svg>\n");
        doc
    }

    fn close_clip(&mut self) {
        if self.clip_open {
            self.body.push_str("</g>\n");
            self.clip_open = false;
        }
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(
        "stroke=\"{}\" stroke-width=\"{}\"",
        stroke.color.to_hex(),
        stroke.width
    );
    if stroke.color.a < 255 {
        attrs.push_str(&format!(" stroke-opacity=\"{:.3}\"", stroke.color.opacity()));
    }
    if let Some((dash, gap)) = stroke.dash {
        attrs.push_str(&format!(" stroke-dasharray=\"{} {}\"", dash, gap));
    }
    attrs
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl Surface for SvgSurface {
    fn clear(&mut self, background: Color) {
        self.defs.clear();
        self.body.clear();
        self.clip_count = 0;
        self.clip_open = false;
        self.body.push_str(&format!(
            "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
            self.width,
            self.height,
            background.to_hex()
        ));
    }

    fn begin_group(&mut self, group: Group) {
        self.body
            .push_str(&format!("<g class=\"{}\">\n", group.as_ref()));
    }

    fn end_group(&mut self, _group: Group) {
        self.close_clip();
        self.body.push_str("</g>\n");
    }

    fn set_clip(&mut self, rect: Option<PlotRect>) {
        self.close_clip();

        if let Some(rect) = rect {
            self.clip_count += 1;
            self.defs.push_str(&format!(
                "<clipPath id=\"clip{}\"><rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/></clipPath>\n",
                self.clip_count, rect.left, rect.top, rect.width, rect.height
            ));
            self.body
                .push_str(&format!("<g clip-path=\"url(#clip{})\">\n", self.clip_count));
            self.clip_open = true;
        }
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.body.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" {}/>\n",
            from.x,
            from.y,
            to.x,
            to.y,
            stroke_attrs(stroke)
        ));
    }

    fn polyline(&mut self, points: &[Point], stroke: &Stroke) {
        if points.len() < 2 {
            return;
        }
        self.body.push_str(&format!(
            "<polyline points=\"{}\" fill=\"none\" {}/>\n",
            points_attr(points),
            stroke_attrs(stroke)
        ));
    }

    fn polygon(&mut self, points: &[Point], fill: Color) {
        self.body.push_str(&format!(
            "<polygon points=\"{}\" fill=\"{}\"/>\n",
            points_attr(points),
            fill.to_hex()
        ));
    }

    fn circle(&mut self, center: Point, radius: f64, stroke: &Stroke) {
        self.body.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"none\" {}/>\n",
            center.x,
            center.y,
            radius,
            stroke_attrs(stroke)
        ));
    }

    fn text(&mut self, at: Point, text: &str, style: &TextStyle) {
        let rotate = if style.rotation != 0.0 {
            format!(
                " transform=\"rotate({:.1} {:.2} {:.2})\"",
                style.rotation, at.x, at.y
            )
        } else {
            String::new()
        };

        self.body.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"{}\"{}>{}</text>\n",
            at.x,
            at.y,
            style.size,
            style.color.to_hex(),
            style.anchor.as_ref(),
            rotate,
            escape(text)
        ));
    }
}
