//! Draw a complete diagram.
//!
//! [`render`] is a pure function of a [`DrawRequest`]. It draws the whole frame on every call,
//! nothing is cached between draws. [`Diagram`] holds the state of an interactive diagram, the
//! view bounds and the last profile drawn, and answers hover queries against that state.
use crate::{
    config::{check_height_range, DiagramConfig, Layout, Palette, PlotRect, ViewBounds},
    coords::{CoordinateFrame, Point},
    curves::CurveFamily,
    error::Result,
    interpolation::interpolate_at_height,
    profile::{Level, Metadata, Profile},
    surface::{Color, Group, Stroke, Surface, TextAnchor, TextStyle},
    wind_barb,
};
use log::{debug, trace, warn};
use metfor::{Celsius, HectoPascal, Meters, Quantity};
use optional::Optioned;

/// Isobars drawn with a solid line and labeled.
pub const MAJOR_ISOBARS: [f64; 11] = [
    1000.0, 925.0, 850.0, 700.0, 500.0, 400.0, 300.0, 250.0, 200.0, 150.0, 100.0,
];

/// Intermediate isobars drawn with a dashed line.
pub const MINOR_ISOBARS: [f64; 11] = [
    975.0, 950.0, 900.0, 875.0, 800.0, 750.0, 650.0, 600.0, 550.0, 450.0, 350.0,
];

const TICK_LENGTH: f64 = 5.0;
const MAX_HEIGHT_TICKS: f64 = 50.0;
const LABEL_SIZE: f64 = 10.0;
const TITLE_SIZE: f64 = 16.0;
const SUBTITLE_SIZE: f64 = 11.0;
const LEGEND_SPACING: f64 = 90.0;
const LEGEND_SWATCH: f64 = 20.0;

/// Spacing of the height axis ticks for a visible height span, both in meters.
pub fn height_tick_interval(span: f64) -> f64 {
    if span <= 2_000.0 {
        200.0
    } else if span <= 5_000.0 {
        500.0
    } else if span <= 10_000.0 {
        1_000.0
    } else if span <= 20_000.0 {
        2_000.0
    } else {
        5_000.0
    }
}

/// Minimum height difference in meters between consecutive wind barbs for a visible span.
pub fn wind_barb_interval(span: f64) -> f64 {
    if span < 5_000.0 {
        250.0
    } else {
        500.0
    }
}

/// Everything needed for one draw.
#[derive(Debug, Clone, Copy)]
pub struct DrawRequest<'a> {
    /// The sounding to plot, if any.
    pub profile: Option<&'a Profile>,
    /// Station and time information for the title.
    pub metadata: Option<&'a Metadata>,
    /// Axis extents.
    pub view: ViewBounds,
    /// Surface size and margins.
    pub layout: Layout,
    /// Colors.
    pub palette: Palette,
}

impl<'a> DrawRequest<'a> {
    /// A request for an empty diagram.
    pub fn new(config: &DiagramConfig) -> Self {
        DrawRequest {
            profile: None,
            metadata: None,
            view: config.view,
            layout: config.layout,
            palette: config.palette,
        }
    }

    /// Builder method for the profile.
    pub fn with_profile(self, profile: &'a Profile) -> Self {
        DrawRequest {
            profile: Some(profile),
            ..self
        }
    }

    /// Builder method for the metadata.
    pub fn with_metadata(self, metadata: &'a Metadata) -> Self {
        DrawRequest {
            metadata: Some(metadata),
            ..self
        }
    }
}

/// What ended up on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Height axis ticks drawn.
    pub height_ticks: usize,
    /// Isobars drawn, major and minor.
    pub isobars: usize,
    /// Reference curve polylines drawn, counting every disconnected piece.
    pub reference_lines: usize,
    /// Vertices in the temperature polyline.
    pub temperature_vertices: usize,
    /// Vertices in the dew point polyline.
    pub dew_point_vertices: usize,
    /// Wind barbs drawn.
    pub wind_barbs: usize,
}

/// Draw the diagram described by `req` on `surface`.
///
/// # Examples
///
/// ```rust
/// use skewt_diagram::{doctest, render, CommandList, DiagramConfig, DrawRequest};
///
/// let profile = doctest::make_test_profile();
/// let config = DiagramConfig::default();
/// let req = DrawRequest::new(&config).with_profile(&profile);
///
/// let mut surface = CommandList::new();
/// let summary = render(&req, &mut surface);
///
/// assert_eq!(summary.temperature_vertices, 4);
/// assert_eq!(summary.dew_point_vertices, 3);
/// ```
pub fn render<S: Surface>(req: &DrawRequest, surface: &mut S) -> RenderSummary {
    let frame = CoordinateFrame::new(req.view, req.layout.plot_rect(), req.profile);
    render_in_frame(req, &frame, surface)
}

fn render_in_frame<S: Surface>(
    req: &DrawRequest,
    frame: &CoordinateFrame,
    surface: &mut S,
) -> RenderSummary {
    let profile = req.profile.filter(|prof| !prof.is_empty());

    debug!(
        "drawing diagram: {} levels, heights {} to {} m",
        profile.map(Profile::len).unwrap_or(0),
        req.view.h_min,
        req.view.h_max
    );

    let mut summary = RenderSummary::default();

    surface.clear(req.palette.background);

    trace!("drawing height axis");
    summary.height_ticks = draw_height_axis(frame, &req.palette, surface);

    trace!("drawing isobars");
    summary.isobars = draw_isobars(frame, &req.palette, surface);

    for &(family, group) in &[
        (CurveFamily::Isotherm, Group::Isotherms),
        (CurveFamily::DryAdiabat, Group::DryAdiabats),
        (CurveFamily::MoistAdiabat, Group::MoistAdiabats),
        (CurveFamily::MixingRatio, Group::MixingRatios),
    ] {
        trace!("drawing {}", family);
        summary.reference_lines += draw_curve_family(frame, family, group, &req.palette, surface);
    }

    trace!("drawing border");
    draw_border(frame.rect(), &req.palette, surface);

    if let Some(prof) = profile {
        trace!("drawing profile");
        let (temperature, dew_point) = profile_lines(frame, prof);
        summary.temperature_vertices = temperature.len();
        summary.dew_point_vertices = dew_point.len();

        let rect = *frame.rect();
        draw_profile_line(
            &temperature,
            Group::Temperature,
            req.palette.temperature,
            rect,
            surface,
        );
        draw_profile_line(
            &dew_point,
            Group::DewPoint,
            req.palette.dew_point,
            rect,
            surface,
        );

        trace!("drawing wind barbs");
        summary.wind_barbs = draw_wind_barbs(frame, &req.layout, prof, &req.palette, surface);
    } else {
        trace!("no profile, skipping profile and wind barbs");
    }

    trace!("drawing title and legend");
    draw_title(req.metadata, &req.layout, &req.palette, surface);
    draw_legend(frame.rect(), &req.palette, surface);

    debug!("finished drawing diagram: {:?}", summary);

    summary
}

fn label_style(palette: &Palette, anchor: TextAnchor) -> TextStyle {
    TextStyle::new(palette.foreground, LABEL_SIZE, anchor)
}

fn draw_height_axis<S: Surface>(
    frame: &CoordinateFrame,
    palette: &Palette,
    surface: &mut S,
) -> usize {
    let view = frame.view();
    let left = frame.rect().left;
    let span = view.height_span();
    let mut interval = height_tick_interval(span);
    if span / interval > MAX_HEIGHT_TICKS {
        // Far outside the atmosphere, thin the ticks to a multiple of the widest interval.
        interval *= (span / interval / MAX_HEIGHT_TICKS).ceil();
    }
    let stroke = Stroke::solid(palette.foreground, 1.0);
    let style = label_style(palette, TextAnchor::End);

    let first = (view.h_min / interval).ceil() as i64;
    let last = (view.h_max / interval).floor() as i64;

    surface.begin_group(Group::HeightAxis);
    for k in first..=last {
        let h = k as f64 * interval;
        let y = frame.height_to_y(Meters(h));

        surface.line(Point::new(left - TICK_LENGTH, y), Point::new(left, y), &stroke);
        surface.text(
            Point::new(left - TICK_LENGTH - 3.0, y + LABEL_SIZE / 2.5),
            &format!("{} m", h),
            &style,
        );
    }
    surface.end_group(Group::HeightAxis);

    (last - first + 1).max(0) as usize
}

fn draw_isobars<S: Surface>(frame: &CoordinateFrame, palette: &Palette, surface: &mut S) -> usize {
    let rect = *frame.rect();
    let major = Stroke::solid(palette.grid, 1.0);
    let minor = Stroke::dashed(palette.grid, 0.5, 4.0, 4.0);
    let style = label_style(palette, TextAnchor::Start);

    let mut count = 0;

    surface.begin_group(Group::Isobars);
    let isobars = MAJOR_ISOBARS
        .iter()
        .map(|&p| (p, true))
        .chain(MINOR_ISOBARS.iter().map(|&p| (p, false)));

    for (p, is_major) in isobars {
        let p = HectoPascal(p);
        if !frame.pressure_in_view(p) {
            continue;
        }

        let y = frame.pressure_to_y(p);
        if !rect.contains_y(y) {
            continue;
        }

        let stroke = if is_major { &major } else { &minor };
        surface.line(Point::new(rect.left, y), Point::new(rect.right(), y), stroke);
        if is_major {
            surface.text(
                Point::new(rect.left + 3.0, y - 2.0),
                &format!("{}", p.unpack()),
                &style,
            );
        }
        count += 1;
    }
    surface.end_group(Group::Isobars);

    count
}

fn draw_curve_family<S: Surface>(
    frame: &CoordinateFrame,
    family: CurveFamily,
    group: Group,
    palette: &Palette,
    surface: &mut S,
) -> usize {
    let (color, width) = match family {
        CurveFamily::Isotherm => (palette.isotherm, 0.5),
        CurveFamily::DryAdiabat => (palette.dry_adiabat, 0.75),
        CurveFamily::MoistAdiabat => (palette.moist_adiabat, 0.75),
        CurveFamily::MixingRatio => (palette.mixing_ratio, 0.75),
    };
    let stroke = if family == CurveFamily::MixingRatio {
        Stroke::dashed(color, width, 6.0, 3.0)
    } else {
        Stroke::solid(color, width)
    };
    let major = Stroke::solid(palette.isotherm_major, 1.0);

    let mut count = 0;

    surface.begin_group(group);
    surface.set_clip(Some(*frame.rect()));
    for curve in family.curves(frame) {
        let stroke = if curve.is_major() { &major } else { &stroke };

        for segment in curve.segments() {
            surface.polyline(&segment, stroke);
            count += 1;
        }

        if let Some(label) = curve.label() {
            let style = TextStyle::new(stroke.color, LABEL_SIZE, TextAnchor::Start)
                .with_rotation(label.rotation);
            surface.text(label.at, &label.text, &style);
        }
    }
    surface.set_clip(None);
    surface.end_group(group);

    count
}

fn draw_border<S: Surface>(rect: &PlotRect, palette: &Palette, surface: &mut S) {
    let corners = [
        Point::new(rect.left, rect.top),
        Point::new(rect.right(), rect.top),
        Point::new(rect.right(), rect.bottom()),
        Point::new(rect.left, rect.bottom()),
        Point::new(rect.left, rect.top),
    ];

    surface.begin_group(Group::Border);
    surface.polyline(&corners, &Stroke::solid(palette.foreground, 1.0));
    surface.end_group(Group::Border);
}

/// The height used to place a level, its own height or the height of its pressure.
fn level_height(frame: &CoordinateFrame, lvl: &Level, p: HectoPascal) -> Meters {
    lvl.height
        .into_option()
        .unwrap_or_else(|| frame.pressure_to_height(p))
}

/// Vertices of the temperature and dew point lines that are inside the view.
///
/// A level that is missing the pressure or the value is skipped, and the levels on either side
/// are connected directly.
fn profile_lines(frame: &CoordinateFrame, prof: &Profile) -> (Vec<Point>, Vec<Point>) {
    let mut temperature = Vec::with_capacity(prof.len());
    let mut dew_point = Vec::with_capacity(prof.len());

    for lvl in prof.levels() {
        let p = match lvl.pressure.into_option() {
            Some(p) if frame.pressure_in_view(p) => p,
            _ => continue,
        };

        if !frame.height_in_view(level_height(frame, &lvl, p)) {
            continue;
        }

        let y = frame.pressure_to_y(p);
        let vertex = |val: Optioned<Celsius>, line: &mut Vec<Point>| {
            if let Some(t) = val.into_option() {
                line.push(Point::new(frame.temp_to_x(t, p), y));
            }
        };

        vertex(lvl.temperature, &mut temperature);
        vertex(lvl.dew_point, &mut dew_point);
    }

    (temperature, dew_point)
}

fn draw_profile_line<S: Surface>(
    points: &[Point],
    group: Group,
    color: Color,
    rect: PlotRect,
    surface: &mut S,
) {
    surface.begin_group(group);
    if points.len() > 1 {
        surface.set_clip(Some(rect));
        surface.polyline(points, &Stroke::solid(color, 2.0));
        surface.set_clip(None);
    }
    surface.end_group(group);
}

fn draw_wind_barbs<S: Surface>(
    frame: &CoordinateFrame,
    layout: &Layout,
    prof: &Profile,
    palette: &Palette,
    surface: &mut S,
) -> usize {
    let interval = wind_barb_interval(frame.view().height_span());
    let column = frame.rect().right() + layout.margins.right / 2.0;
    let stroke = Stroke::solid(palette.wind_barb, 1.0);

    let mut winds: Vec<(f64, f64, _)> = prof
        .levels()
        .filter_map(|lvl| {
            let (dir, spd) = lvl.wind()?;
            let h = match lvl.height.into_option() {
                Some(h) => h,
                None => frame.pressure_to_height(lvl.pressure.into_option()?),
            };
            if frame.height_in_view(h) {
                Some((h.unpack(), dir, spd))
            } else {
                None
            }
        })
        .collect();
    winds.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut last_height: Option<f64> = None;
    let mut count = 0;

    surface.begin_group(Group::WindBarbs);
    for (h, dir, spd) in winds {
        if let Some(last) = last_height {
            if h - last < interval {
                continue;
            }
        }
        last_height = Some(h);

        let anchor = Point::new(column, frame.height_to_y(Meters(h)));
        surface.primitives(&wind_barb::encode(anchor, dir, spd), &stroke);
        count += 1;
    }
    surface.end_group(Group::WindBarbs);

    count
}

fn draw_title<S: Surface>(
    metadata: Option<&Metadata>,
    layout: &Layout,
    palette: &Palette,
    surface: &mut S,
) {
    let center = layout.width / 2.0;
    let top = layout.margins.top;

    let title = metadata
        .map(Metadata::title)
        .unwrap_or_else(|| Metadata::new().title());

    surface.begin_group(Group::Title);
    surface.text(
        Point::new(center, top * 0.45),
        &title,
        &TextStyle::new(palette.foreground, TITLE_SIZE, TextAnchor::Middle),
    );
    if let Some(subtitle) = metadata.and_then(Metadata::subtitle) {
        surface.text(
            Point::new(center, top * 0.8),
            &subtitle,
            &TextStyle::new(palette.foreground, SUBTITLE_SIZE, TextAnchor::Middle),
        );
    }
    surface.end_group(Group::Title);
}

fn draw_legend<S: Surface>(rect: &PlotRect, palette: &Palette, surface: &mut S) {
    let entries = [
        ("Temperature", palette.temperature),
        ("Dew point", palette.dew_point),
        ("Isotherm", palette.isotherm_major),
        ("Dry adiabat", palette.dry_adiabat),
        ("Moist adiabat", palette.moist_adiabat),
        ("Mixing ratio", palette.mixing_ratio),
    ];

    let y = rect.bottom() + 30.0;
    let style = label_style(palette, TextAnchor::Start);

    surface.begin_group(Group::Legend);
    for (i, &(name, color)) in entries.iter().enumerate() {
        let x = rect.left + i as f64 * LEGEND_SPACING;
        surface.line(
            Point::new(x, y),
            Point::new(x + LEGEND_SWATCH, y),
            &Stroke::solid(color, 2.0),
        );
        surface.text(Point::new(x + LEGEND_SWATCH + 4.0, y + 3.0), name, &style);
    }
    surface.end_group(Group::Legend);
}

/// An interactive diagram.
///
/// The diagram owns the active view bounds and a copy of the last profile drawn. Zooming and
/// drawing replace that state, hover queries only read it.
#[derive(Debug, Clone)]
pub struct Diagram {
    config: DiagramConfig,
    profile: Option<Profile>,
    metadata: Option<Metadata>,
    frame: CoordinateFrame,
}

impl Default for Diagram {
    fn default() -> Self {
        let config = DiagramConfig::default();
        Diagram {
            frame: CoordinateFrame::new(config.view, config.layout.plot_rect(), None),
            config,
            profile: None,
            metadata: None,
        }
    }
}

impl Diagram {
    /// Create a diagram, rejecting degenerate axes or layouts.
    pub fn new(config: DiagramConfig) -> Result<Self> {
        config.validate()?;

        Ok(Diagram {
            frame: CoordinateFrame::new(config.view, config.layout.plot_rect(), None),
            config,
            profile: None,
            metadata: None,
        })
    }

    /// The active view bounds.
    #[inline]
    pub fn view(&self) -> &ViewBounds {
        self.frame.view()
    }

    /// The configuration the diagram was created with, with the current view.
    pub fn config(&self) -> DiagramConfig {
        DiagramConfig {
            view: *self.frame.view(),
            ..self.config
        }
    }

    /// The most recently drawn profile.
    #[inline]
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// The metadata of the most recently drawn profile.
    #[inline]
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// The projection in use.
    #[inline]
    pub fn frame(&self) -> &CoordinateFrame {
        &self.frame
    }

    /// Zoom to a height range. Requires `min < max`, both finite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use metfor::Meters;
    /// use skewt_diagram::Diagram;
    ///
    /// let mut diagram = Diagram::default();
    /// assert!(diagram.set_height_range(Meters(500.0), Meters(4500.0)).is_ok());
    /// assert!(diagram.set_height_range(Meters(4500.0), Meters(500.0)).is_err());
    ///
    /// // A rejected zoom leaves the view alone.
    /// assert_eq!(diagram.view().h_min, 500.0);
    /// assert_eq!(diagram.view().h_max, 4500.0);
    /// ```
    pub fn set_height_range(&mut self, min: Meters, max: Meters) -> Result<()> {
        if let Err(err) = check_height_range(min.unpack(), max.unpack()) {
            warn!("rejecting zoom: {}", err);
            return Err(err);
        }

        self.frame.set_height_range(min, max);
        Ok(())
    }

    /// Replace the profile and metadata, then draw.
    pub fn draw<S: Surface>(
        &mut self,
        profile: &Profile,
        metadata: Option<&Metadata>,
        surface: &mut S,
    ) -> RenderSummary {
        self.profile = Some(profile.clone());
        self.metadata = metadata.cloned();
        self.frame = CoordinateFrame::new(
            *self.frame.view(),
            self.config.layout.plot_rect(),
            self.profile.as_ref(),
        );

        self.redraw(surface)
    }

    /// Draw again with the current state, after a zoom for example.
    pub fn redraw<S: Surface>(&self, surface: &mut S) -> RenderSummary {
        let req = DrawRequest {
            profile: self.profile.as_ref(),
            metadata: self.metadata.as_ref(),
            view: *self.frame.view(),
            layout: self.config.layout,
            palette: self.config.palette,
        };

        render_in_frame(&req, &self.frame, surface)
    }

    /// The profile interpolated to a height, `None` before a profile has been drawn.
    pub fn level_at_height(&self, h: Meters) -> Option<Level> {
        interpolate_at_height(self.profile.as_ref()?, h)
    }

    /// The profile interpolated to the height at a vertical position on the surface.
    pub fn level_at_y(&self, y: f64) -> Option<Level> {
        self.level_at_height(self.frame.y_to_height(y))
    }

    /// The pressure at a vertical position on the surface.
    pub fn pressure_at_y(&self, y: f64) -> HectoPascal {
        self.frame.height_to_pressure(self.frame.y_to_height(y))
    }

    /// The temperature at a position on the surface, undoing the skew.
    pub fn temperature_at(&self, x: f64, y: f64) -> Celsius {
        self.frame.x_to_temp(x, self.pressure_at_y(y))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        surface::{CommandList, DrawCommand},
        test_data::*,
    };

    fn config() -> DiagramConfig {
        DiagramConfig::default()
    }

    #[test]
    fn test_intervals() {
        assert_eq!(height_tick_interval(1_000.0), 200.0);
        assert_eq!(height_tick_interval(2_000.0), 200.0);
        assert_eq!(height_tick_interval(4_000.0), 500.0);
        assert_eq!(height_tick_interval(16_000.0), 2_000.0);
        assert_eq!(height_tick_interval(30_000.0), 5_000.0);

        assert_eq!(wind_barb_interval(4_000.0), 250.0);
        assert_eq!(wind_barb_interval(5_000.0), 500.0);
    }

    #[test]
    fn test_empty_profile_draws_frame() {
        let config = config();
        let empty = Profile::new();
        let mut surface = CommandList::new();

        let summary = render(&DrawRequest::new(&config).with_profile(&empty), &mut surface);

        assert!(summary.height_ticks > 0);
        assert!(summary.isobars > 0);
        assert!(summary.reference_lines > 0);
        assert_eq!(summary.temperature_vertices, 0);
        assert_eq!(summary.wind_barbs, 0);

        assert!(matches!(surface.commands()[0], DrawCommand::Clear(_)));
        assert_eq!(surface.polylines(Group::Border).count(), 1);
        assert_eq!(surface.in_group(Group::Temperature).count(), 0);
        assert_eq!(surface.in_group(Group::WindBarbs).count(), 0);
        assert_eq!(
            surface.texts(Group::Title).collect::<Vec<_>>(),
            vec!["Sounding"]
        );
    }

    #[test]
    fn test_phase_order() {
        let config = config();
        let prof = three_level_profile();
        let mut surface = CommandList::new();
        render(&DrawRequest::new(&config).with_profile(&prof), &mut surface);

        let groups: Vec<Group> = surface
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::BeginGroup(g) => Some(*g),
                _ => None,
            })
            .collect();

        assert_eq!(
            groups,
            vec![
                Group::HeightAxis,
                Group::Isobars,
                Group::Isotherms,
                Group::DryAdiabats,
                Group::MoistAdiabats,
                Group::MixingRatios,
                Group::Border,
                Group::Temperature,
                Group::DewPoint,
                Group::WindBarbs,
                Group::Title,
                Group::Legend,
            ]
        );
    }

    #[test]
    fn test_height_ticks() {
        let view = ViewBounds::default().with_height_range(500.0, 4500.0).unwrap();
        let frame = CoordinateFrame::new(view, Layout::default().plot_rect(), None);
        let mut surface = CommandList::new();

        // 500 m spacing, 500 through 4500.
        assert_eq!(draw_height_axis(&frame, &Palette::default(), &mut surface), 9);
        assert_eq!(surface.texts(Group::HeightAxis).next(), Some("500 m"));
    }

    #[test]
    fn test_height_ticks_are_bounded() {
        let view = ViewBounds::default()
            .with_height_range(-1.0e18, 1.0e18)
            .unwrap();
        let frame = CoordinateFrame::new(view, Layout::default().plot_rect(), None);
        let mut surface = CommandList::new();

        let ticks = draw_height_axis(&frame, &Palette::default(), &mut surface);
        assert!(ticks > 0);
        assert!(ticks as f64 <= MAX_HEIGHT_TICKS + 1.0);
        assert_eq!(surface.texts(Group::HeightAxis).count(), ticks);

        // A full troposphere view keeps its regular spacing.
        let view = ViewBounds::default().with_height_range(0.0, 16_000.0).unwrap();
        let frame = CoordinateFrame::new(view, Layout::default().plot_rect(), None);
        let mut surface = CommandList::new();
        assert_eq!(draw_height_axis(&frame, &Palette::default(), &mut surface), 9);
    }

    #[test]
    fn test_isobars_follow_profile() {
        let prof = three_level_profile();
        let view = ViewBounds::default().with_height_range(0.0, 3000.0).unwrap();
        let frame = CoordinateFrame::new(view, Layout::default().plot_rect(), Some(&prof));
        let mut surface = CommandList::new();

        draw_isobars(&frame, &Palette::default(), &mut surface);

        let y_925 = surface
            .in_group(Group::Isobars)
            .zip(surface.in_group(Group::Isobars).skip(1))
            .find_map(|(line, label)| match (line, label) {
                (DrawCommand::Line { from, .. }, DrawCommand::Text { text, .. }) if text == "925" => {
                    Some(from.y)
                }
                _ => None,
            })
            .unwrap();

        assert!(approx_equal(y_925, frame.height_to_y(Meters(750.0)), 1.0e-9));
    }

    #[test]
    fn test_zoom_excludes_vertices() {
        let nan = std::f64::NAN;
        let prof = Profile::from_levels(vec![
            Level::new(1000.0, 100.0, 20.0, 10.0, 180.0, 5.0),
            Level::new(950.0, 550.0, 17.0, 9.0, 190.0, 6.0),
            Level::new(850.0, 1500.0, 10.0, 4.0, 225.0, 10.0),
            Level::new(700.0, 3000.0, 2.0, nan, 270.0, 15.0),
            Level::new(600.0, 4200.0, -6.0, -20.0, 270.0, 20.0),
            Level::new(500.0, 5600.0, -15.0, -30.0, 280.0, 25.0),
            Level::new(300.0, 9200.0, -40.0, -55.0, 290.0, 40.0),
        ]);
        let original = prof.clone();

        let mut diagram = Diagram::new(config()).unwrap();
        diagram
            .set_height_range(Meters(500.0), Meters(4500.0))
            .unwrap();

        let mut surface = CommandList::new();
        let summary = diagram.draw(&prof, None, &mut surface);

        assert_eq!(summary.temperature_vertices, 4);
        assert_eq!(summary.dew_point_vertices, 3);

        // Missing values are NaN inside, compare what is present.
        for (a, b) in prof.levels().zip(original.levels()) {
            assert_eq!(a.height.into_option(), b.height.into_option());
            assert_eq!(a.temperature.into_option(), b.temperature.into_option());
            assert_eq!(a.dew_point.into_option(), b.dew_point.into_option());
        }
        assert_eq!(prof.len(), original.len());

        let rect = Layout::default().plot_rect();
        let top = diagram.frame().height_to_y(Meters(4500.0));
        let bottom = diagram.frame().height_to_y(Meters(500.0));
        for line in surface
            .polylines(Group::Temperature)
            .chain(surface.polylines(Group::DewPoint))
        {
            for pnt in line {
                assert!(pnt.y >= top && pnt.y <= bottom);
                assert!(rect.contains_y(pnt.y));
            }
        }
    }

    #[test]
    fn test_wind_barb_decimation() {
        let levels: Vec<Level> = (0..40)
            .map(|i| {
                let h = f64::from(i) * 100.0;
                Level::new(1000.0 - h / 10.0, h, 15.0, 5.0, 270.0, 10.0)
            })
            .collect();
        let prof = Profile::from_levels(levels);

        let view = ViewBounds::default().with_height_range(0.0, 4000.0).unwrap();
        let config = DiagramConfig { view, ..config() };
        let mut surface = CommandList::new();
        let summary = render(&DrawRequest::new(&config).with_profile(&prof), &mut surface);

        // Every 300 m from 0 to 3900 m with a 250 m minimum spacing.
        assert_eq!(summary.wind_barbs, 14);

        let column = config.layout.plot_rect().right() + config.layout.margins.right / 2.0;
        let staffs = surface
            .in_group(Group::WindBarbs)
            .filter(|cmd| match cmd {
                DrawCommand::Line { from, .. } => from.x == column,
                _ => false,
            })
            .count();
        assert_eq!(staffs, 14);
    }

    #[test]
    fn test_rejected_zoom() {
        let mut diagram = Diagram::default();
        assert!(diagram.set_height_range(Meters(100.0), Meters(100.0)).is_err());
        assert!(diagram
            .set_height_range(Meters(std::f64::NAN), Meters(100.0))
            .is_err());
        assert_eq!(*diagram.view(), ViewBounds::default());
    }

    #[test]
    fn test_hover_queries() {
        let mut diagram = Diagram::default();
        assert!(diagram.level_at_height(Meters(1000.0)).is_none());

        let prof = three_level_profile();
        diagram.draw(&prof, None, &mut CommandList::new());

        let y = diagram.frame().height_to_y(Meters(2250.0));
        let lvl = diagram.level_at_y(y).unwrap();
        assert!(approx_equal(lvl.temperature.unwrap().unpack(), 6.0, 1.0e-6));
        assert!(approx_equal(diagram.pressure_at_y(y).unpack(), 775.0, 1.0e-6));

        let p = HectoPascal(775.0);
        let x = diagram.frame().temp_to_x(Celsius(6.0), p);
        assert!(approx_equal(diagram.temperature_at(x, y).unpack(), 6.0, 1.0e-6));

        // Queries don't change anything.
        assert_eq!(diagram.profile(), Some(&prof));
    }

    #[test]
    fn test_redraw_after_zoom() {
        let prof = three_level_profile();
        let mut diagram = Diagram::default();
        let mut surface = CommandList::new();

        let full = diagram.draw(&prof, None, &mut surface);
        assert_eq!(full.temperature_vertices, 3);

        diagram
            .set_height_range(Meters(1000.0), Meters(2000.0))
            .unwrap();
        let zoomed = diagram.redraw(&mut surface);
        assert_eq!(zoomed.temperature_vertices, 1);
        assert_eq!(surface.polylines(Group::Temperature).count(), 0);
    }
}
