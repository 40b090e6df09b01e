use metfor::Meters;
use skewt_diagram::{
    interpolate_at_height, render, CommandList, Diagram, DiagramConfig, DrawCommand, DrawRequest,
    Group, Metadata, Point, Profile, SvgSurface,
};

use super::*;

const TOL: f64 = 1.0e-6;

fn assert_profile_unchanged(prof: &Profile, copy: &Profile) {
    assert_eq!(prof.len(), copy.len());
    for (a, b) in prof.levels().zip(copy.levels()) {
        assert_eq!(a.pressure.into_option(), b.pressure.into_option());
        assert_eq!(a.height.into_option(), b.height.into_option());
        assert_eq!(a.temperature.into_option(), b.temperature.into_option());
        assert_eq!(a.dew_point.into_option(), b.dew_point.into_option());
        assert_eq!(a.wind_direction.into_option(), b.wind_direction.into_option());
        assert_eq!(a.wind_speed.into_option(), b.wind_speed.into_option());
    }
}

fn profile_points<'a>(surface: &'a CommandList) -> impl Iterator<Item = &'a Point> {
    surface
        .polylines(Group::Temperature)
        .chain(surface.polylines(Group::DewPoint))
        .flat_map(|line| line.iter())
}

pub fn test_full_frame(prof: &Profile, md: &Metadata) {
    let config = DiagramConfig::default();
    let rect = config.layout.plot_rect();
    let req = DrawRequest::new(&config).with_profile(prof).with_metadata(md);

    let mut surface = CommandList::new();
    let summary = render(&req, &mut surface);
    println!("{:#?}", summary);

    assert!(summary.height_ticks > 0);
    assert!(summary.isobars > 0);
    assert!(summary.reference_lines > 0);
    assert!(summary.temperature_vertices > 1);
    assert!(summary.temperature_vertices <= prof.len());
    assert!(summary.dew_point_vertices <= prof.len());
    assert!(summary.wind_barbs > 0);

    for pnt in profile_points(&surface) {
        assert!(pnt.y >= rect.top - TOL && pnt.y <= rect.bottom() + TOL);
    }

    for cmd in surface.in_group(Group::Isobars) {
        if let DrawCommand::Line { from, to, .. } = cmd {
            assert!(rect.contains_y(from.y));
            assert_eq!(from.x, rect.left);
            assert_eq!(to.x, rect.right());
        }
    }

    let title = md.title();
    assert_eq!(surface.texts(Group::Title).next(), Some(title.as_str()));
}

pub fn test_zoom(prof: &Profile) {
    let copy = prof.clone();

    let mut diagram = Diagram::default();
    diagram
        .set_height_range(Meters(500.0), Meters(4500.0))
        .unwrap();

    let mut surface = CommandList::new();
    let summary = diagram.draw(prof, None, &mut surface);

    let frame = diagram.frame();
    let top = frame.height_to_y(Meters(4500.0));
    let bottom = frame.height_to_y(Meters(500.0));

    let mut count = 0;
    for pnt in profile_points(&surface) {
        assert!(pnt.y >= top - TOL && pnt.y <= bottom + TOL);
        count += 1;
    }
    if summary.temperature_vertices > 1 {
        assert!(count >= summary.temperature_vertices);
    }

    // Only the levels in the height range survive.
    let in_range = prof
        .levels()
        .filter(|lvl| lvl.pressure.is_some() && lvl.temperature.is_some())
        .filter(|lvl| {
            let h = lvl
                .height
                .into_option()
                .unwrap_or_else(|| frame.pressure_to_height(lvl.pressure.unwrap()));
            h >= Meters(500.0) && h <= Meters(4500.0)
        })
        .count();
    assert_eq!(summary.temperature_vertices, in_range);

    assert_profile_unchanged(prof, &copy);
    assert_profile_unchanged(diagram.profile().unwrap(), &copy);
}

fn is_staff(from: &Point, to: &Point) -> bool {
    let len = ((to.x - from.x).powi(2) + (to.y - from.y).powi(2)).sqrt();
    // Staffs only grow past the standard length, feathers are always shorter.
    len >= skewt_diagram::wind_barb::STAFF_LENGTH - TOL
}

pub fn test_wind_barb_spacing(prof: &Profile) {
    let mut diagram = Diagram::default();
    let mut surface = CommandList::new();
    let summary = diagram.draw(prof, None, &mut surface);

    let config = diagram.config();
    let column = config.layout.plot_rect().right() + config.layout.margins.right / 2.0;

    let mut anchors: Vec<f64> = surface
        .in_group(Group::WindBarbs)
        .filter_map(|cmd| match cmd {
            DrawCommand::Line { from, to, .. } if from.x == column && is_staff(from, to) => {
                Some(from.y)
            }
            DrawCommand::Circle { center, .. } if center.x == column => Some(center.y),
            _ => None,
        })
        .map(|y| diagram.frame().y_to_height(y).0)
        .collect();
    anchors.sort_by(|a, b| a.partial_cmp(b).unwrap());

    assert_eq!(anchors.len(), summary.wind_barbs);
    assert!(!anchors.is_empty());

    let interval = skewt_diagram::render::wind_barb_interval(config.view.height_span());
    for pair in anchors.windows(2) {
        assert!(pair[1] - pair[0] >= interval - TOL);
    }
}

pub fn test_hover_queries(prof: &Profile) {
    let mut diagram = Diagram::default();
    diagram.draw(prof, None, &mut CommandList::new());
    let frame = diagram.frame().clone();

    for lvl in prof.levels() {
        let h = match lvl.height.into_option() {
            Some(h) => h,
            None => continue,
        };

        let y = frame.height_to_y(h);
        let hover = diagram.level_at_y(y).unwrap();
        let direct = interpolate_at_height(prof, frame.y_to_height(y)).unwrap();

        assert_eq!(hover.pressure.into_option(), direct.pressure.into_option());
        assert_eq!(hover.temperature.into_option(), direct.temperature.into_option());

        if let Some(p) = hover.pressure.into_option() {
            assert!(approx_equal(diagram.pressure_at_y(y).0, p.0, 1.0e-3));
        }
    }
}

pub fn test_svg_output(prof: &Profile, md: &Metadata) {
    let mut diagram = Diagram::default();
    let layout = diagram.config().layout;
    let mut svg = SvgSurface::new(layout.width, layout.height);

    diagram.draw(prof, Some(md), &mut svg);
    let doc = svg.to_svg();

    assert!(doc.starts_with("<svg"));
    assert!(doc.trim_end().ends_with("</svg>"));
    assert!(doc.contains(&md.title()));
    assert!(doc.contains("<g class=\"temperature\">"));
    assert!(doc.contains("<g class=\"wind_barbs\">"));
    assert_eq!(doc.matches("<g").count(), doc.matches("</g>").count());
}
