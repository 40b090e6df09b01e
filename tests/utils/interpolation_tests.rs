use metfor::{HectoPascal, Meters, Quantity};
use skewt_diagram::{interpolate_at_height, CoordinateFrame, Layout, Level, Profile, ViewBounds};

use super::*;

fn frame_for(prof: &Profile) -> CoordinateFrame {
    CoordinateFrame::new(
        ViewBounds::default(),
        Layout::default().plot_rect(),
        Some(prof),
    )
}

fn sorted_heights(prof: &Profile) -> Vec<Meters> {
    let mut heights: Vec<Meters> = prof
        .height_profile()
        .iter()
        .filter_map(|h| h.into_option())
        .collect();
    heights.sort_by(|a, b| a.partial_cmp(b).unwrap());
    heights
}

pub fn test_exact_samples(prof: &Profile) {
    for lvl in prof.levels() {
        let h = match lvl.height.into_option() {
            Some(h) => h,
            None => continue,
        };

        let res = interpolate_at_height(prof, h).unwrap();
        println!("{:?} -> {:#?}", h, res);

        assert_eq!(res.pressure.into_option(), lvl.pressure.into_option());
        assert_eq!(res.temperature.into_option(), lvl.temperature.into_option());
        assert_eq!(res.dew_point.into_option(), lvl.dew_point.into_option());
        assert_eq!(res.wind_speed.into_option(), lvl.wind_speed.into_option());
    }
}

pub fn test_round_trip_through_height(prof: &Profile) {
    let frame = frame_for(prof);

    for p in prof.pressure_profile().iter().filter_map(|p| p.into_option()) {
        assert_eq!(
            frame.pressure_to_y(p),
            frame.height_to_y(frame.pressure_to_height(p))
        );
    }
}

pub fn test_reversed_profile(prof: &Profile) {
    let reversed: Profile = {
        let mut lvls: Vec<Level> = prof.levels().collect();
        lvls.reverse();
        Profile::from_levels(lvls)
    };

    let frame = frame_for(prof);
    let reversed_frame = frame_for(&reversed);

    for i in 0..=40 {
        let p = HectoPascal(1050.0 - 25.0 * f64::from(i));
        assert!(approx_equal(
            frame.pressure_to_height(p).unpack(),
            reversed_frame.pressure_to_height(p).unpack(),
            1.0e-9
        ));
    }

    let heights = sorted_heights(prof);
    let (bottom, top) = (heights[0].unpack(), heights[heights.len() - 1].unpack());
    for i in 0..=10 {
        let h = Meters(bottom + (top - bottom) * f64::from(i) / 10.0);

        let fwd = interpolate_at_height(prof, h).unwrap();
        let rev = interpolate_at_height(&reversed, h).unwrap();

        match (fwd.temperature.into_option(), rev.temperature.into_option()) {
            (Some(a), Some(b)) => assert!(approx_equal(a.unpack(), b.unpack(), 1.0e-9)),
            (None, None) => {}
            (a, b) => panic!("temperature mismatch at {:?}: {:?} vs {:?}", h, a, b),
        }

        match (fwd.pressure.into_option(), rev.pressure.into_option()) {
            (Some(a), Some(b)) => assert!(approx_equal(a.unpack(), b.unpack(), 1.0e-9)),
            (None, None) => {}
            (a, b) => panic!("pressure mismatch at {:?}: {:?} vs {:?}", h, a, b),
        }
    }
}

pub fn test_between_samples(prof: &Profile) {
    let heights = sorted_heights(prof);

    for pair in heights.windows(2) {
        let (h0, h1) = (pair[0], pair[1]);
        let mid = Meters((h0.unpack() + h1.unpack()) / 2.0);

        let res = interpolate_at_height(prof, mid).unwrap();
        assert_eq!(res.height.unwrap(), mid);

        let p = res.pressure.unwrap().unpack();
        let frame = frame_for(prof);
        let (p0, p1) = (
            frame.height_to_pressure(h0).unpack(),
            frame.height_to_pressure(h1).unpack(),
        );
        assert!(p < p0 && p > p1, "{} not between {} and {}", p, p0, p1);
    }
}
