use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDateTime;
use skewt_diagram::{Level, Metadata, Profile};

pub mod interpolation_tests;
pub mod render_tests;

#[allow(unused_macros)] // False alarm
macro_rules! test_file {
    ($test_mod_name:ident, $fname:expr) => {
        mod $test_mod_name {

            use skewt_diagram::{Metadata, Profile};
            use crate::utils;

            fn load_data() -> (Profile, Metadata) {
                utils::init_logging();
                utils::load_test_file($fname)
            }

            mod interpolation {
                use crate::utils::interpolation_tests;
                use super::load_data;

                #[test]
                fn exact_samples() {
                    let (prof, _) = load_data();
                    interpolation_tests::test_exact_samples(&prof);
                }

                #[test]
                fn round_trip_through_height() {
                    let (prof, _) = load_data();
                    interpolation_tests::test_round_trip_through_height(&prof);
                }

                #[test]
                fn reversed_profile() {
                    let (prof, _) = load_data();
                    interpolation_tests::test_reversed_profile(&prof);
                }

                #[test]
                fn between_samples() {
                    let (prof, _) = load_data();
                    interpolation_tests::test_between_samples(&prof);
                }
            }

            mod render {
                use crate::utils::render_tests;
                use super::load_data;

                #[test]
                fn full_frame() {
                    let (prof, md) = load_data();
                    render_tests::test_full_frame(&prof, &md);
                }

                #[test]
                fn zoom() {
                    let (prof, _) = load_data();
                    render_tests::test_zoom(&prof);
                }

                #[test]
                fn wind_barb_spacing() {
                    let (prof, _) = load_data();
                    render_tests::test_wind_barb_spacing(&prof);
                }

                #[test]
                fn hover_queries() {
                    let (prof, _) = load_data();
                    render_tests::test_hover_queries(&prof);
                }

                #[test]
                fn svg_output() {
                    let (prof, md) = load_data();
                    render_tests::test_svg_output(&prof, &md);
                }
            }
        }
    };
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn load_test_file(fname: &str) -> (Profile, Metadata) {
    let mut test_path = PathBuf::new();
    test_path.push("test_data");
    test_path.push(fname);
    load_test_csv_sounding(&test_path)
}

#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn approx_equal(tgt: f64, guess: f64, tol: f64) -> bool {
    assert!(tol > 0.0);

    f64::abs(tgt - guess) <= tol
}

fn parse_or_nan(token: Option<&&str>) -> f64 {
    token
        .and_then(|tok| f64::from_str(tok.trim()).ok())
        .unwrap_or(std::f64::NAN)
}

fn load_test_csv_sounding(location: &PathBuf) -> (Profile, Metadata) {
    let mut f = File::open(location).expect(&format!("Error opening file: {:#?}", location));

    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .expect(&format!("Error reading file: {:#?}", location));

    let mut line_iter = contents.lines();

    //
    // Parse profile data
    //
    let mut levels: Vec<Level> = vec![];
    for line in line_iter.by_ref() {
        if line.starts_with("### Metadata ###") {
            break;
        }

        if line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split(',').collect();
        if tokens.len() < 6 {
            continue;
        }

        let height = parse_or_nan(tokens.get(0));
        let temperature = parse_or_nan(tokens.get(1));
        let dew_point = parse_or_nan(tokens.get(2));
        let pressure = parse_or_nan(tokens.get(3));
        let wind_speed = parse_or_nan(tokens.get(4));
        let wind_direction = parse_or_nan(tokens.get(5));

        levels.push(Level::new(
            pressure,
            height,
            temperature,
            dew_point,
            wind_direction,
            wind_speed,
        ));
    }

    //
    // Parse metadata
    //
    let mut md = Metadata::new();
    let (mut lat, mut lon) = (None, None);
    for line in line_iter {
        let tokens: Vec<&str> = line.split(',').map(|tok| tok.trim()).collect();
        if tokens.len() < 2 {
            continue;
        }

        match tokens[0] {
            "station" => md = md.with_station_name(tokens[1].to_owned()),
            "lat" => lat = f64::from_str(tokens[1]).ok(),
            "lon" => lon = f64::from_str(tokens[1]).ok(),
            "elevation" => {
                if let Ok(elev) = f64::from_str(tokens[1]) {
                    md = md.with_elevation(metfor::Meters(elev));
                }
            }
            "time" => {
                let valid = NaiveDateTime::parse_from_str(tokens[1], "%Y-%m-%d %H:%M")
                    .expect("Invalid time in metadata");
                md = md.with_observation_time(valid);
            }
            _ => {}
        }
    }

    if let (Some(lat), Some(lon)) = (lat, lon) {
        md = md.with_lat_lon((lat, lon));
    }

    (Profile::from_levels(levels), md)
}
