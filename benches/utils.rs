use skewt_diagram::{Level, Profile};
use std::{fs::File, io::Read, path::PathBuf, str::FromStr};

pub fn load_all_test_files() -> [Profile; 2] {
    let prof1 = load_test_file("standard.csv");
    let prof2 = load_test_file("missing_data.csv");

    [prof1, prof2]
}

fn load_test_file(fname: &str) -> Profile {
    let mut test_path = PathBuf::new();
    test_path.push("test_data");
    test_path.push(fname);
    load_test_csv_profile(&test_path)
}

fn load_test_csv_profile(location: &PathBuf) -> Profile {
    let mut f = File::open(location).expect(&format!("Error opening file: {:#?}", location));

    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .expect(&format!("Error reading file: {:#?}", location));

    let parse = |tok: &str| f64::from_str(tok.trim()).unwrap_or(std::f64::NAN);

    contents
        .lines()
        .take_while(|line| !line.starts_with("### Metadata ###"))
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| {
            let tokens: Vec<&str> = line.split(',').collect();
            if tokens.len() < 6 {
                return None;
            }

            Some(Level::new(
                parse(tokens[3]),
                parse(tokens[0]),
                parse(tokens[1]),
                parse(tokens[2]),
                parse(tokens[5]),
                parse(tokens[4]),
            ))
        })
        .collect()
}
