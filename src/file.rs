use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::model::{color_from_hex, BodyDescriptor, BodyRegistry};

/// Reads a body table. The first line is a header; after that every
/// non-blank line that doesn't start with `#` is
///
/// `name color radius distance speed rotation description...`
///
/// where color is six hex digits and the description runs to the end of the
/// line. Exactly one row must have `-` as its distance: that's the sun.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<BodyRegistry, LoadError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    let registry = parse_table(&contents)?;
    log::info!(
        "Loaded {} planets from {}",
        registry.len(),
        path.display()
    );
    Ok(registry)
}

pub fn parse_table(contents: &str) -> Result<BodyRegistry, LoadError> {
    let mut sun = None;
    let mut planets = vec![];
    let mut seen_names = HashSet::new();

    // Read lines, skipping header. Line numbers are 1-based for humans.
    for (idx, line) in contents.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_ascii_whitespace();

        macro_rules! next_string {
            ($field:expr) => {
                fields.next().ok_or(LoadError::MissingField {
                    line: line_no,
                    field: $field,
                })?
            };
        }

        macro_rules! next_f32 {
            ($field:expr) => {{
                let s = next_string!($field);
                parse_number(s, line_no, $field)?
            }};
        }

        let name = next_string!("name");
        let color = parse_color(next_string!("color"), line_no)?;
        let radius = next_f32!("radius");
        let distance = next_string!("distance");
        let speed = next_f32!("speed");
        let rotation = next_f32!("rotation");
        let description = fields.collect::<Vec<_>>().join(" ");

        if !seen_names.insert(name.to_owned()) {
            return Err(LoadError::DuplicateBody {
                line: line_no,
                name: name.to_owned(),
            });
        }

        let orbital_distance = if distance == "-" {
            0.0
        } else {
            parse_number(distance, line_no, "distance")?
        };

        let desc = BodyDescriptor {
            name: name.to_owned(),
            color,
            radius,
            orbital_distance,
            base_angular_speed: speed,
            rotation_speed: rotation,
            description,
        };

        if distance == "-" {
            if sun.is_some() {
                return Err(LoadError::ExtraSun {
                    line: line_no,
                    name: name.to_owned(),
                });
            }
            sun = Some(desc);
        } else {
            planets.push(desc);
        }
    }

    let sun = sun.ok_or(LoadError::NoSun)?;
    Ok(BodyRegistry::new(sun, planets))
}

fn parse_number(s: &str, line: usize, field: &'static str) -> Result<f32, LoadError> {
    s.parse::<f32>()
        .ok()
        .filter(|x| x.is_finite())
        .ok_or_else(|| LoadError::BadValue {
            line,
            field,
            value: s.to_owned(),
        })
}

fn parse_color(s: &str, line: usize) -> Result<nalgebra::Point3<f32>, LoadError> {
    let bad_value = || LoadError::BadValue {
        line,
        field: "color",
        value: s.to_owned(),
    };

    if s.len() != 6 {
        return Err(bad_value());
    }
    let rgb = u32::from_str_radix(s, 16).map_err(|_| bad_value())?;
    Ok(color_from_hex(rgb))
}
