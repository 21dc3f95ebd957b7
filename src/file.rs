use std::collections::HashSet;
use std::fs;
use std::num::ParseFloatError;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::error::ValidationError;
use crate::model::{Planet, Starmap};

#[derive(Debug, Error)]
pub enum FileError {
    #[error("could not read planet catalogue: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: missing field `{field}`")]
    MissingField { line: usize, field: &'static str },
    #[error("line {line}: bad number for `{field}`: {source}")]
    BadNumber {
        line: usize,
        field: &'static str,
        source: ParseFloatError,
    },
    #[error("line {line}: unexpected trailing field `{text}`")]
    TrailingField { line: usize, text: String },
    #[error("line {line}: planet `{name}` is already defined")]
    DuplicatePlanet { line: usize, name: String },
    #[error("line {line}: {source}")]
    InvalidPlanet {
        line: usize,
        source: ValidationError,
    },
}

pub fn read_file(path: impl AsRef<Path>) -> Result<Starmap, FileError> {
    let text = fs::read_to_string(path)?;
    parse_catalogue(&text)
}

/// Parses a planet catalogue. The first line is a header; every other line
/// is `name x y [cargo]`. Blank lines and lines starting with `#` are skipped.
pub fn parse_catalogue(text: &str) -> Result<Starmap, FileError> {
    let mut starmap = Starmap::new();
    let mut seen = HashSet::new();

    // Read lines, skipping header
    for (idx, line) in text.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_ascii_whitespace();
        let name = fields.next().ok_or(FileError::MissingField {
            line: line_no,
            field: "name",
        })?;
        let x = parse_field(fields.next(), line_no, "x")?;
        let y = parse_field(fields.next(), line_no, "y")?;
        let cargo = match fields.next() {
            None => None,
            text => Some(parse_field(text, line_no, "cargo")?),
        };
        if let Some(extra) = fields.next() {
            return Err(FileError::TrailingField {
                line: line_no,
                text: extra.to_owned(),
            });
        }

        if !seen.insert(name.to_lowercase()) {
            return Err(FileError::DuplicatePlanet {
                line: line_no,
                name: name.to_owned(),
            });
        }

        let planet = Planet::new(name, &[x, y], cargo)
            .map_err(|source| FileError::InvalidPlanet { line: line_no, source })?;
        debug!("catalogue line {}: {}", line_no, planet);
        starmap.add_planet(planet);
    }

    Ok(starmap)
}

fn parse_field(text: Option<&str>, line: usize, field: &'static str) -> Result<f64, FileError> {
    let text = text.ok_or(FileError::MissingField { line, field })?;
    text.parse::<f64>()
        .map_err(|source| FileError::BadNumber {
            line,
            field,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SAMPLE_CATALOGUE;

    #[test]
    fn test_parse_sample() {
        let starmap = parse_catalogue(SAMPLE_CATALOGUE).unwrap();
        let planets: Vec<_> = starmap
            .planets()
            .map(|p| (p.name().to_owned(), p.position().x, p.position().y, p.available_cargo()))
            .collect();
        assert_eq!(
            planets,
            vec![
                ("Mercury".to_owned(), -4.0, 1.5, 0.0),
                ("Earth".to_owned(), 0.0, 0.0, 1200.0),
                ("Mars".to_owned(), 10.0, 10.0, 500.0),
            ]
        );
    }

    #[test]
    fn test_header_only() {
        let starmap = parse_catalogue("name x y cargo\n").unwrap();
        assert_eq!(starmap.planets().count(), 0);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let cases = [
            ("h\nMars 1\n", "line 2: missing field `y`"),
            ("h\n\nMars 1 zz\n", "line 3: bad number for `y`: invalid float literal"),
            ("h\nMars 1 2 3 4\n", "line 2: unexpected trailing field `4`"),
            ("h\nMars 1 2\nmars 3 4\n", "line 3: planet `mars` is already defined"),
            (
                "h\nMars 1 2 -5\n",
                "line 2: Доступное на планете количество груза должно быть неотрицательным числом",
            ),
            (
                "h\nMars inf 2\n",
                "line 2: Местоположение планеты должно быть массивом из двух чисел",
            ),
        ];
        for (text, expected) in cases.iter() {
            let err = parse_catalogue(text).unwrap_err();
            assert_eq!(&err.to_string(), expected);
        }
    }

    #[test]
    fn test_missing_file() {
        let err = read_file("definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, FileError::Io(_)));
    }
}
