//! Instance file loading.
//!
//! Two plain-text layouts are supported:
//!
//! - **Full distance matrix**: the first line is a header of column labels,
//!   every following non-empty line starts with a row label followed by the
//!   row's distances. A comma is accepted as the decimal separator. Some
//!   exports drop the zero diagonal entry; a row with exactly `n − 1`
//!   values gets it re-inserted.
//! - **Coordinate listing**: every line whose last two tokens are numbers
//!   contributes one city `(x, y)`; any other line (headers, section
//!   markers, `EOF`) is skipped. This accepts TSPLIB `NODE_COORD_SECTION`
//!   bodies as well as bare `x y` lists.

use std::fs;
use std::path::Path;

use crate::error::{Result, TspError};
use crate::problem::Tsp;

/// Parses a full distance matrix (see the module docs for the layout).
///
/// Tokens that are not numbers are ignored, mirroring the permissive
/// spreadsheet exports this format comes from.
///
/// # Errors
///
/// [`TspError::Parse`] if a row has the wrong number of values, and
/// [`TspError::InvalidInput`] if the matrix is empty or has negative or
/// non-finite entries.
///
/// # Examples
///
/// ```
/// use u_tsp::loader::parse_matrix;
///
/// let text = "\t1\t2\t3\n1\t0\t2,5\t4\n2\t2,5\t0\t1\n3\t4\t1\t0\n";
/// let tsp = parse_matrix(text).unwrap();
/// assert_eq!(tsp.n(), 3);
/// assert_eq!(tsp.dist(0, 1), 2.5);
/// ```
pub fn parse_matrix(text: &str) -> Result<Tsp> {
    let mut rows: Vec<(usize, Vec<f64>)> = Vec::new();

    for (idx, line) in text.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let values: Vec<f64> = line
            .split_whitespace()
            .skip(1)
            .filter_map(parse_number)
            .collect();
        if !values.is_empty() {
            rows.push((idx + 1, values));
        }
    }

    let n = rows.len();
    let mut matrix = Vec::with_capacity(n);
    for (i, (line, mut values)) in rows.into_iter().enumerate() {
        if values.len() + 1 == n {
            values.insert(i, 0.0);
        }
        if values.len() != n {
            return Err(TspError::Parse {
                line,
                message: format!("expected {n} distances, found {}", values.len()),
            });
        }
        matrix.push(values);
    }

    Tsp::from_matrix(matrix)
}

/// Parses a coordinate listing (see the module docs for the layout).
///
/// # Errors
///
/// [`TspError::InvalidInput`] if no line carries a coordinate pair.
///
/// # Examples
///
/// ```
/// use u_tsp::loader::parse_coords;
///
/// let text = "NAME: tiny\nNODE_COORD_SECTION\n1 0 0\n2 3 4\nEOF\n";
/// let tsp = parse_coords(text).unwrap();
/// assert_eq!(tsp.n(), 2);
/// assert_eq!(tsp.dist(0, 1), 5.0);
/// ```
pub fn parse_coords(text: &str) -> Result<Tsp> {
    let coords: Vec<(f64, f64)> = text.lines().filter_map(trailing_pair).collect();
    if coords.is_empty() {
        return Err(TspError::InvalidInput(
            "no coordinate pairs found".into(),
        ));
    }
    Tsp::from_coords(&coords)
}

/// Reads and parses a distance-matrix file.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn load_matrix_file(path: impl AsRef<Path>) -> Result<Tsp> {
    let path = path.as_ref();
    let tsp = parse_matrix(&read_lossy(path)?)?;
    log::debug!("loaded {0}x{0} distance matrix from {1}", tsp.n(), path.display());
    Ok(tsp)
}

/// Reads and parses a coordinate-listing file.
pub fn load_coords_file(path: impl AsRef<Path>) -> Result<Tsp> {
    let path = path.as_ref();
    let tsp = parse_coords(&read_lossy(path)?)?;
    log::debug!("loaded {} cities from {}", tsp.n(), path.display());
    Ok(tsp)
}

fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .map_err(|err| TspError::Io(format!("{}: {err}", path.display())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parses one token, accepting `,` as the decimal separator.
fn parse_number(token: &str) -> Option<f64> {
    token
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// The last two tokens of `line` as `(x, y)` if both are numbers.
fn trailing_pair(line: &str) -> Option<(f64, f64)> {
    let mut tokens = line.split_whitespace().rev();
    let y = parse_number(tokens.next()?)?;
    let x = parse_number(tokens.next()?)?;
    Some((x, y))
}
