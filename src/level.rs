//! Raw level files.
//!
//! A level file has an optional `header:` section of `key = value` lines and
//! a `data:` section of color tokens:
//!
//! ```text
//! header:
//! name = Stripes
//! X = 2
//! Y = 1
//! Z = 2
//! data:
//! red blue
//! 0xFFFFFFFF red
//!
//! ```
//!
//! Each data row is one Z slice of `X` tokens. A blank line ends the current
//! Y layer. Tokens are runs of ASCII alphanumerics; anything between them is
//! a separator.

use std::fs;
use std::ops::{Index, IndexMut};
use std::path::Path;

use crate::color::Color;
use crate::error::{Error, Result};

/// Largest grid a level or script run may describe.
pub const MAX_CELLS: usize = 1 << 20;

/// A dense grid of voxel colors indexed by `(x, y, z)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CubeData {
    pub x: usize,
    pub y: usize,
    pub z: usize,
    colors: Vec<Color>,
}

impl CubeData {
    /// Create an `x * y * z` grid of blank cells.
    ///
    /// Grids with more than [`MAX_CELLS`] cells are rejected with
    /// [`Error::InvalidDimensions`].
    pub fn new(x: usize, y: usize, z: usize) -> Result<Self> {
        let cells = cell_count(x, y, z)?;
        Ok(Self {
            x,
            y,
            z,
            colors: vec![Color::BLANK; cells],
        })
    }

    /// Dimensions as `(x, y, z)`.
    #[must_use]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.x, self.y, self.z)
    }

    fn offset(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        (x < self.x && y < self.y && z < self.z).then(|| (x * self.y + y) * self.z + z)
    }

    /// Color of a cell, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<Color> {
        self.offset(x, y, z).map(|i| self.colors[i])
    }

    /// Set a cell. Writes outside the grid are ignored.
    pub fn set(&mut self, x: usize, y: usize, z: usize, color: Color) {
        if let Some(i) = self.offset(x, y, z) {
            self.colors[i] = color;
        }
    }

    /// Iterate `((x, y, z), color)` in x-major order.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize, usize), Color)> + '_ {
        let (ny, nz) = (self.y, self.z);
        self.colors
            .iter()
            .enumerate()
            .map(move |(i, &c)| ((i / (ny * nz), (i / nz) % ny, i % nz), c))
    }
}

impl Index<(usize, usize, usize)> for CubeData {
    type Output = Color;

    fn index(&self, (x, y, z): (usize, usize, usize)) -> &Color {
        match self.offset(x, y, z) {
            Some(i) => &self.colors[i],
            None => panic!(
                "cell ({x}, {y}, {z}) outside {}x{}x{} grid",
                self.x, self.y, self.z
            ),
        }
    }
}

impl IndexMut<(usize, usize, usize)> for CubeData {
    fn index_mut(&mut self, (x, y, z): (usize, usize, usize)) -> &mut Color {
        match self.offset(x, y, z) {
            Some(i) => &mut self.colors[i],
            None => panic!(
                "cell ({x}, {y}, {z}) outside {}x{}x{} grid",
                self.x, self.y, self.z
            ),
        }
    }
}

/// A parsed level: its header and, unless only the header was read, the
/// target shape.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelData {
    pub name: String,
    pub desc: String,
    pub x: usize,
    pub y: usize,
    pub z: usize,
    pub solution: Option<CubeData>,
}

impl LevelData {
    /// Read and parse a level file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        parse_level(&text)
    }

    /// Dimensions as `(x, y, z)`.
    #[must_use]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.x, self.y, self.z)
    }

    /// Check `cube` against the solution cell by cell.
    #[must_use]
    pub fn is_solved_by(&self, cube: &CubeData) -> bool {
        self.solution.as_ref().is_some_and(|s| s == cube)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Header,
    Data,
}

/// Parse a whole level, data section included.
pub fn parse_level(text: &str) -> Result<LevelData> {
    parse(text, true)
}

/// Parse only the header of a level; `solution` is left `None`.
pub fn parse_level_header(text: &str) -> Result<LevelData> {
    parse(text, false)
}

fn parse(text: &str, with_data: bool) -> Result<LevelData> {
    let mut level = LevelData::default();
    let mut dims = [0i64; 3];
    let mut layers: Vec<Vec<Color>> = Vec::new();
    let mut layer: Vec<Color> = Vec::new();
    let mut section = Section::Preamble;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        match line.trim() {
            "header:" => {
                section = Section::Header;
                continue;
            }
            "data:" => {
                if !with_data {
                    break;
                }
                section = Section::Data;
                continue;
            }
            _ => {}
        }
        match section {
            Section::Preamble => {}
            Section::Header => {
                let Some((key, value)) = line.split_once('=') else {
                    continue;
                };
                let value = value.trim();
                let dim = |slot: &mut i64| -> Result<()> {
                    *slot = value.parse().map_err(|_| Error::Parse {
                        line: index + 1,
                        message: format!("expected an integer dimension, found `{value}`"),
                    })?;
                    Ok(())
                };
                match key.trim() {
                    "X" => dim(&mut dims[0])?,
                    "Y" => dim(&mut dims[1])?,
                    "Z" => dim(&mut dims[2])?,
                    "name" => level.name = value.to_string(),
                    "desc" => level.desc = value.to_string(),
                    _ => {}
                }
            }
            Section::Data => {
                if line.trim().is_empty() {
                    layers.push(std::mem::take(&mut layer));
                } else {
                    layer.extend(tokens(line).map(decode_token));
                }
            }
        }
    }
    if !layer.is_empty() {
        layers.push(layer);
    }

    let [x, y, z] = dims;
    let (Ok(ux), Ok(uy), Ok(uz)) = (usize::try_from(x), usize::try_from(y), usize::try_from(z))
    else {
        return Err(Error::InvalidDimensions { x, y, z });
    };
    level.x = ux;
    level.y = uy;
    level.z = uz;
    if with_data {
        level.solution = Some(fill_cube(ux, uy, uz, &layers)?);
    } else {
        cell_count(ux, uy, uz)?;
    }
    Ok(level)
}

fn cell_count(x: usize, y: usize, z: usize) -> Result<usize> {
    x.checked_mul(y)
        .and_then(|xy| xy.checked_mul(z))
        .filter(|&n| n <= MAX_CELLS)
        .ok_or_else(|| {
            let signed = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
            Error::InvalidDimensions {
                x: signed(x),
                y: signed(y),
                z: signed(z),
            }
        })
}

/// Runs of ASCII alphanumerics.
fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
}

fn decode_token(token: &str) -> Color {
    Color::from_token(token).unwrap_or(Color::BLANK)
}

/// Layer `y` holds Z slices of X cells each, row-major.
fn fill_cube(x: usize, y: usize, z: usize, layers: &[Vec<Color>]) -> Result<CubeData> {
    let mut cube = CubeData::new(x, y, z)?;
    for (iy, layer) in layers.iter().take(y).enumerate() {
        for iz in 0..z {
            for ix in 0..x {
                if let Some(&color) = layer.get(iz * x + ix) {
                    cube.set(ix, iy, iz, color);
                }
            }
        }
    }
    Ok(cube)
}
