//! Running player scripts over a voxel grid.
//!
//! The scripting engine itself lives outside this crate. For every cell the
//! engine is handed the cell position (`x`, `y`, `z`) and the grid size (`X`,
//! `Y`, `Z`), runs the player's source and reports the value of its `Color`
//! global as a packed `0xRRGGBBAA` integer.

use crate::color::Color;
use crate::error::{Error, Result};
use crate::level::CubeData;

/// Globals visible to a script while it colors one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(non_snake_case)]
pub struct VoxelGlobals {
    pub x: usize,
    pub y: usize,
    pub z: usize,
    pub X: usize,
    pub Y: usize,
    pub Z: usize,
}

/// A scripting engine able to run player source for one cell.
pub trait VoxelScript {
    /// Run `source` with `globals` set and return the `Color` global.
    ///
    /// A script that never assigns `Color` yields `0` (blank). Errors carry
    /// the engine's message.
    fn eval(&mut self, source: &str, globals: &VoxelGlobals) -> std::result::Result<u32, String>;
}

impl<F> VoxelScript for F
where
    F: FnMut(&str, &VoxelGlobals) -> std::result::Result<u32, String>,
{
    fn eval(&mut self, source: &str, globals: &VoxelGlobals) -> std::result::Result<u32, String> {
        self(source, globals)
    }
}

/// Color a whole `(x, y, z)` grid with `source`.
///
/// The first failing cell aborts the run with [`Error::Script`]; no partial
/// grid is returned.
pub fn evaluate_cube(
    engine: &mut dyn VoxelScript,
    source: &str,
    (nx, ny, nz): (usize, usize, usize),
) -> Result<CubeData> {
    let mut cube = CubeData::new(nx, ny, nz)?;
    for x in 0..nx {
        for y in 0..ny {
            for z in 0..nz {
                let globals = VoxelGlobals {
                    x,
                    y,
                    z,
                    X: nx,
                    Y: ny,
                    Z: nz,
                };
                let packed = engine.eval(source, &globals).map_err(Error::Script)?;
                cube.set(x, y, z, Color::from_hex_u32(packed));
            }
        }
    }
    Ok(cube)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cell_visited_with_globals() {
        let mut seen = Vec::new();
        let mut engine = |_: &str, g: &VoxelGlobals| -> std::result::Result<u32, String> {
            seen.push((g.x, g.y, g.z));
            assert_eq!((g.X, g.Y, g.Z), (2, 1, 3));
            Ok(if g.z == 2 { Color::RED.to_hex_u32() } else { 0 })
        };
        let cube = evaluate_cube(&mut engine, "Color = red", (2, 1, 3)).unwrap();
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[0], (0, 0, 0));
        assert_eq!(seen[5], (1, 0, 2));
        assert_eq!(cube[(1, 0, 2)], Color::RED);
        assert_eq!(cube[(1, 0, 1)], Color::BLANK);
    }

    #[test]
    fn test_first_failure_aborts() {
        let mut calls = 0;
        let mut engine = |_: &str, g: &VoxelGlobals| -> std::result::Result<u32, String> {
            calls += 1;
            if g.x == 1 {
                Err("attempt to index a nil value".to_string())
            } else {
                Ok(0)
            }
        };
        let err = evaluate_cube(&mut engine, "", (3, 1, 1)).unwrap_err();
        assert!(matches!(err, Error::Script(ref m) if m.contains("nil value")));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_empty_grid_runs_nothing() {
        let mut engine = |_: &str, _: &VoxelGlobals| -> std::result::Result<u32, String> {
            Err("never called".to_string())
        };
        let cube = evaluate_cube(&mut engine, "", (0, 4, 4)).unwrap();
        assert_eq!(cube.dims(), (0, 4, 4));
    }

    #[test]
    fn test_oversized_grid_is_rejected_before_running() {
        let mut engine = |_: &str, _: &VoxelGlobals| -> std::result::Result<u32, String> {
            Err("never called".to_string())
        };
        let err = evaluate_cube(&mut engine, "", (usize::MAX, 2, 1)).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { y: 2, z: 1, .. }));
    }
}
