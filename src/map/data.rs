//! Map data loading
//!
//! Maps are RON files describing the grid dimensions, tile pixel size,
//! the atlas the cell codes index into, and the cell codes themselves.
//! The data is consumed once at grid construction; there is no live
//! reload. A load failure prints a diagnostic and degrades to a built-in
//! fallback map rather than aborting.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Cell code that marks a collidable cell.
pub const COLLIDABLE_CODE: u8 = 1;

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum map dimension (columns or rows)
    pub const MAX_MAP_DIM: usize = 512;
    /// Maximum tile pixel dimension
    pub const MAX_TILE_SIZE: i32 = 256;
    /// Maximum atlas grid dimension
    pub const MAX_ATLAS_DIM: u32 = 64;
}

/// Error type for map loading
#[derive(Debug)]
pub enum MapError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for MapError {
    fn from(e: ron::error::SpannedError) -> Self {
        MapError::ParseError(e)
    }
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::IoError(e) => write!(f, "IO error: {}", e),
            MapError::ParseError(e) => write!(f, "Parse error: {}", e),
            MapError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

/// One map's worth of tile data, as read from a map file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapData {
    /// Columns in the grid
    pub map_width: usize,
    /// Rows in the grid
    pub map_height: usize,
    /// Tile pixel width
    pub tile_width: i32,
    /// Tile pixel height
    pub tile_height: i32,
    /// Columns in the tile atlas image
    pub atlas_columns: u32,
    /// Rows in the tile atlas image
    pub atlas_rows: u32,
    /// Path of the atlas image the cell codes index into
    pub atlas_image: String,
    /// Cell codes, `map_height` rows of `map_width` columns. Each code is
    /// both the atlas index the cell is drawn with and, when equal to
    /// [`COLLIDABLE_CODE`], the collidable marker.
    pub cells: Vec<Vec<u8>>,
}

impl MapData {
    /// The cell code at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    /// Number of distinct atlas indices the map may reference.
    pub fn atlas_tile_count(&self) -> u32 {
        self.atlas_columns * self.atlas_rows
    }

    /// A built-in map used when the map file cannot be read: a walled
    /// rectangle of floor tiles.
    pub fn fallback() -> Self {
        let width = 15;
        let height = 11;
        let mut cells = vec![vec![0u8; width]; height];
        for col in 0..width {
            cells[0][col] = COLLIDABLE_CODE;
            cells[height - 1][col] = COLLIDABLE_CODE;
        }
        for row in cells.iter_mut() {
            row[0] = COLLIDABLE_CODE;
            row[width - 1] = COLLIDABLE_CODE;
        }
        Self {
            map_width: width,
            map_height: height,
            tile_width: 50,
            tile_height: 50,
            atlas_columns: 2,
            atlas_rows: 1,
            atlas_image: String::new(),
            cells,
        }
    }
}

/// Validate dimensions, cell shape, and cell codes against the atlas.
fn validate(map: &MapData) -> Result<(), MapError> {
    let err = |msg: String| Err(MapError::ValidationError(msg));

    if map.map_width == 0 || map.map_height == 0 {
        return err(format!(
            "map dimensions must be nonzero ({}x{})",
            map.map_width, map.map_height
        ));
    }
    if map.map_width > limits::MAX_MAP_DIM || map.map_height > limits::MAX_MAP_DIM {
        return err(format!(
            "map dimensions too large ({}x{} > {})",
            map.map_width,
            map.map_height,
            limits::MAX_MAP_DIM
        ));
    }
    if map.tile_width <= 0 || map.tile_height <= 0 {
        return err(format!(
            "tile size must be positive ({}x{})",
            map.tile_width, map.tile_height
        ));
    }
    if map.tile_width > limits::MAX_TILE_SIZE || map.tile_height > limits::MAX_TILE_SIZE {
        return err(format!(
            "tile size too large ({}x{} > {})",
            map.tile_width,
            map.tile_height,
            limits::MAX_TILE_SIZE
        ));
    }
    if map.atlas_columns == 0
        || map.atlas_rows == 0
        || map.atlas_columns > limits::MAX_ATLAS_DIM
        || map.atlas_rows > limits::MAX_ATLAS_DIM
    {
        return err(format!(
            "atlas grid out of range ({}x{})",
            map.atlas_columns, map.atlas_rows
        ));
    }
    if map.cells.len() != map.map_height {
        return err(format!(
            "expected {} cell rows, found {}",
            map.map_height,
            map.cells.len()
        ));
    }
    let tile_count = map.atlas_tile_count();
    for (row_idx, row) in map.cells.iter().enumerate() {
        if row.len() != map.map_width {
            return err(format!(
                "row {}: expected {} cells, found {}",
                row_idx,
                map.map_width,
                row.len()
            ));
        }
        for (col_idx, &code) in row.iter().enumerate() {
            // Cell codes index directly into the atlas
            if u32::from(code) >= tile_count {
                return err(format!(
                    "cell ({}, {}): code {} out of atlas range {}",
                    row_idx, col_idx, code, tile_count
                ));
            }
        }
    }
    Ok(())
}

/// Parse and validate map data from a RON string.
pub fn load_map_from_str(s: &str) -> Result<MapData, MapError> {
    let map: MapData = ron::from_str(s)?;
    validate(&map)?;
    Ok(map)
}

/// Load and validate a map file.
pub fn load_map<P: AsRef<Path>>(path: P) -> Result<MapData, MapError> {
    let contents = fs::read_to_string(path)?;
    load_map_from_str(&contents)
}

/// Load a map file, degrading to the built-in fallback map (with a
/// printed diagnostic) when the file is missing or invalid.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> MapData {
    match load_map(path.as_ref()) {
        Ok(map) => map,
        Err(e) => {
            println!(
                "Failed to load map {}: {}, using fallback map",
                path.as_ref().display(),
                e
            );
            MapData::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID_MAP: &str = r#"(
        map_width: 3,
        map_height: 2,
        tile_width: 32,
        tile_height: 32,
        atlas_columns: 2,
        atlas_rows: 1,
        atlas_image: "assets/tiles.png",
        cells: [
            [1, 0, 1],
            [0, 0, 0],
        ],
    )"#;

    #[test]
    fn test_parse_valid_map() {
        let map = load_map_from_str(VALID_MAP).expect("valid map");
        assert_eq!(map.map_width, 3);
        assert_eq!(map.map_height, 2);
        assert_eq!(map.cell(0, 0), COLLIDABLE_CODE);
        assert_eq!(map.cell(1, 2), 0);
        assert_eq!(map.atlas_tile_count(), 2);
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let ragged = VALID_MAP.replace("[0, 0, 0]", "[0, 0]");
        match load_map_from_str(&ragged) {
            Err(MapError::ValidationError(msg)) => assert!(msg.contains("row 1")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_out_of_range_cell_code() {
        let bad = VALID_MAP.replace("[1, 0, 1]", "[1, 9, 1]");
        match load_map_from_str(&bad) {
            Err(MapError::ValidationError(msg)) => assert!(msg.contains("code 9")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let bad = VALID_MAP.replace("map_width: 3", "map_width: 0");
        assert!(matches!(
            load_map_from_str(&bad),
            Err(MapError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(VALID_MAP.as_bytes()).expect("write map");
        let map = load_map(file.path()).expect("load map");
        assert_eq!(map.map_height, 2);
    }

    #[test]
    fn test_missing_file_degrades_to_fallback() {
        let map = load_or_default("does/not/exist.ron");
        assert_eq!(map.map_width, MapData::fallback().map_width);
    }

    #[test]
    fn test_fallback_map_is_valid() {
        let map = MapData::fallback();
        assert!(validate(&map).is_ok());
        // Border is walled, interior is open
        assert_eq!(map.cell(0, 0), COLLIDABLE_CODE);
        assert_eq!(map.cell(5, 7), 0);
    }
}
