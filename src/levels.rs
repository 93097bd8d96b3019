use crate::level::{Block, Level};
use log::info;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// The level shipped with the game.
///
/// Legend:
/// - ` ` = empty space
/// - `#` = wall
/// - `.` = floor
/// - `o` = switch
/// - `b` = box on floor
/// - `B` = box on switch
/// - `P` = player start
pub const BUILT_IN_LEVEL: &str = concat!(
    "  ##### \n",
    "###...# \n",
    "#oPb..# \n",
    "###.bo# \n",
    "#o##b.# \n",
    "#.#.o.##\n",
    "#b.Bbbo#\n",
    "#...o..#\n",
    "########\n",
);

/// Error type for level parsing operations.
#[derive(Debug)]
pub enum LevelError {
    /// IO error when reading from file
    Io(io::Error),
    /// Invalid level content
    InvalidLevel(String),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Io(err) => write!(f, "IO error: {}", err),
            LevelError::InvalidLevel(msg) => write!(f, "Invalid level: {}", msg),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io(err) => Some(err),
            LevelError::InvalidLevel(_) => None,
        }
    }
}

impl From<io::Error> for LevelError {
    fn from(err: io::Error) -> Self {
        LevelError::Io(err)
    }
}

impl From<String> for LevelError {
    fn from(err: String) -> Self {
        LevelError::InvalidLevel(err)
    }
}

impl Level {
    /// Parse a single level written in the legend of [`BUILT_IN_LEVEL`].
    ///
    /// The width is that of the longest line; shorter lines are padded with
    /// empty cells. Cells are loaded in row-major order, each character
    /// turning into one block assignment plus a box or spawn registration.
    pub fn from_text(text: &str) -> Result<Self, LevelError> {
        let lines: Vec<&str> = text.lines().collect();

        let height = lines.len();
        let width = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        if width == 0 {
            return Err("Empty level".to_string().into());
        }

        let mut level = Level::new(width, height);
        let mut player_found = false;

        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let (x, y) = (x as i32, y as i32);
                match ch {
                    ' ' => level.set_block_at(x, y, Block::Empty),
                    '#' => level.set_block_at(x, y, Block::Wall),
                    '.' => level.set_block_at(x, y, Block::Floor),
                    'o' => level.set_block_at(x, y, Block::Switch),
                    'b' => {
                        level.add_box_at(x, y);
                        level.set_block_at(x, y, Block::Floor);
                    }
                    'B' => {
                        level.add_box_at(x, y);
                        level.set_block_at(x, y, Block::Switch);
                    }
                    'P' => {
                        if player_found {
                            return Err(format!(
                                "Multiple players found (second at ({}, {}))",
                                x, y
                            )
                            .into());
                        }
                        player_found = true;
                        level.set_player_spawn(x, y);
                        level.set_block_at(x, y, Block::Floor);
                    }
                    _ => {
                        return Err(format!(
                            "Invalid character '{}' at position ({}, {})",
                            ch, x, y
                        )
                        .into());
                    }
                }
            }
        }

        if !player_found {
            return Err("No player found in level".to_string().into());
        }

        Ok(level)
    }

    pub fn built_in() -> Self {
        match Level::from_text(BUILT_IN_LEVEL) {
            Ok(level) => level,
            Err(err) => unreachable!("built-in level is malformed: {}", err),
        }
    }
}

/// A collection of levels.
#[derive(Debug)]
pub struct Levels {
    levels: Vec<Level>,
}

impl Levels {
    /// Parse several levels from a string.
    ///
    /// Levels are separated by empty lines or by lines starting with `;`,
    /// which also serve as comments. Every level is validated.
    pub fn from_text(contents: &str) -> Result<Self, LevelError> {
        let mut levels = Vec::new();
        let mut current_level = String::new();

        for line in contents.lines() {
            // A row of spaces is a row of empty cells, not a separator.
            let separator = line.is_empty() || line.trim_start().starts_with(';');
            if separator {
                if !current_level.is_empty() {
                    levels.push(Level::from_text(&current_level)?);
                    current_level.clear();
                }
                continue;
            }

            current_level.push_str(line);
            current_level.push('\n');
        }

        if !current_level.is_empty() {
            levels.push(Level::from_text(&current_level)?);
        }

        if levels.is_empty() {
            return Err("No levels found".to_string().into());
        }

        Ok(Levels { levels })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let levels = Self::from_text(&contents)?;
        info!("Loaded {} level(s) from {}", levels.len(), path.display());
        Ok(levels)
    }

    /// Get the nth level (0-indexed).
    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
