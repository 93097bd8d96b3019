use crate::level::{Block, EntityKind, Level};
use log::info;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

const SPRITE_COUNT: usize = 7;

/// Every distinct thing the renderer can draw in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Empty,
    Wall,
    Floor,
    Switch,
    Player,
    Box,
    BoxOnSwitch,
}

pub const ALL_SPRITES: [Sprite; SPRITE_COUNT] = [
    Sprite::Empty,
    Sprite::Wall,
    Sprite::Floor,
    Sprite::Switch,
    Sprite::Player,
    Sprite::Box,
    Sprite::BoxOnSwitch,
];

impl Sprite {
    fn index(&self) -> usize {
        match self {
            Sprite::Empty => 0,
            Sprite::Wall => 1,
            Sprite::Floor => 2,
            Sprite::Switch => 3,
            Sprite::Player => 4,
            Sprite::Box => 5,
            Sprite::BoxOnSwitch => 6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Sprite::Empty => "empty",
            Sprite::Wall => "wall",
            Sprite::Floor => "floor",
            Sprite::Switch => "switch",
            Sprite::Player => "player",
            Sprite::Box => "box",
            Sprite::BoxOnSwitch => "box_on_switch",
        }
    }

    pub fn from_name(name: &str) -> Option<Sprite> {
        ALL_SPRITES.into_iter().find(|s| s.name() == name)
    }

    pub fn for_block(block: Block) -> Sprite {
        match block {
            Block::Empty => Sprite::Empty,
            Block::Wall => Sprite::Wall,
            Block::Floor => Sprite::Floor,
            Block::Switch => Sprite::Switch,
        }
    }
}

impl fmt::Display for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error type for tileset loading. Unlike a bad move direction, these are
/// user-facing: the caller reports them and carries on or exits cleanly.
#[derive(Debug)]
pub enum AssetError {
    Io(io::Error),
    MissingSprite(Sprite),
    Invalid(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io(err) => write!(f, "IO error: {}", err),
            AssetError::MissingSprite(sprite) => write!(f, "Sprite missing: {}", sprite),
            AssetError::Invalid(msg) => write!(f, "Invalid tileset: {}", msg),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for AssetError {
    fn from(err: io::Error) -> Self {
        AssetError::Io(err)
    }
}

impl From<String> for AssetError {
    fn from(err: String) -> Self {
        AssetError::Invalid(err)
    }
}

/// One glyph per sprite, looked up by array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tileset {
    glyphs: [char; SPRITE_COUNT],
}

impl Default for Tileset {
    /// The level legend, with `@` for the player so it reads apart from floor.
    fn default() -> Self {
        Tileset {
            glyphs: [' ', '#', '.', 'o', '@', 'b', 'B'],
        }
    }
}

impl Tileset {
    /// Parse a tileset from `name = glyph` lines.
    ///
    /// Blank lines and lines starting with `#` are ignored. The glyph is the
    /// single character after the `=`, surrounding spaces trimmed; a quoted
    /// `' '` selects a space. Every sprite must be assigned.
    pub fn from_text(text: &str) -> Result<Self, AssetError> {
        let mut glyphs: [Option<char>; SPRITE_COUNT] = [None; SPRITE_COUNT];

        for (line_num, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (name, value) = line
                .split_once('=')
                .ok_or_else(|| format!("line {}: expected `name = glyph`", line_num + 1))?;
            let name = name.trim();
            let sprite = Sprite::from_name(name)
                .ok_or_else(|| format!("line {}: unknown sprite '{}'", line_num + 1, name))?;

            let glyph = match value.trim() {
                "' '" => ' ',
                value => {
                    let mut chars = value.chars();
                    match (chars.next(), chars.next()) {
                        (Some(ch), None) => ch,
                        _ => {
                            return Err(format!(
                                "line {}: glyph for {} must be a single character",
                                line_num + 1,
                                sprite
                            )
                            .into());
                        }
                    }
                }
            };
            if glyphs[sprite.index()].replace(glyph).is_some() {
                return Err(
                    format!("line {}: sprite {} assigned twice", line_num + 1, sprite).into(),
                );
            }
        }

        let mut resolved = [' '; SPRITE_COUNT];
        for sprite in ALL_SPRITES {
            resolved[sprite.index()] =
                glyphs[sprite.index()].ok_or(AssetError::MissingSprite(sprite))?;
        }

        Ok(Tileset { glyphs: resolved })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let tileset = Self::from_text(&contents)?;
        info!("Loaded tileset from {}", path.display());
        Ok(tileset)
    }

    pub fn glyph(&self, sprite: Sprite) -> char {
        self.glyphs[sprite.index()]
    }

    /// Draw the level: blocks first, then entities in draw order on top.
    pub fn render(&self, level: &Level) -> String {
        let width = level.width();
        let mut cells: Vec<Sprite> = Vec::with_capacity(width * level.height());
        for y in 0..level.height() as i32 {
            for x in 0..width as i32 {
                cells.push(Sprite::for_block(level.get_block_at(x, y)));
            }
        }

        for entity in level.entities() {
            let (x, y) = entity.pos;
            let cell = &mut cells[y as usize * width + x as usize];
            *cell = match (entity.kind, *cell) {
                (EntityKind::Player, _) => Sprite::Player,
                (EntityKind::Box, Sprite::Switch) => Sprite::BoxOnSwitch,
                (EntityKind::Box, _) => Sprite::Box,
            };
        }

        let mut out = String::with_capacity((width + 1) * level.height());
        for row in cells.chunks(width) {
            out.extend(row.iter().map(|&sprite| self.glyph(sprite)));
            out.push('\n');
        }
        out
    }
}
