use std::fmt;

pub type Position = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Empty,
    Wall,
    Floor,
    Switch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Convert a raw direction vector into a direction.
    /// Both components must lie in -1..=1 and exactly one must be nonzero.
    pub fn from_delta(x_dir: i32, y_dir: i32) -> Result<Direction, MoveError> {
        match (x_dir, y_dir) {
            (0, -1) => Ok(Direction::Up),
            (0, 1) => Ok(Direction::Down),
            (-1, 0) => Ok(Direction::Left),
            (1, 0) => Ok(Direction::Right),
            _ => Err(MoveError::InvalidDirection { x: x_dir, y: y_dir }),
        }
    }

    /// Single-letter notation used when printing solutions.
    pub fn to_char(&self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
        }
    }
}

/// Raised when `Level::move_player` receives a direction vector that is not
/// a single-axis unit step. This is a bug in the caller, not a player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    InvalidDirection { x: i32, y: i32 },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidDirection { x, y } => write!(
                f,
                "invalid move direction ({}, {}): expected one axis set to -1 or 1",
                x, y
            ),
        }
    }
}

impl std::error::Error for MoveError {}

/// What a single move did to the level. Exactly one of these happens per move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing changed: off-grid target, wall, or a push that could not go through.
    Blocked,
    /// The player stepped into an unoccupied cell.
    Walked,
    /// A box moved one cell and the player followed into its old cell.
    Pushed,
}

impl MoveOutcome {
    pub fn changed(&self) -> bool {
        *self != MoveOutcome::Blocked
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Box,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    pub kind: EntityKind,
    pub pos: Position,
}

// The player always lives at index 0 of `entities`; boxes follow in load order.
const PLAYER: usize = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    width: i32,
    height: i32,
    blocks: Vec<Block>,
    entities: Vec<Entity>,
}

impl Level {
    /// Create a level of fixed dimensions, every cell `Empty` and the player at (0, 0).
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "level must have at least one cell");
        Level {
            width: width as i32,
            height: height as i32,
            blocks: vec![Block::Empty; width * height],
            entities: vec![Entity {
                kind: EntityKind::Player,
                pos: (0, 0),
            }],
        }
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn offset(&self, x: i32, y: i32) -> usize {
        assert!(
            self.in_bounds(x, y),
            "position ({}, {}) outside {}x{} level",
            x,
            y,
            self.width,
            self.height
        );
        (y * self.width + x) as usize
    }

    pub fn get_block_at(&self, x: i32, y: i32) -> Block {
        self.blocks[self.offset(x, y)]
    }

    pub fn set_block_at(&mut self, x: i32, y: i32, block: Block) {
        let offset = self.offset(x, y);
        self.blocks[offset] = block;
    }

    pub fn set_player_spawn(&mut self, x: i32, y: i32) {
        self.entities[PLAYER].pos = (x, y);
    }

    pub fn add_box_at(&mut self, x: i32, y: i32) {
        self.entities.push(Entity {
            kind: EntityKind::Box,
            pos: (x, y),
        });
    }

    /// Linear scan; levels only ever hold a handful of boxes.
    pub fn get_box_at(&self, x: i32, y: i32) -> Option<&Entity> {
        self.boxes().find(|e| e.pos == (x, y))
    }

    fn box_index_at(&self, pos: Position) -> Option<usize> {
        self.entities
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, e)| e.pos == pos)
            .map(|(i, _)| i)
    }

    pub fn player_pos(&self) -> Position {
        self.entities[PLAYER].pos
    }

    pub fn box_count(&self) -> usize {
        self.entities.len() - 1
    }

    pub fn boxes(&self) -> impl Iterator<Item = &Entity> {
        self.entities[1..].iter()
    }

    pub fn box_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.boxes().map(|e| e.pos)
    }

    /// All entities in draw order: the player first, then boxes in load order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Blocks the player or a box from entering, ignoring other boxes.
    fn is_blocked(&self, x: i32, y: i32) -> bool {
        !self.in_bounds(x, y) || self.get_block_at(x, y) == Block::Wall
    }

    /// Move the player one cell along a raw direction vector, pushing a box if one
    /// is in the way. Fails only when the vector is not a single-axis unit step.
    pub fn move_player(&mut self, x_dir: i32, y_dir: i32) -> Result<MoveOutcome, MoveError> {
        let dir = Direction::from_delta(x_dir, y_dir)?;
        Ok(self.step(dir))
    }

    /// Move the player one cell in the given direction.
    /// Illegal moves leave the level untouched and report `Blocked`.
    pub fn step(&mut self, dir: Direction) -> MoveOutcome {
        let (dx, dy) = dir.delta();
        let (px, py) = self.player_pos();
        let (nx, ny) = (px + dx, py + dy);

        if self.is_blocked(nx, ny) {
            return MoveOutcome::Blocked;
        }

        if let Some(box_idx) = self.box_index_at((nx, ny)) {
            let (bx, by) = (nx + dx, ny + dy);
            if self.is_blocked(bx, by) || self.get_box_at(bx, by).is_some() {
                return MoveOutcome::Blocked;
            }
            self.entities[box_idx].pos = (bx, by);
            self.entities[PLAYER].pos = (nx, ny);
            return MoveOutcome::Pushed;
        }

        self.entities[PLAYER].pos = (nx, ny);
        MoveOutcome::Walked
    }

    /// True when every box rests on a switch. Vacuously true without boxes.
    pub fn completed(&self) -> bool {
        self.boxes()
            .all(|b| self.get_block_at(b.pos.0, b.pos.1) == Block::Switch)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let mut line = String::with_capacity(self.width as usize);
            for x in 0..self.width {
                let block = self.get_block_at(x, y);
                let ch = if self.player_pos() == (x, y) {
                    'P'
                } else if self.get_box_at(x, y).is_some() {
                    match block {
                        Block::Switch => 'B',
                        _ => 'b',
                    }
                } else {
                    match block {
                        Block::Empty => ' ',
                        Block::Wall => '#',
                        Block::Floor => '.',
                        Block::Switch => 'o',
                    }
                };
                line.push(ch);
            }
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A one-row level built through the authoring calls, player at the left end.
    fn corridor(blocks: &[Block]) -> Level {
        let mut level = Level::new(blocks.len(), 1);
        for (x, &block) in blocks.iter().enumerate() {
            level.set_block_at(x as i32, 0, block);
        }
        level
    }

    fn snapshot(level: &Level) -> (Position, Vec<Position>) {
        (level.player_pos(), level.box_positions().collect())
    }

    #[test]
    fn test_new_level_is_empty() {
        let level = Level::new(3, 2);
        assert_eq!(level.width(), 3);
        assert_eq!(level.height(), 2);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(level.get_block_at(x, y), Block::Empty);
            }
        }
        assert_eq!(level.box_count(), 0);
        assert_eq!(level.entities().len(), 1);
        assert_eq!(level.entities()[0].kind, EntityKind::Player);
    }

    #[test]
    fn test_set_and_get_block() {
        let mut level = Level::new(4, 3);
        level.set_block_at(3, 2, Block::Switch);
        level.set_block_at(0, 1, Block::Wall);
        assert_eq!(level.get_block_at(3, 2), Block::Switch);
        assert_eq!(level.get_block_at(0, 1), Block::Wall);
        assert_eq!(level.get_block_at(1, 1), Block::Empty);
    }

    #[test]
    #[should_panic]
    fn test_get_block_out_of_range_panics() {
        let level = Level::new(2, 2);
        level.get_block_at(-1, 1);
    }

    #[test]
    fn test_get_box_at() {
        let mut level = Level::new(4, 1);
        level.add_box_at(2, 0);
        assert_eq!(level.get_box_at(2, 0).map(|b| b.pos), Some((2, 0)));
        assert!(level.get_box_at(1, 0).is_none());
        // the player is not a box
        assert!(level.get_box_at(0, 0).is_none());
    }

    #[test]
    fn test_entities_render_order() {
        let mut level = Level::new(4, 1);
        level.add_box_at(3, 0);
        level.set_player_spawn(1, 0);
        level.add_box_at(2, 0);
        let kinds: Vec<_> = level.entities().iter().map(|e| (e.kind, e.pos)).collect();
        assert_eq!(
            kinds,
            vec![
                (EntityKind::Player, (1, 0)),
                (EntityKind::Box, (3, 0)),
                (EntityKind::Box, (2, 0)),
            ]
        );
    }

    #[test]
    fn test_invalid_directions_rejected() {
        let mut level = corridor(&[Block::Floor, Block::Floor]);
        let before = snapshot(&level);
        for (x, y) in [(0, 0), (1, 1), (-1, 1), (2, 0), (0, -2)] {
            assert_eq!(
                level.move_player(x, y),
                Err(MoveError::InvalidDirection { x, y })
            );
        }
        assert_eq!(snapshot(&level), before);
    }

    #[test]
    fn test_walk_out_of_bounds_is_noop() {
        let mut level = corridor(&[Block::Floor, Block::Floor]);
        level.add_box_at(1, 0);
        let before = snapshot(&level);
        assert_eq!(level.move_player(-1, 0), Ok(MoveOutcome::Blocked));
        assert_eq!(level.move_player(0, -1), Ok(MoveOutcome::Blocked));
        assert_eq!(level.move_player(0, 1), Ok(MoveOutcome::Blocked));
        assert_eq!(snapshot(&level), before);
    }

    #[test]
    fn test_walk_into_wall_is_noop() {
        let mut level = corridor(&[Block::Floor, Block::Wall]);
        let before = snapshot(&level);
        assert_eq!(level.step(Direction::Right), MoveOutcome::Blocked);
        assert_eq!(snapshot(&level), before);
    }

    #[test]
    fn test_walk_onto_every_open_block() {
        let mut level = corridor(&[Block::Floor, Block::Switch, Block::Empty, Block::Floor]);
        assert_eq!(level.step(Direction::Right), MoveOutcome::Walked);
        assert_eq!(level.player_pos(), (1, 0));
        assert_eq!(level.step(Direction::Right), MoveOutcome::Walked);
        assert_eq!(level.player_pos(), (2, 0));
        assert_eq!(level.step(Direction::Right), MoveOutcome::Walked);
        assert_eq!(level.player_pos(), (3, 0));
    }

    #[test]
    fn test_right_then_left_returns_home() {
        let mut level = Level::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                level.set_block_at(x, y, Block::Floor);
            }
        }
        level.set_player_spawn(1, 1);
        assert_eq!(level.move_player(1, 0), Ok(MoveOutcome::Walked));
        assert_eq!(level.move_player(-1, 0), Ok(MoveOutcome::Walked));
        assert_eq!(level.player_pos(), (1, 1));
        assert_eq!(level.move_player(0, 1), Ok(MoveOutcome::Walked));
        assert_eq!(level.move_player(0, -1), Ok(MoveOutcome::Walked));
        assert_eq!(level.player_pos(), (1, 1));
    }

    #[test]
    fn test_push_onto_floor_and_switch() {
        let mut level = corridor(&[Block::Floor, Block::Floor, Block::Floor, Block::Switch]);
        level.add_box_at(1, 0);

        assert_eq!(level.step(Direction::Right), MoveOutcome::Pushed);
        assert_eq!(snapshot(&level), ((1, 0), vec![(2, 0)]));
        assert!(!level.completed());

        assert_eq!(level.step(Direction::Right), MoveOutcome::Pushed);
        assert_eq!(snapshot(&level), ((2, 0), vec![(3, 0)]));
        assert!(level.completed());
        // the switch stays a switch underneath the box
        assert_eq!(level.get_block_at(3, 0), Block::Switch);
    }

    #[test]
    fn test_push_all_directions() {
        for dir in ALL_DIRECTIONS {
            let mut level = Level::new(5, 5);
            for y in 0..5 {
                for x in 0..5 {
                    level.set_block_at(x, y, Block::Floor);
                }
            }
            let (dx, dy) = dir.delta();
            level.set_player_spawn(2 - dx, 2 - dy);
            level.add_box_at(2, 2);

            assert_eq!(level.step(dir), MoveOutcome::Pushed);
            assert_eq!(level.player_pos(), (2, 2));
            assert_eq!(level.box_positions().collect::<Vec<_>>(), vec![(2 + dx, 2 + dy)]);
        }
    }

    #[test]
    fn test_push_into_wall_is_noop() {
        let mut level = corridor(&[Block::Floor, Block::Floor, Block::Wall]);
        level.add_box_at(1, 0);
        let before = snapshot(&level);
        assert_eq!(level.step(Direction::Right), MoveOutcome::Blocked);
        assert_eq!(snapshot(&level), before);
    }

    #[test]
    fn test_push_into_box_is_noop() {
        let mut level = corridor(&[Block::Floor, Block::Floor, Block::Floor, Block::Floor]);
        level.add_box_at(1, 0);
        level.add_box_at(2, 0);
        let before = snapshot(&level);
        assert_eq!(level.step(Direction::Right), MoveOutcome::Blocked);
        assert_eq!(snapshot(&level), before);
    }

    #[test]
    fn test_push_off_grid_is_noop() {
        let mut level = corridor(&[Block::Floor, Block::Floor]);
        level.add_box_at(1, 0);
        let before = snapshot(&level);
        assert_eq!(level.step(Direction::Right), MoveOutcome::Blocked);
        assert_eq!(snapshot(&level), before);
    }

    #[test]
    fn test_completed_without_boxes() {
        let level = corridor(&[Block::Floor, Block::Floor]);
        assert!(level.completed());
    }

    #[test]
    fn test_completed_tracks_box_leaving_switch() {
        let mut level = corridor(&[Block::Floor, Block::Switch, Block::Floor]);
        level.add_box_at(1, 0);
        assert!(level.completed());

        assert_eq!(level.step(Direction::Right), MoveOutcome::Pushed);
        assert!(!level.completed());
        assert_eq!(level.get_block_at(1, 0), Block::Switch);
    }

    #[test]
    fn test_completed_requires_every_box() {
        let mut level = corridor(&[Block::Switch, Block::Floor, Block::Switch]);
        level.set_player_spawn(1, 0);
        level.add_box_at(0, 0);
        level.add_box_at(2, 0);
        assert!(level.completed());
        level.set_block_at(2, 0, Block::Floor);
        assert!(!level.completed());
    }

    #[test]
    fn test_display() {
        let mut level = corridor(&[
            Block::Floor,
            Block::Floor,
            Block::Switch,
            Block::Switch,
            Block::Wall,
        ]);
        level.add_box_at(1, 0);
        level.add_box_at(3, 0);
        assert_eq!(level.to_string(), "PboB#\n");
    }

    #[test]
    fn test_direction_from_delta() {
        for dir in ALL_DIRECTIONS {
            let (dx, dy) = dir.delta();
            assert_eq!(Direction::from_delta(dx, dy), Ok(dir));
        }
        assert!(Direction::from_delta(0, 0).is_err());
    }
}
