use crate::input::Intent;
use crate::level::{Level, MoveOutcome};
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Playing,
    Completed,
    Quit,
}

/// Owns the live level for one play session, plus the copy it was loaded
/// from so a reset can restore it.
#[derive(Debug, Clone)]
pub struct Session {
    initial: Level,
    level: Level,
    moves: usize,
    pushes: usize,
}

impl Session {
    pub fn new(level: Level) -> Self {
        Session {
            initial: level.clone(),
            level,
            moves: 0,
            pushes: 0,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn pushes(&self) -> usize {
        self.pushes
    }

    pub fn is_completed(&self) -> bool {
        self.level.completed()
    }

    fn status(&self) -> SessionStatus {
        if self.is_completed() {
            SessionStatus::Completed
        } else {
            SessionStatus::Playing
        }
    }

    pub fn handle(&mut self, intent: Intent) -> SessionStatus {
        match intent {
            Intent::Move(direction) => {
                let was_completed = self.is_completed();
                let outcome = self.level.step(direction);
                debug!(
                    "Move {} -> {:?}, player at {:?}",
                    direction,
                    outcome,
                    self.level.player_pos()
                );
                match outcome {
                    MoveOutcome::Blocked => {}
                    MoveOutcome::Walked => self.moves += 1,
                    MoveOutcome::Pushed => {
                        self.moves += 1;
                        self.pushes += 1;
                    }
                }
                if !was_completed && self.is_completed() {
                    info!(
                        "Level completed in {} moves ({} pushes)",
                        self.moves, self.pushes
                    );
                }
                self.status()
            }
            Intent::Reset => {
                info!("Level reset after {} moves", self.moves);
                self.level = self.initial.clone();
                self.moves = 0;
                self.pushes = 0;
                self.status()
            }
            Intent::Quit => SessionStatus::Quit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Direction;

    fn session() -> Session {
        Session::new(Level::from_text("######\n#Pbo.#\n######").unwrap())
    }

    #[test]
    fn test_moves_and_pushes_counted() {
        let mut session = session();
        assert_eq!(
            session.handle(Intent::Move(Direction::Left)),
            SessionStatus::Playing
        );
        assert_eq!(session.moves(), 0);

        assert_eq!(
            session.handle(Intent::Move(Direction::Right)),
            SessionStatus::Completed
        );
        assert_eq!(session.moves(), 1);
        assert_eq!(session.pushes(), 1);
        assert!(session.is_completed());

        assert_eq!(
            session.handle(Intent::Move(Direction::Left)),
            SessionStatus::Completed
        );
        assert_eq!(session.moves(), 2);
        assert_eq!(session.pushes(), 1);

        // pushing the box off the switch undoes completion
        session.handle(Intent::Move(Direction::Right));
        assert_eq!(
            session.handle(Intent::Move(Direction::Right)),
            SessionStatus::Playing
        );
        assert_eq!(session.pushes(), 2);
    }

    #[test]
    fn test_reset_restores_initial_level() {
        let mut session = session();
        let initial = session.level().clone();
        session.handle(Intent::Move(Direction::Right));
        assert_ne!(session.level(), &initial);

        assert_eq!(session.handle(Intent::Reset), SessionStatus::Playing);
        assert_eq!(session.level(), &initial);
        assert_eq!(session.moves(), 0);
        assert_eq!(session.pushes(), 0);
    }

    #[test]
    fn test_quit() {
        let mut session = session();
        assert_eq!(session.handle(Intent::Quit), SessionStatus::Quit);
    }
}
