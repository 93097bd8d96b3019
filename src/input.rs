use crate::level::Direction;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Move(Direction),
    Reset,
    Quit,
}

impl Intent {
    /// Map a key to an intent. WASD and vi keys both move; case is ignored.
    pub fn from_key(key: char) -> Option<Intent> {
        match key.to_ascii_lowercase() {
            'w' | 'k' => Some(Intent::Move(Direction::Up)),
            's' | 'j' => Some(Intent::Move(Direction::Down)),
            'a' | 'h' => Some(Intent::Move(Direction::Left)),
            'd' | 'l' => Some(Intent::Move(Direction::Right)),
            'r' => Some(Intent::Reset),
            'q' => Some(Intent::Quit),
            _ => None,
        }
    }
}

/// Decode every recognised key in `line`, in order. Anything else is skipped.
pub fn parse_intents(line: &str) -> Vec<Intent> {
    line.chars()
        .filter(|ch| !ch.is_whitespace())
        .filter_map(|ch| {
            let intent = Intent::from_key(ch);
            if intent.is_none() {
                debug!("Ignoring key {:?}", ch);
            }
            intent
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key() {
        assert_eq!(Intent::from_key('w'), Some(Intent::Move(Direction::Up)));
        assert_eq!(Intent::from_key('S'), Some(Intent::Move(Direction::Down)));
        assert_eq!(Intent::from_key('h'), Some(Intent::Move(Direction::Left)));
        assert_eq!(Intent::from_key('L'), Some(Intent::Move(Direction::Right)));
        assert_eq!(Intent::from_key('r'), Some(Intent::Reset));
        assert_eq!(Intent::from_key('Q'), Some(Intent::Quit));
        assert_eq!(Intent::from_key('x'), None);
        assert_eq!(Intent::from_key(' '), None);
    }

    #[test]
    fn test_parse_intents() {
        let intents = parse_intents("dd s?a r q\n");
        assert_eq!(
            intents,
            vec![
                Intent::Move(Direction::Right),
                Intent::Move(Direction::Right),
                Intent::Move(Direction::Down),
                Intent::Move(Direction::Left),
                Intent::Reset,
                Intent::Quit,
            ]
        );
        assert!(parse_intents("   \n").is_empty());
    }
}
