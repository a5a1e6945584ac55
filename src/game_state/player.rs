//! Players and the two-slot handle the game uses to name them.

use std::fmt;

use crate::engines::engine_trait::SharedEngine;
use crate::game_state::chess_types::Color;

/// Which of the game's two players. The opponent of a slot is `other()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    First,
    Second,
}

impl PlayerSlot {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PlayerSlot::First => 0,
            PlayerSlot::Second => 1,
        }
    }

    #[inline]
    pub const fn other(self) -> Self {
        match self {
            PlayerSlot::First => PlayerSlot::Second,
            PlayerSlot::Second => PlayerSlot::First,
        }
    }
}

/// A side of the game, optionally driven by an engine.
#[derive(Clone)]
pub struct Player {
    color: Color,
    engine: Option<SharedEngine>,
}

impl Player {
    pub fn human(color: Color) -> Self {
        Self {
            color,
            engine: None,
        }
    }

    pub fn with_engine(color: Color, engine: SharedEngine) -> Self {
        Self {
            color,
            engine: Some(engine),
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn engine(&self) -> Option<&SharedEngine> {
        self.engine.as_ref()
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("color", &self.color)
            .field("engine", &self.engine.as_ref().map(|e| e.name()))
            .finish()
    }
}
