//! Maps key-down / key-up signals to player intents and one-shot requests.
//!
//! The mapper knows nothing about terminals; the binary translates raw
//! key events into `KeySignal`s and feeds them in.

use crate::entities::{MoveIntent, TurnIntent};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    TurnLeft,
    TurnRight,
    Forward,
    Backward,
    DropBomb,
    Restart,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeySignal {
    Down(Key),
    Up(Key),
}

/// Everything the game loop needs from input for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn: TurnIntent,
    pub movement: MoveIntent,
    /// At most one drop per tick, however many presses arrived.
    pub drop_bomb: bool,
    /// Any gameplay key was pressed; leaves the on-start state.
    pub start: bool,
    pub restart: bool,
}

#[derive(Debug, Default)]
pub struct InputMapper {
    turn: TurnIntent,
    movement: MoveIntent,
    drop_requested: bool,
    start_requested: bool,
    restart_requested: bool,
    quit_requested: bool,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, signal: KeySignal) {
        match signal {
            KeySignal::Down(key) => {
                match key {
                    Key::TurnLeft => self.turn = TurnIntent::Ccw,
                    Key::TurnRight => self.turn = TurnIntent::Cw,
                    Key::Forward => self.movement = MoveIntent::Forward,
                    Key::Backward => self.movement = MoveIntent::Backward,
                    Key::DropBomb => self.drop_requested = true,
                    Key::Restart => self.restart_requested = true,
                    Key::Quit => self.quit_requested = true,
                }
                if matches!(
                    key,
                    Key::TurnLeft | Key::TurnRight | Key::Forward | Key::Backward | Key::DropBomb
                ) {
                    self.start_requested = true;
                }
            }
            // Releasing a key only cancels the intent it is driving, so
            // rolling from one arrow to the other does not stall.
            KeySignal::Up(key) => match key {
                Key::TurnLeft if self.turn == TurnIntent::Ccw => self.turn = TurnIntent::None,
                Key::TurnRight if self.turn == TurnIntent::Cw => self.turn = TurnIntent::None,
                Key::Forward if self.movement == MoveIntent::Forward => {
                    self.movement = MoveIntent::None
                }
                Key::Backward if self.movement == MoveIntent::Backward => {
                    self.movement = MoveIntent::None
                }
                _ => {}
            },
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Snapshot for the coming tick.  Held intents persist; one-shot
    /// requests are consumed.
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            turn: self.turn,
            movement: self.movement,
            drop_bomb: self.drop_requested,
            start: self.start_requested,
            restart: self.restart_requested,
        };
        self.drop_requested = false;
        self.start_requested = false;
        self.restart_requested = false;
        input
    }
}
