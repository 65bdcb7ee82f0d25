// src/selection_logic.rs
// Pure selection state, no druid types in here so it can be driven from tests.

use log::{debug, info};

use crate::config::MaskDefaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// 矩形选区结构体, always normalized (non-negative size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl SelectionRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Normalizes two drag corners: origin is the componentwise minimum,
    /// size the absolute difference.
    pub fn from_corners(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: a.x.abs_diff(b.x),
            height: a.y.abs_diff(b.y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Moves the origin only. Screen edges are not enforced.
    pub fn nudge(self, direction: Direction, step: i32) -> Self {
        let (dx, dy) = match direction {
            Direction::Up => (0, -step),
            Direction::Down => (0, step),
            Direction::Left => (-step, 0),
            Direction::Right => (step, 0),
        };
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }
}

/// Everything the selection overlay can feed into its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionInput {
    Press(ScreenPoint),
    Move(ScreenPoint),
    Release,
    /// Answer from the modal confirmation prompt.
    Answer(bool),
    Nudge(Direction),
    CloseRequested,
}

/// What the overlay has to do after an input was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Unchanged,
    Redraw,
    AskConfirmation(SelectionRect),
    VetoClose,
    AllowClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Dragging {
        anchor: ScreenPoint,
        rect: SelectionRect,
    },
    PendingConfirm {
        rect: SelectionRect,
    },
    Confirmed {
        rect: SelectionRect,
    },
}

impl SelectionState {
    pub fn new() -> Self {
        SelectionState::Idle
    }

    pub fn rect(&self) -> Option<SelectionRect> {
        match *self {
            SelectionState::Idle => None,
            SelectionState::Dragging { rect, .. }
            | SelectionState::PendingConfirm { rect }
            | SelectionState::Confirmed { rect } => Some(rect),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, SelectionState::Confirmed { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            SelectionState::Idle => "idle",
            SelectionState::Dragging { .. } => "dragging",
            SelectionState::PendingConfirm { .. } => "pending-confirm",
            SelectionState::Confirmed { .. } => "confirmed",
        }
    }

    /// The single transition function. Inputs that make no sense in the
    /// current state are dropped and reported as `Unchanged`.
    pub fn handle(&mut self, input: SelectionInput) -> Reaction {
        let before = self.name();
        let reaction = match (*self, input) {
            (SelectionState::Idle | SelectionState::Dragging { .. }, SelectionInput::Press(p)) => {
                *self = SelectionState::Dragging {
                    anchor: p,
                    rect: SelectionRect::new(p.x, p.y, 0, 0),
                };
                Reaction::Redraw
            }
            (SelectionState::Dragging { anchor, .. }, SelectionInput::Move(p)) => {
                *self = SelectionState::Dragging {
                    anchor,
                    rect: SelectionRect::from_corners(anchor, p),
                };
                Reaction::Redraw
            }
            (SelectionState::Dragging { rect, .. }, SelectionInput::Release) => {
                *self = SelectionState::PendingConfirm { rect };
                Reaction::AskConfirmation(rect)
            }
            (SelectionState::PendingConfirm { rect }, SelectionInput::Answer(true)) => {
                info!("Selection confirmed: {:?}", rect);
                *self = SelectionState::Confirmed { rect };
                Reaction::Redraw
            }
            (SelectionState::PendingConfirm { .. }, SelectionInput::Answer(false)) => {
                info!("Selection rejected, back to idle");
                *self = SelectionState::Idle;
                Reaction::Redraw
            }
            (state, SelectionInput::Nudge(direction)) => match state.nudged(direction) {
                Some(next) => {
                    *self = next;
                    Reaction::Redraw
                }
                None => Reaction::Unchanged,
            },
            (state, SelectionInput::CloseRequested) => {
                if state.is_confirmed() {
                    Reaction::AllowClose
                } else {
                    Reaction::VetoClose
                }
            }
            _ => Reaction::Unchanged,
        };
        if reaction != Reaction::Unchanged {
            debug!("{:?} in {} -> {} ({:?})", input, before, self.name(), reaction);
        }
        reaction
    }

    fn nudged(self, direction: Direction) -> Option<Self> {
        let step = MaskDefaults::NUDGE_STEP;
        match self {
            SelectionState::Idle => None,
            SelectionState::Dragging { anchor, rect } => Some(SelectionState::Dragging {
                anchor,
                rect: rect.nudge(direction, step),
            }),
            SelectionState::PendingConfirm { rect } => Some(SelectionState::PendingConfirm {
                rect: rect.nudge(direction, step),
            }),
            SelectionState::Confirmed { rect } => Some(SelectionState::Confirmed {
                rect: rect.nudge(direction, step),
            }),
        }
    }
}
