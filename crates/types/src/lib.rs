//! Shared types module - piece kinds, phases, actions and gameplay constants
//!
//! Everything here is plain data. The engine, the input mapping and the
//! terminal host all agree on these definitions.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21), of which rows 0-1 are a hidden
//!   spawn buffer and rows 2-21 are the visible play field
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `COUNTDOWN_MS` | 2400 | Pre-game countdown |
//! | `INITIAL_DROP_MS` | 900 | Gravity of a fresh game |
//! | `BASE_DROP_MS` | 1000 | Gravity at level 1 after the first clear |
//! | `DROP_STEP_MS` | 75 | Gravity speed-up per level |
//! | `MIN_DROP_MS` | 90 | Gravity floor |
//! | `SOFT_DROP_MIN_MS` | 60 | Soft drop floor |
//!
//! # Examples
//!
//! ```
//! use neon_tetris_types::{PieceKind, RotateDir, Phase, BOARD_COLS, BOARD_ROWS};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(RotateDir::Cw.step(), 1);
//! assert!(Phase::Playing.is_live());
//! assert_eq!(BOARD_COLS, 10);
//! assert_eq!(BOARD_ROWS, 22);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells
pub const BOARD_COLS: usize = 10;

/// Board height in cells, hidden buffer included
pub const BOARD_ROWS: usize = 22;

/// Rows shown to the player
pub const VISIBLE_ROWS: usize = 20;

/// Rows above the visible field
pub const HIDDEN_ROWS: usize = BOARD_ROWS - VISIBLE_ROWS;

/// Pre-game countdown before pieces start to fall
pub const COUNTDOWN_MS: u64 = 2400;

/// Drop interval of a fresh game (before any line has been cleared)
pub const INITIAL_DROP_MS: u32 = 900;

/// Drop interval at level 1 once levels are being computed
pub const BASE_DROP_MS: u32 = 1000;

/// Drop interval reduction per level
pub const DROP_STEP_MS: u32 = 75;

/// Fastest natural drop interval
pub const MIN_DROP_MS: u32 = 90;

/// Fastest soft drop interval
pub const SOFT_DROP_MIN_MS: u32 = 60;

/// Soft drop runs at 1/5 (20%) of the current drop interval
pub const SOFT_DROP_DIVISOR: u32 = 5;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Base points for clearing N rows at once, multiplied by the level
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Combo bonus per combo step per cleared row
pub const COMBO_BONUS: u32 = 25;

/// Upcoming pieces guaranteed to be visible in the queue
pub const QUEUE_PREVIEW: usize = 5;

/// Horizontal offsets tried, in order, when a rotation is blocked
pub const KICK_OFFSETS: [i32; 5] = [0, -1, 1, -2, 2];

/// Number of distinct piece kinds (one bag)
pub const BAG_SIZE: usize = 7;


/// The seven piece kinds, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind exactly once; the contents of one bag
    pub const ALL: [PieceKind; BAG_SIZE] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use neon_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("I"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("q"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Position in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Horizontal shift direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column delta (-1 or +1)
    pub fn dx(&self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Rotation direction
///
/// - **Cw**: next rotation state (+1)
/// - **Ccw**: previous rotation state (-1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotateDir {
    Cw,
    Ccw,
}

impl RotateDir {
    pub fn step(&self) -> i32 {
        match self {
            RotateDir::Cw => 1,
            RotateDir::Ccw => -1,
        }
    }

    /// Advance `index` by one step, wrapping both ways within `count` states
    ///
    /// ```
    /// use neon_tetris_types::RotateDir;
    ///
    /// assert_eq!(RotateDir::Cw.apply(3, 4), 0);
    /// assert_eq!(RotateDir::Ccw.apply(0, 4), 3);
    /// assert_eq!(RotateDir::Cw.apply(0, 1), 0);
    /// ```
    pub fn apply(&self, index: usize, count: usize) -> usize {
        let count = count.max(1);
        match self {
            RotateDir::Cw => (index + 1) % count,
            RotateDir::Ccw => (index + count - 1) % count,
        }
    }
}

/// Overall game phase
///
/// `Intro → Countdown → Playing ⇄ Paused`, and `Playing → Over` on top-out.
/// `start_game` leaves any phase for `Countdown` or `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Intro,
    Countdown,
    Playing,
    Paused,
    Over,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Intro => "intro",
            Phase::Countdown => "countdown",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::Over => "over",
        }
    }

    /// A session is in progress (not waiting to be started)
    pub fn is_live(&self) -> bool {
        matches!(self, Phase::Countdown | Phase::Playing | Phase::Paused)
    }
}

/// Commands accepted by the game state machine
///
/// Produced by keyboard and touch mapping; applied with
/// `GameState::apply_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    RotateCw,
    RotateCcw,
    /// Soft drop input pressed (held until `SoftDropStop`)
    SoftDropStart,
    SoftDropStop,
    HardDrop,
    Hold,
    /// Pause while playing, resume while paused
    TogglePause,
    /// Start a new session with the countdown
    Start,
}

impl GameAction {
    /// Parse an action name (case-insensitive, camelCase or lowercase)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "softdropstart" => Some(GameAction::SoftDropStart),
            "softdropstop" => Some(GameAction::SoftDropStop),
            "harddrop" => Some(GameAction::HardDrop),
            "hold" => Some(GameAction::Hold),
            "togglepause" => Some(GameAction::TogglePause),
            "start" => Some(GameAction::Start),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::SoftDropStart => "softDropStart",
            GameAction::SoftDropStop => "softDropStop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Hold => "hold",
            GameAction::TogglePause => "togglePause",
            GameAction::Start => "start",
        }
    }
}

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal
    pub const fn hex(v: u32) -> Self {
        Self {
            r: ((v >> 16) & 0xff) as u8,
            g: ((v >> 8) & 0xff) as u8,
            b: (v & 0xff) as u8,
        }
    }

    /// Linear blend toward `other`; `t` is clamped to 0.0..=1.0
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }
}
