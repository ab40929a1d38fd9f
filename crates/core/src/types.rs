use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
    pub struct RelicId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Wall,
    Floor,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Loading,
    Intro,
    Tutorial,
    Exploring,
    Battling,
}

/// A normalized input signal, independent of whether it came from a key
/// press or a polled gamepad frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    Up,
    Down,
    Left,
    Right,
    Confirm,
}

impl Intent {
    /// Step delta as `(dy, dx)`; `None` for non-directional intents.
    pub fn delta(self) -> Option<(i32, i32)> {
        match self {
            Intent::Up => Some((-1, 0)),
            Intent::Down => Some((1, 0)),
            Intent::Left => Some((0, -1)),
            Intent::Right => Some((0, 1)),
            Intent::Confirm => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnemyKind {
    GloomRat,
    CinderBat,
    HollowHusk,
}

impl EnemyKind {
    pub fn display_name(self) -> &'static str {
        match self {
            EnemyKind::GloomRat => "Gloom Rat",
            EnemyKind::CinderBat => "Cinder Bat",
            EnemyKind::HollowHusk => "Hollow Husk",
        }
    }

    pub fn max_hp(self) -> i32 {
        match self {
            EnemyKind::GloomRat => 4,
            EnemyKind::CinderBat => 5,
            EnemyKind::HollowHusk => 7,
        }
    }

    pub fn attack(self) -> i32 {
        match self {
            EnemyKind::GloomRat => 1,
            EnemyKind::CinderBat => 2,
            EnemyKind::HollowHusk => 3,
        }
    }

    pub fn xp_reward(self) -> u32 {
        match self {
            EnemyKind::GloomRat => 8,
            EnemyKind::CinderBat => 10,
            EnemyKind::HollowHusk => 14,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelicKind {
    EmberCoin,
    BoneIdol,
    GlassShard,
}

impl RelicKind {
    pub fn display_name(self) -> &'static str {
        match self {
            RelicKind::EmberCoin => "Ember Coin",
            RelicKind::BoneIdol => "Bone Idol",
            RelicKind::GlassShard => "Glass Shard",
        }
    }
}

/// What a single resolved step did. Exactly one of these happens per call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Blocked,
    RunEscaped,
    BattleStarted(EnemyId),
    Collected(RelicId),
    Moved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogEvent {
    RunStarted,
    ExitSighted { pos: Pos },
    Moved { to: Pos },
    Blocked,
    RelicCollected { kind: RelicKind },
    BattleStarted { kind: EnemyKind },
    BattleWon { kind: EnemyKind, xp: u32 },
    BattleLost,
    LeveledUp { level: u32 },
    RunEscaped,
}
