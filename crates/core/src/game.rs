use slotmap::SlotMap;

use crate::battle::{
    BattleAction, BattleEvent, BattleSession, ENEMY_TURN_DELAY_MS, TurnPhase, WASTED_TURN_DELAY_MS,
};
use crate::input::{PadContext, PadLatches, PadSnapshot, decode_pad};
use crate::mapgen::{self, EnemySpawn, GeneratedMap, RelicSpawn};
use crate::progression;
use crate::state::{Enemy, GameState, Map, Player, Relic};
use crate::types::*;

pub const LOADING_DELAY_MS: u32 = 3000;
const LOG_MAX_ENTRIES: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroOption {
    StartGame,
    ViewTutorial,
    Quit,
}

impl IntroOption {
    pub const MENU: [IntroOption; 3] =
        [IntroOption::StartGame, IntroOption::ViewTutorial, IntroOption::Quit];

    pub fn label(self) -> &'static str {
        match self {
            IntroOption::StartGame => "Start Game",
            IntroOption::ViewTutorial => "View Tutorial",
            IntroOption::Quit => "Quit",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TutorialOption {
    Begin,
    Back,
}

impl TutorialOption {
    pub const MENU: [TutorialOption; 2] = [TutorialOption::Begin, TutorialOption::Back];

    pub fn label(self) -> &'static str {
        match self {
            TutorialOption::Begin => "Begin the Descent",
            TutorialOption::Back => "Back to Start Menu",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScheduledEvent {
    ShowIntro,
    EnemyTurn { enemy: EnemyId },
}

/// A single deferred callback. Dropping it (setting the slot to `None`)
/// cancels it; every firing re-checks the state it is about to mutate.
#[derive(Clone, Copy, Debug)]
struct Scheduled {
    remaining_ms: u32,
    event: ScheduledEvent,
}

pub struct Game {
    seed: u64,
    screen: Screen,
    state: GameState,
    battle: Option<BattleSession>,
    battle_event: Option<BattleEvent>,
    log: Vec<LogEvent>,
    intro_index: usize,
    tutorial_index: usize,
    runs_started: u32,
    pending: Option<Scheduled>,
    latches: PadLatches,
    quit_requested: bool,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        let generated = mapgen::generate_map(seed, 0);
        let state = GameState {
            map: Map::from_tiles(generated.width, generated.height, generated.tiles.clone()),
            player: Player::new_at(generated.player_start),
            enemies: spawn_enemies(&generated.enemy_spawns),
            relics: spawn_relics(&generated.relic_spawns),
        };

        Self {
            seed,
            screen: Screen::Loading,
            state,
            battle: None,
            battle_event: None,
            log: Vec::new(),
            intro_index: 0,
            tutorial_index: 0,
            runs_started: 0,
            pending: Some(Scheduled {
                remaining_ms: LOADING_DELAY_MS,
                event: ScheduledEvent::ShowIntro,
            }),
            latches: PadLatches::default(),
            quit_requested: false,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Newest entry first.
    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn battle(&self) -> Option<&BattleSession> {
        self.battle.as_ref()
    }

    pub fn battle_event(&self) -> Option<BattleEvent> {
        self.battle_event
    }

    pub fn intro_index(&self) -> usize {
        self.intro_index
    }

    pub fn tutorial_index(&self) -> usize {
        self.tutorial_index
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Route one discrete key intent. Key events arrive once per physical
    /// press, so they bypass the pad debounce entirely.
    pub fn handle_key(&mut self, intent: Intent) {
        self.route_intent(intent);
    }

    /// Route one polled gamepad frame through the context debounce for the
    /// current screen. Frames that arrive in a context with no live input
    /// (loading, enemy resolution) are ignored outright.
    pub fn handle_pad(&mut self, snapshot: &PadSnapshot) {
        let context = match self.screen {
            Screen::Intro | Screen::Tutorial => Some(PadContext::Menu),
            Screen::Exploring => Some(PadContext::Explore),
            Screen::Battling => {
                let accepting = self
                    .battle
                    .as_ref()
                    .is_some_and(|battle| battle.phase == TurnPhase::PlayerAction);
                accepting.then_some(PadContext::Battle)
            }
            Screen::Loading => None,
        };
        let Some(context) = context else {
            return;
        };
        if let Some(intent) = decode_pad(snapshot, context, &mut self.latches) {
            self.route_intent(intent);
        }
    }

    /// Advance the deferred-callback clock. Firing is guarded: a callback
    /// whose owning state has moved on does nothing.
    pub fn advance_time(&mut self, elapsed_ms: u32) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        if pending.remaining_ms > elapsed_ms {
            pending.remaining_ms -= elapsed_ms;
            return;
        }
        let event = pending.event;
        self.pending = None;
        match event {
            ScheduledEvent::ShowIntro => {
                if self.screen == Screen::Loading {
                    self.screen = Screen::Intro;
                }
            }
            ScheduledEvent::EnemyTurn { enemy } => self.resolve_enemy_turn(enemy),
        }
    }

    pub fn snapshot_hash(&self) -> u64 {
        use std::hash::Hasher;
        use xxhash_rust::xxh3::Xxh3;

        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u32(self.runs_started);
        hasher.write_u8(screen_code(self.screen));

        let player = &self.state.player;
        hasher.write_i32(player.pos.y);
        hasher.write_i32(player.pos.x);
        hasher.write_i32(player.hp);
        hasher.write_i32(player.max_hp);
        hasher.write_i32(player.attack);
        hasher.write_u32(player.level);
        hasher.write_u32(player.xp);

        for (_, enemy) in &self.state.enemies {
            hasher.write_i32(enemy.pos.y);
            hasher.write_i32(enemy.pos.x);
            hasher.write_i32(enemy.hp);
        }
        hasher.write_usize(self.state.relics.len());

        if let Some(battle) = &self.battle {
            hasher.write_u8(1);
            hasher.write_usize(battle.menu_index);
            hasher.write_u8(match battle.phase {
                TurnPhase::PlayerAction => 0,
                TurnPhase::EnemyResolution => 1,
            });
        }

        hasher.finish()
    }

    fn route_intent(&mut self, intent: Intent) {
        match self.screen {
            Screen::Loading => {}
            Screen::Intro => self.intro_input(intent),
            Screen::Tutorial => self.tutorial_input(intent),
            Screen::Exploring => {
                if let Some((dy, dx)) = intent.delta() {
                    self.move_player(dy, dx);
                }
            }
            Screen::Battling => self.battle_input(intent),
        }
    }

    fn intro_input(&mut self, intent: Intent) {
        match intent {
            Intent::Up => self.intro_index = cycle(self.intro_index, IntroOption::MENU.len(), -1),
            Intent::Down => self.intro_index = cycle(self.intro_index, IntroOption::MENU.len(), 1),
            Intent::Confirm => match IntroOption::MENU[self.intro_index] {
                IntroOption::StartGame => self.start_run(),
                IntroOption::ViewTutorial => {
                    self.screen = Screen::Tutorial;
                    self.tutorial_index = 0;
                }
                IntroOption::Quit => self.quit_requested = true,
            },
            Intent::Left | Intent::Right => {}
        }
    }

    fn tutorial_input(&mut self, intent: Intent) {
        match intent {
            Intent::Up => {
                self.tutorial_index = cycle(self.tutorial_index, TutorialOption::MENU.len(), -1);
            }
            Intent::Down => {
                self.tutorial_index = cycle(self.tutorial_index, TutorialOption::MENU.len(), 1);
            }
            Intent::Confirm => match TutorialOption::MENU[self.tutorial_index] {
                TutorialOption::Begin => self.start_run(),
                TutorialOption::Back => {
                    self.screen = Screen::Intro;
                    // Land back on the entry that opened the tutorial.
                    self.intro_index = 1;
                }
            },
            Intent::Left | Intent::Right => {}
        }
    }

    /// Regenerate the world and enter it. Hit points refill; level,
    /// experience, and attack carry over from earlier runs this session.
    fn start_run(&mut self) {
        self.runs_started += 1;
        let generated = mapgen::generate_map(self.seed, self.runs_started);
        self.install_world(&generated);
        self.state.player.hp = self.state.player.max_hp;
        self.battle = None;
        self.battle_event = None;
        self.pending = None;
        self.screen = Screen::Exploring;
        self.push_log(LogEvent::RunStarted);
        if let Some(pos) = generated.exit {
            self.push_log(LogEvent::ExitSighted { pos });
        }
    }

    fn install_world(&mut self, generated: &GeneratedMap) {
        self.state.map =
            Map::from_tiles(generated.width, generated.height, generated.tiles.clone());
        self.state.player.pos = generated.player_start;
        self.state.enemies = spawn_enemies(&generated.enemy_spawns);
        self.state.relics = spawn_relics(&generated.relic_spawns);
    }

    /// Resolve one proposed step. The four possible reactions are checked
    /// in strict priority order and exactly one of them happens.
    pub fn move_player(&mut self, dy: i32, dx: i32) -> MoveOutcome {
        let player_pos = self.state.player.pos;
        let target = Pos { y: player_pos.y + dy, x: player_pos.x + dx };

        if !self.state.map.is_walkable(target) {
            self.push_log(LogEvent::Blocked);
            return MoveOutcome::Blocked;
        }

        if self.state.map.tile_at(target) == TileKind::Exit {
            // The exit replaced its tile at generation time, so it wins
            // over any entity scan at the same cell. The player never
            // actually steps onto it.
            self.push_log(LogEvent::RunEscaped);
            self.end_run();
            return MoveOutcome::RunEscaped;
        }

        if let Some(enemy) = self.state.living_enemy_at(target) {
            self.begin_battle(enemy);
            return MoveOutcome::BattleStarted(enemy);
        }

        if let Some(relic) = self.state.relic_at(target) {
            if let Some(removed) = self.state.relics.remove(relic) {
                self.push_log(LogEvent::RelicCollected { kind: removed.kind });
            }
            self.state.player.pos = target;
            self.push_log(LogEvent::Moved { to: target });
            return MoveOutcome::Collected(relic);
        }

        self.state.player.pos = target;
        self.push_log(LogEvent::Moved { to: target });
        MoveOutcome::Moved
    }

    fn end_run(&mut self) {
        self.battle = None;
        self.battle_event = None;
        self.pending = None;
        self.screen = Screen::Intro;
    }

    fn begin_battle(&mut self, enemy_id: EnemyId) {
        let Some(enemy) = self.state.enemies.get(enemy_id) else {
            return;
        };
        let kind = enemy.kind;
        self.battle = Some(BattleSession::new(enemy_id));
        self.battle_event = Some(BattleEvent::Encounter { kind });
        self.screen = Screen::Battling;
        self.push_log(LogEvent::BattleStarted { kind });
    }

    fn battle_input(&mut self, intent: Intent) {
        let Some(phase) = self.battle.as_ref().map(|battle| battle.phase) else {
            return;
        };
        if phase != TurnPhase::PlayerAction {
            return;
        }
        if intent == Intent::Confirm {
            self.execute_battle_action();
        } else if let Some(battle) = self.battle.as_mut() {
            battle.navigate(intent);
        }
    }

    fn execute_battle_action(&mut self) {
        let Some(battle) = self.battle.as_mut() else {
            return;
        };
        let action = battle.selected_action();
        let enemy_id = battle.enemy;
        battle.phase = TurnPhase::EnemyResolution;

        if action != BattleAction::Attack {
            self.battle_event = Some(BattleEvent::TurnWasted { action });
            self.pending = Some(Scheduled {
                remaining_ms: WASTED_TURN_DELAY_MS,
                event: ScheduledEvent::EnemyTurn { enemy: enemy_id },
            });
            return;
        }

        let damage = self.state.player.attack;
        let Some(enemy) = self.state.enemies.get_mut(enemy_id) else {
            return;
        };
        enemy.hp = (enemy.hp - damage).max(0);
        let kind = enemy.kind;
        let xp = enemy.xp_reward;
        let defeated = enemy.hp == 0;
        self.battle_event = Some(BattleEvent::PlayerHit { kind, damage });

        if defeated {
            self.win_battle(kind, xp);
        } else {
            self.pending = Some(Scheduled {
                remaining_ms: ENEMY_TURN_DELAY_MS,
                event: ScheduledEvent::EnemyTurn { enemy: enemy_id },
            });
        }
    }

    /// The deferred half of a battle round. Every guard here exists
    /// because the world may have moved on between scheduling and firing.
    fn resolve_enemy_turn(&mut self, enemy_id: EnemyId) {
        if self.screen != Screen::Battling {
            return;
        }
        let Some(battle) = self.battle.as_ref() else {
            return;
        };
        if battle.enemy != enemy_id || battle.phase != TurnPhase::EnemyResolution {
            return;
        }
        let Some(enemy) = self.state.enemies.get(enemy_id) else {
            return;
        };
        if !enemy.is_alive() {
            return;
        }

        let kind = enemy.kind;
        let damage = enemy.attack;
        let player = &mut self.state.player;
        player.hp = (player.hp - damage).max(0);
        self.battle_event = Some(BattleEvent::EnemyHit { kind, damage });

        if self.state.player.hp == 0 {
            // Soft reset: refill hp, keep everything else as it stands.
            self.state.player.hp = self.state.player.max_hp;
            self.push_log(LogEvent::BattleLost);
            self.battle_event = Some(BattleEvent::Lost);
            self.finish_battle();
        } else if let Some(battle) = self.battle.as_mut() {
            battle.phase = TurnPhase::PlayerAction;
        }
    }

    fn win_battle(&mut self, kind: EnemyKind, xp: u32) {
        let levels_gained = progression::grant_xp(&mut self.state.player, xp);
        self.push_log(LogEvent::BattleWon { kind, xp });
        let final_level = self.state.player.level;
        for step in 0..levels_gained {
            self.push_log(LogEvent::LeveledUp { level: final_level - levels_gained + step + 1 });
        }
        self.battle_event = Some(BattleEvent::Won { kind, xp });
        self.finish_battle();
    }

    /// Leaving the battle clears the session and any pending enemy turn,
    /// which is what makes a stale deferred callback a no-op.
    fn finish_battle(&mut self) {
        self.battle = None;
        self.pending = None;
        self.screen = Screen::Exploring;
    }

    fn push_log(&mut self, event: LogEvent) {
        self.log.insert(0, event);
        self.log.truncate(LOG_MAX_ENTRIES);
    }
}

fn cycle(index: usize, len: usize, step: i32) -> usize {
    ((index as i32 + step).rem_euclid(len as i32)) as usize
}

fn screen_code(screen: Screen) -> u8 {
    match screen {
        Screen::Loading => 0,
        Screen::Intro => 1,
        Screen::Tutorial => 2,
        Screen::Exploring => 3,
        Screen::Battling => 4,
    }
}

fn spawn_enemies(spawns: &[EnemySpawn]) -> SlotMap<EnemyId, Enemy> {
    let mut enemies = SlotMap::with_key();
    for spawn in spawns {
        let id = enemies.insert(Enemy::spawn(spawn.kind, spawn.pos));
        enemies[id].id = id;
    }
    enemies
}

fn spawn_relics(spawns: &[RelicSpawn]) -> SlotMap<RelicId, Relic> {
    let mut relics = SlotMap::with_key();
    for spawn in spawns {
        let id = relics.insert(Relic { id: RelicId::default(), kind: spawn.kind, pos: spawn.pos });
        relics[id].id = id;
    }
    relics
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An 8x8 arena with a fully open interior, an exit at (1, 1), and the
    /// player at (3, 3). Loading is already over.
    fn open_world() -> Game {
        let mut game = Game::new(4_242);
        let width = 8;
        let height = 8;
        let mut tiles = vec![TileKind::Wall; width * height];
        for y in 1..(height - 1) {
            for x in 1..(width - 1) {
                tiles[y * width + x] = TileKind::Floor;
            }
        }
        tiles[width + 1] = TileKind::Exit;

        game.state.map = Map::from_tiles(width, height, tiles);
        game.state.player = Player::new_at(Pos { y: 3, x: 3 });
        game.state.enemies = SlotMap::with_key();
        game.state.relics = SlotMap::with_key();
        game.screen = Screen::Exploring;
        game.pending = None;
        game.log.clear();
        game
    }

    fn add_enemy(game: &mut Game, kind: EnemyKind, pos: Pos) -> EnemyId {
        let id = game.state.enemies.insert(Enemy::spawn(kind, pos));
        game.state.enemies[id].id = id;
        id
    }

    fn add_relic(game: &mut Game, kind: RelicKind, pos: Pos) -> RelicId {
        let id = game.state.relics.insert(Relic { id: RelicId::default(), kind, pos });
        game.state.relics[id].id = id;
        id
    }

    fn held_right() -> PadSnapshot {
        PadSnapshot { dpad_right: true, ..PadSnapshot::default() }
    }

    fn confirm_pad() -> PadSnapshot {
        PadSnapshot { confirm_south: true, ..PadSnapshot::default() }
    }

    #[test]
    fn loading_hands_off_to_intro_after_the_delay() {
        let mut game = Game::new(1);
        assert_eq!(game.screen(), Screen::Loading);
        game.advance_time(LOADING_DELAY_MS - 1);
        assert_eq!(game.screen(), Screen::Loading);
        game.advance_time(1);
        assert_eq!(game.screen(), Screen::Intro);
    }

    #[test]
    fn directional_input_during_loading_is_dropped() {
        let mut game = Game::new(1);
        let before = game.snapshot_hash();
        game.handle_key(Intent::Down);
        game.handle_key(Intent::Confirm);
        assert_eq!(game.snapshot_hash(), before);
    }

    #[test]
    fn blocked_step_changes_nothing_but_the_log() {
        let mut game = open_world();
        game.state.player.pos = Pos { y: 1, x: 3 };

        let outcome = game.move_player(-1, 0);

        assert_eq!(outcome, MoveOutcome::Blocked);
        assert_eq!(game.state.player.pos, Pos { y: 1, x: 3 });
        assert_eq!(game.log()[0], LogEvent::Blocked);
        assert_eq!(game.screen(), Screen::Exploring);
    }

    #[test]
    fn exit_tile_ends_the_run_without_stepping_onto_it() {
        let mut game = open_world();
        game.state.player.pos = Pos { y: 2, x: 1 };

        let outcome = game.move_player(-1, 0);

        assert_eq!(outcome, MoveOutcome::RunEscaped);
        assert_eq!(game.screen(), Screen::Intro);
        assert_eq!(game.state.player.pos, Pos { y: 2, x: 1 });
        assert_eq!(game.log()[0], LogEvent::RunEscaped);
    }

    #[test]
    fn living_enemy_blocks_the_step_and_starts_a_battle() {
        let mut game = open_world();
        let enemy = add_enemy(&mut game, EnemyKind::CinderBat, Pos { y: 3, x: 4 });

        let outcome = game.move_player(0, 1);

        assert_eq!(outcome, MoveOutcome::BattleStarted(enemy));
        assert_eq!(game.state.player.pos, Pos { y: 3, x: 3 });
        assert_eq!(game.screen(), Screen::Battling);
        let battle = game.battle().expect("battle session");
        assert_eq!(battle.enemy, enemy);
        assert_eq!(battle.phase, TurnPhase::PlayerAction);
        assert_eq!(battle.menu_index, 0);
        assert_eq!(
            game.battle_event(),
            Some(BattleEvent::Encounter { kind: EnemyKind::CinderBat })
        );
    }

    #[test]
    fn defeated_enemy_never_retriggers_a_battle() {
        let mut game = open_world();
        let enemy = add_enemy(&mut game, EnemyKind::GloomRat, Pos { y: 3, x: 4 });
        game.state.enemies[enemy].hp = 0;

        let outcome = game.move_player(0, 1);

        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(game.state.player.pos, Pos { y: 3, x: 4 });
        assert_eq!(game.screen(), Screen::Exploring);
        assert!(game.state.enemies.contains_key(enemy), "defeated record persists");
    }

    #[test]
    fn relic_is_collected_and_the_move_applies() {
        let mut game = open_world();
        let relic = add_relic(&mut game, RelicKind::BoneIdol, Pos { y: 3, x: 4 });

        let outcome = game.move_player(0, 1);

        assert_eq!(outcome, MoveOutcome::Collected(relic));
        assert_eq!(game.state.player.pos, Pos { y: 3, x: 4 });
        assert!(game.state.relics.is_empty());
        assert!(
            game.log().contains(&LogEvent::RelicCollected { kind: RelicKind::BoneIdol }),
            "collection should be logged"
        );
    }

    #[test]
    fn attack_damage_is_exact_and_the_second_hit_wins() {
        let mut game = open_world();
        let enemy = add_enemy(&mut game, EnemyKind::CinderBat, Pos { y: 3, x: 4 });
        game.move_player(0, 1);

        // First attack: 5 hp - 3 = 2, enemy answers after the delay.
        game.handle_key(Intent::Confirm);
        assert_eq!(game.state.enemies[enemy].hp, 2);
        assert_eq!(game.battle().expect("session").phase, TurnPhase::EnemyResolution);
        game.advance_time(ENEMY_TURN_DELAY_MS);
        assert_eq!(game.state.player.hp, 8);
        assert_eq!(game.battle().expect("session").phase, TurnPhase::PlayerAction);

        // Second attack: 2 hp - 3 clamps to 0 and wins the battle.
        game.handle_key(Intent::Confirm);
        assert_eq!(game.state.enemies[enemy].hp, 0);
        assert_eq!(game.screen(), Screen::Exploring);
        assert!(game.battle().is_none());
        assert!(game.log().contains(&LogEvent::BattleWon { kind: EnemyKind::CinderBat, xp: 10 }));
        // 10 xp meets the first threshold exactly.
        assert_eq!(game.state.player.level, 2);
        assert!(game.log().contains(&LogEvent::LeveledUp { level: 2 }));
    }

    #[test]
    fn wasted_turn_consumes_the_round_without_damage() {
        let mut game = open_world();
        let enemy = add_enemy(&mut game, EnemyKind::CinderBat, Pos { y: 3, x: 4 });
        game.move_player(0, 1);

        game.handle_key(Intent::Down); // cursor onto Guard
        game.handle_key(Intent::Confirm);

        assert_eq!(game.state.enemies[enemy].hp, 5);
        assert_eq!(
            game.battle_event(),
            Some(BattleEvent::TurnWasted { action: BattleAction::Guard })
        );

        game.advance_time(WASTED_TURN_DELAY_MS - 1);
        assert_eq!(game.state.player.hp, 10);
        game.advance_time(1);
        assert_eq!(game.state.player.hp, 8);
    }

    #[test]
    fn loss_restores_hp_and_leaves_the_world_alone() {
        let mut game = open_world();
        let enemy = add_enemy(&mut game, EnemyKind::CinderBat, Pos { y: 3, x: 4 });
        add_relic(&mut game, RelicKind::EmberCoin, Pos { y: 5, x: 5 });
        game.state.player.hp = 2;
        game.move_player(0, 1);

        game.handle_key(Intent::Confirm);
        game.advance_time(ENEMY_TURN_DELAY_MS);

        assert_eq!(game.state.player.hp, game.state.player.max_hp);
        assert_eq!(game.screen(), Screen::Exploring);
        assert!(game.battle().is_none());
        assert_eq!(game.state.player.pos, Pos { y: 3, x: 3 });
        assert_eq!(game.state.relics.len(), 1);
        assert_eq!(game.state.enemies[enemy].hp, 2, "enemy keeps its battle damage");
        assert!(game.log().contains(&LogEvent::BattleLost));
    }

    #[test]
    fn killing_blow_cancels_the_scheduled_enemy_turn() {
        let mut game = open_world();
        let enemy = add_enemy(&mut game, EnemyKind::GloomRat, Pos { y: 3, x: 4 });
        game.state.enemies[enemy].hp = 3;
        game.move_player(0, 1);

        game.handle_key(Intent::Confirm);
        assert_eq!(game.screen(), Screen::Exploring);

        let hp_before = game.state.player.hp;
        game.advance_time(10_000);
        assert_eq!(game.state.player.hp, hp_before, "stale enemy turn must not fire");
    }

    #[test]
    fn stale_enemy_turn_after_manual_battle_end_is_a_noop() {
        let mut game = open_world();
        add_enemy(&mut game, EnemyKind::HollowHusk, Pos { y: 3, x: 4 });
        game.move_player(0, 1);
        game.handle_key(Intent::Confirm);
        assert!(game.pending.is_some());

        let stale = game.pending.take().map(|scheduled| scheduled.event);
        game.finish_battle();
        game.pending = stale.map(|event| Scheduled { remaining_ms: 1, event });

        let hp_before = game.state.player.hp;
        game.advance_time(5);
        assert_eq!(game.state.player.hp, hp_before);
        assert_eq!(game.screen(), Screen::Exploring);
    }

    #[test]
    fn battle_navigation_is_ignored_while_the_enemy_resolves() {
        let mut game = open_world();
        add_enemy(&mut game, EnemyKind::HollowHusk, Pos { y: 3, x: 4 });
        game.move_player(0, 1);
        game.handle_key(Intent::Confirm);

        game.handle_key(Intent::Down);
        assert_eq!(game.battle().expect("session").menu_index, 0);
        game.handle_key(Intent::Confirm);
        // Still exactly one pending enemy turn; confirm did not re-fire.
        assert_eq!(game.state.enemies.values().next().expect("enemy").hp, 4);
    }

    #[test]
    fn intro_menu_cycles_and_opens_the_tutorial() {
        let mut game = Game::new(7);
        game.advance_time(LOADING_DELAY_MS);

        game.handle_key(Intent::Up);
        assert_eq!(game.intro_index(), 2);
        game.handle_key(Intent::Down);
        assert_eq!(game.intro_index(), 0);

        game.handle_key(Intent::Down);
        game.handle_key(Intent::Confirm);
        assert_eq!(game.screen(), Screen::Tutorial);
        assert_eq!(game.tutorial_index(), 0);

        // Back lands the intro cursor on the tutorial entry.
        game.handle_key(Intent::Down);
        game.handle_key(Intent::Confirm);
        assert_eq!(game.screen(), Screen::Intro);
        assert_eq!(game.intro_index(), 1);
    }

    #[test]
    fn quit_option_raises_the_flag() {
        let mut game = Game::new(7);
        game.advance_time(LOADING_DELAY_MS);
        game.handle_key(Intent::Up);
        game.handle_key(Intent::Confirm);
        assert!(game.quit_requested());
    }

    #[test]
    fn starting_a_run_soft_resets_and_keeps_progression() {
        let mut game = Game::new(7);
        game.advance_time(LOADING_DELAY_MS);
        game.state.player.level = 3;
        game.state.player.attack = 5;
        game.state.player.max_hp = 16;
        game.state.player.hp = 4;

        game.handle_key(Intent::Confirm); // Start Game

        assert_eq!(game.screen(), Screen::Exploring);
        assert_eq!(game.runs_started, 1);
        assert_eq!(game.state.player.hp, 16);
        assert_eq!(game.state.player.level, 3);
        assert_eq!(game.state.player.attack, 5);
        assert!(game.log().contains(&LogEvent::RunStarted));
    }

    #[test]
    fn successive_runs_use_different_maps() {
        let mut game = Game::new(7);
        game.advance_time(LOADING_DELAY_MS);
        game.handle_key(Intent::Confirm);
        let first = game.state.map.tiles.clone();

        game.screen = Screen::Intro;
        game.handle_key(Intent::Confirm);
        let second = game.state.map.tiles.clone();

        assert_ne!(first, second);
    }

    #[test]
    fn held_pad_direction_moves_exactly_once_until_neutral() {
        let mut game = open_world();
        let held = held_right();

        for _ in 0..4 {
            game.handle_pad(&held);
        }
        assert_eq!(game.state.player.pos, Pos { y: 3, x: 4 });

        game.handle_pad(&PadSnapshot::default());
        game.handle_pad(&held);
        assert_eq!(game.state.player.pos, Pos { y: 3, x: 5 });
    }

    #[test]
    fn pad_confirm_is_dropped_during_enemy_resolution() {
        let mut game = open_world();
        let enemy = add_enemy(&mut game, EnemyKind::HollowHusk, Pos { y: 3, x: 4 });
        game.move_player(0, 1);
        game.handle_key(Intent::Confirm);
        assert_eq!(game.state.enemies[enemy].hp, 4);

        game.handle_pad(&confirm_pad());
        assert_eq!(game.state.enemies[enemy].hp, 4, "no second hit while resolving");
    }

    #[test]
    fn exploration_log_keeps_only_the_newest_entries() {
        let mut game = open_world();
        for _ in 0..15 {
            game.move_player(0, 1);
            game.move_player(0, -1);
        }
        assert_eq!(game.log().len(), 20);
        assert_eq!(game.log()[0], LogEvent::Moved { to: Pos { y: 3, x: 3 } });
    }

    #[test]
    fn snapshot_hash_tracks_state_changes() {
        let mut game = open_world();
        let before = game.snapshot_hash();
        game.move_player(0, 1);
        assert_ne!(game.snapshot_hash(), before);
    }
}
