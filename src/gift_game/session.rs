//! Gift-catch session: falling gifts, score, level-ups and the countdown.
//!
//! One authoritative tick source: the host calls [`GiftGame::advance`] every
//! animation frame and three [`Cadence`]s turn elapsed time into spawn,
//! movement and seconds ticks. Every tick re-checks the phase itself, so a tick
//! that lands after pausing, levelling up or ending is a no-op rather than a
//! stale mutation.

use rand::Rng;
use rand::rngs::SmallRng;

use super::effects::Effects;
use super::gift::{Gift, GiftKind};
use super::level::{LevelTable, LevelTier};
use super::store::ScoreStore;
use crate::audio::AudioCues;
use crate::config::GiftGameConfig;
use crate::error::Result;
use crate::random::{WeightedTable, uniform};
use crate::schedule::Cadence;

/// Where the two-click reward box is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RewardStage {
    /// Waiting for the player to open the box.
    Closed,
    /// Box opened at `opened_at`; reward not shown yet.
    Opening { opened_at: f64 },
    /// Reward visible; the phase closes itself at `opened_at + dismiss_delay`.
    Revealed { opened_at: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelUp {
    pub level: u32,
    pub bonus_secs: u32,
    pub stage: RewardStage,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Idle,
    Playing,
    Paused,
    LevelingUp(LevelUp),
    Ended,
    /// Torn down; every operation is a no-op.
    Disposed,
}

/// Things the host may want to react to (sound, extra particles, HUD).
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    SessionStarted,
    Caught { id: u64, kind: GiftKind, points: u32 },
    /// First catch this session of a kind worth more than any caught before.
    NewBestCatch { kind: GiftKind, x: f64, y: f64 },
    SpecialCaught { bonus_secs: u32 },
    LevelUp { level: u32, bonus_secs: u32 },
    RewardRevealed { level: u32 },
    LevelUpDismissed { level: u32 },
    NewHighScore(u32),
    SessionEnded { score: u32, high_score: u32 },
}

pub struct GiftGame<S: ScoreStore> {
    cfg: GiftGameConfig,
    levels: LevelTable,
    kinds: WeightedTable<GiftKind>,
    rng: SmallRng,
    store: S,
    phase: Phase,
    score: u32,
    high_score: u32,
    record_announced: bool,
    level: u32,
    time_left: u32,
    gifts: Vec<Gift>,
    next_id: u64,
    best_catch_points: u32,
    effects: Effects,
    events: Vec<GameEvent>,
    size: (f64, f64),
    spawn: Cadence,
    movement: Cadence,
    seconds: Cadence,
}

impl<S: ScoreStore> GiftGame<S> {
    pub fn new(cfg: GiftGameConfig, store: S, rng: SmallRng, size: (f64, f64)) -> Result<Self> {
        cfg.validate()?;
        let levels = LevelTable::new(cfg.levels.clone())?;
        let high_score = store.load().unwrap_or(0);
        log::debug!("gift game ready, high score {high_score}");
        let kinds = kind_table(&cfg, 0);
        Ok(Self {
            spawn: Cadence::new(cfg.spawn_period_ms, cfg.max_catch_up_ms),
            movement: Cadence::new(cfg.movement_period_ms, cfg.max_catch_up_ms),
            seconds: Cadence::new(cfg.seconds_period_ms, cfg.max_catch_up_ms),
            time_left: cfg.start_time_secs,
            cfg,
            levels,
            kinds,
            rng,
            store,
            phase: Phase::Idle,
            score: 0,
            high_score,
            record_announced: false,
            level: 0,
            gifts: Vec::new(),
            next_id: 0,
            best_catch_points: 0,
            effects: Effects::default(),
            events: Vec::new(),
            size,
        })
    }

    // --- Session lifecycle --------------------------------------------------------

    /// Reset score, level, gifts and clock and start playing. Valid from any
    /// phase except `Disposed`; gift ids keep counting so none is ever reused.
    pub fn start_session(&mut self, now: f64) {
        if self.phase == Phase::Disposed {
            return;
        }
        self.score = 0;
        self.level = 0;
        self.kinds = kind_table(&self.cfg, 0);
        self.time_left = self.cfg.start_time_secs;
        self.gifts.clear();
        self.effects.clear();
        self.best_catch_points = 0;
        self.record_announced = false;
        self.phase = Phase::Playing;
        self.arm_cadences(now);
        self.events.push(GameEvent::SessionStarted);
        log::info!("gift game started ({}s on the clock)", self.time_left);
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Playing {
            self.phase = Phase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Playing;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Playing => self.pause(),
            Phase::Paused => self.resume(),
            _ => {}
        }
    }

    fn end(&mut self) {
        self.phase = Phase::Ended;
        self.spawn.disarm();
        self.movement.disarm();
        self.seconds.disarm();
        self.events.push(GameEvent::SessionEnded {
            score: self.score,
            high_score: self.high_score,
        });
        log::info!("gift game over: score {}, best {}", self.score, self.high_score);
    }

    /// Tear down: drop all entities and pending events; later calls do nothing.
    pub fn dispose(&mut self) {
        self.phase = Phase::Disposed;
        self.gifts.clear();
        self.effects.clear();
        self.events.clear();
        self.spawn.disarm();
        self.movement.disarm();
        self.seconds.disarm();
    }

    // --- Frame driver -------------------------------------------------------------

    /// Run every tick that became due by `now` and progress the reward box.
    pub fn advance(&mut self, now: f64) {
        if let Phase::LevelingUp(up) = self.phase {
            self.progress_level_up(up, now);
        }
        if self.phase != Phase::Playing {
            // Periods restart when play resumes instead of firing a backlog.
            if self.spawn.is_armed() {
                self.arm_cadences(now);
            }
            return;
        }
        for _ in 0..self.movement.due(now) {
            self.movement_tick();
        }
        for _ in 0..self.spawn.due(now) {
            self.spawn_tick();
        }
        for _ in 0..self.seconds.due(now) {
            self.seconds_tick();
        }
    }

    fn arm_cadences(&mut self, now: f64) {
        self.spawn.arm(now);
        self.movement.arm(now);
        self.seconds.arm(now);
    }

    fn progress_level_up(&mut self, mut up: LevelUp, now: f64) {
        let opened_at = match up.stage {
            RewardStage::Closed => return,
            RewardStage::Opening { opened_at } | RewardStage::Revealed { opened_at } => opened_at,
        };
        if matches!(up.stage, RewardStage::Opening { .. }) && now >= opened_at + self.cfg.reveal_delay_ms {
            up.stage = RewardStage::Revealed { opened_at };
            self.events.push(GameEvent::RewardRevealed { level: up.level });
        }
        if now >= opened_at + self.cfg.dismiss_delay_ms {
            self.phase = Phase::Playing;
            self.arm_cadences(now);
            self.events.push(GameEvent::LevelUpDismissed { level: up.level });
            log::debug!("level {} reward dismissed", up.level);
        } else {
            self.phase = Phase::LevelingUp(up);
        }
    }

    // --- Ticks --------------------------------------------------------------------

    /// Drop one new gift above the playfield. Returns its id.
    pub fn spawn_tick(&mut self) -> Option<u64> {
        if self.phase != Phase::Playing {
            return None;
        }
        let kind = self.kinds.sample(&mut self.rng).copied()?;
        let width = self.size.0;
        let margin = self.cfg.side_margin;
        let x = if width > 2.0 * margin {
            self.rng.gen_range(margin..width - margin)
        } else {
            width / 2.0
        };
        self.drop_gift(kind, x)
    }

    /// Drop a gift of a chosen kind at `x`, with the usual speed for the
    /// current level. Only while playing.
    pub fn drop_gift(&mut self, kind: GiftKind, x: f64) -> Option<u64> {
        if self.phase != Phase::Playing {
            return None;
        }
        let (speed, per_level) = if kind == GiftKind::Special {
            (self.cfg.special_speed, self.cfg.special_speed_per_level)
        } else {
            (self.cfg.regular_speed, self.cfg.regular_speed_per_level)
        };
        let speed = uniform(&mut self.rng, speed.min, speed.max) + self.level as f64 * per_level;
        let id = self.next_id;
        self.next_id += 1;
        self.gifts.push(Gift {
            id,
            x,
            y: self.cfg.spawn_y,
            kind,
            speed,
        });
        Some(id)
    }

    /// Move every gift down by its speed and drop the ones past the bottom (a miss, no penalty).
    pub fn movement_tick(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        let bottom = self.size.1;
        self.gifts.retain_mut(|g| {
            g.fall();
            g.y <= bottom
        });
        self.effects.step();
    }

    /// One second off the clock; ends the session at zero.
    pub fn seconds_tick(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.end();
        }
    }

    // --- Interaction --------------------------------------------------------------

    /// Catch a live gift. Unknown or already-removed ids are ignored.
    /// Returns the points awarded.
    pub fn catch(&mut self, id: u64) -> Option<u32> {
        if self.phase != Phase::Playing {
            return None;
        }
        let idx = self.gifts.iter().position(|g| g.id == id)?;
        let gift = self.gifts.remove(idx);
        let points = gift.kind.points();
        self.score = self.score.saturating_add(points);

        let special = gift.kind == GiftKind::Special;
        if special {
            let bonus = self.cfg.special_time_bonus_secs;
            self.time_left = self.time_left.saturating_add(bonus);
            self.events.push(GameEvent::SpecialCaught { bonus_secs: bonus });
        }
        let text = if special { format!("+{points} 🕒") } else { format!("+{points}") };
        self.effects.on_catch(
            &mut self.rng,
            gift.x,
            gift.y,
            gift.kind.color(),
            text,
            if special { 10 } else { 5 },
        );
        self.events.push(GameEvent::Caught {
            id,
            kind: gift.kind,
            points,
        });
        if points > self.best_catch_points {
            self.best_catch_points = points;
            self.events.push(GameEvent::NewBestCatch {
                kind: gift.kind,
                x: gift.x,
                y: gift.y,
            });
        }

        self.record_high_score();
        self.check_level_up();
        Some(points)
    }

    /// Nearest live gift within the catch radius of a pointer position.
    pub fn gift_at(&self, x: f64, y: f64) -> Option<u64> {
        let r2 = self.cfg.catch_radius * self.cfg.catch_radius;
        self.gifts
            .iter()
            .map(|g| (g.distance_sq(x, y), g.id))
            .filter(|(d, _)| *d <= r2)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, id)| id)
    }

    pub fn catch_at(&mut self, x: f64, y: f64) -> Option<u32> {
        let id = self.gift_at(x, y)?;
        self.catch(id)
    }

    /// First click on the level-up box: start the reveal. Later clicks do nothing.
    pub fn open_reward(&mut self, now: f64) -> bool {
        match self.phase {
            Phase::LevelingUp(mut up) if up.stage == RewardStage::Closed => {
                up.stage = RewardStage::Opening { opened_at: now };
                self.phase = Phase::LevelingUp(up);
                true
            }
            _ => false,
        }
    }

    fn record_high_score(&mut self) {
        if self.score <= self.high_score {
            return;
        }
        self.high_score = self.score;
        self.store.save(self.score);
        if !self.record_announced {
            self.record_announced = true;
            self.events.push(GameEvent::NewHighScore(self.score));
            log::info!("new high score {}", self.score);
        }
    }

    fn check_level_up(&mut self) {
        let derived = self.levels.level(self.score);
        if derived <= self.level || self.phase != Phase::Playing {
            return;
        }
        self.level = derived;
        self.kinds = kind_table(&self.cfg, derived);
        let bonus = self.cfg.time_bonus.for_score(self.score);
        self.time_left = self.time_left.saturating_add(bonus);
        self.phase = Phase::LevelingUp(LevelUp {
            level: derived,
            bonus_secs: bonus,
            stage: RewardStage::Closed,
        });
        self.events.push(GameEvent::LevelUp {
            level: derived,
            bonus_secs: bonus,
        });
        log::info!("level {derived} reached, +{bonus}s");
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = (width, height);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Accessors ----------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Playing, paused or levelling up: the game owns the pointer.
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Playing | Phase::Paused | Phase::LevelingUp(_))
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn gifts(&self) -> &[Gift] {
        &self.gifts
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    /// Reward waiting at the next threshold, if any.
    pub fn next_reward(&self) -> Option<&LevelTier> {
        self.levels.next_tier(self.score)
    }

    pub fn progress(&self) -> f64 {
        self.levels.progress(self.score)
    }

    pub fn config(&self) -> &GiftGameConfig {
        &self.cfg
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    #[cfg(test)]
    pub(crate) fn push_gift(&mut self, kind: GiftKind, x: f64, y: f64, speed: f64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.gifts.push(Gift { id, x, y, kind, speed });
        id
    }
}

/// Sounds for a batch of events: the level-up chime for each level reached
/// and each special gift caught. Ordinary catches are silent.
pub fn play_cues<A: AudioCues + ?Sized>(events: &[GameEvent], audio: &mut A) {
    for event in events {
        match event {
            GameEvent::SpecialCaught { .. } | GameEvent::LevelUp { .. } => audio.level_up(),
            _ => {}
        }
    }
}

/// Kind lookup for a level: the special kind takes `special_chance`, the
/// unlocked regular kinds split the rest evenly.
fn kind_table(cfg: &GiftGameConfig, level: u32) -> WeightedTable<GiftKind> {
    let regular: Vec<GiftKind> = GiftKind::unlocked_at(level).collect();
    let share = (1.0 - cfg.special_chance) / regular.len().max(1) as f64;
    WeightedTable::new(
        std::iter::once((cfg.special_chance, GiftKind::Special))
            .chain(regular.into_iter().map(|k| (share, k))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gift_game::store::MemoryStore;
    use crate::random::seeded_rng;

    fn game() -> GiftGame<MemoryStore> {
        GiftGame::new(
            GiftGameConfig::default(),
            MemoryStore::default(),
            seeded_rng(8),
            (600.0, 800.0),
        )
        .unwrap()
    }

    #[test]
    fn ticks_are_noops_before_start() {
        let mut g = game();
        assert_eq!(g.spawn_tick(), None);
        g.seconds_tick();
        assert_eq!(g.time_left(), 30);
        assert_eq!(g.phase(), Phase::Idle);
    }

    #[test]
    fn spawned_gifts_stay_inside_side_margins() {
        let mut g = game();
        g.start_session(0.0);
        for _ in 0..200 {
            g.spawn_tick();
        }
        assert!(g.gifts().iter().all(|gift| gift.x >= 30.0 && gift.x < 570.0));
        assert!(g.gifts().iter().all(|gift| gift.y == -100.0 && gift.speed >= 2.0));
        let ids: Vec<u64> = g.gifts().iter().map(|gift| gift.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn level_zero_only_drops_basic_kinds_or_special() {
        let mut g = game();
        g.start_session(0.0);
        for _ in 0..300 {
            g.spawn_tick();
        }
        for gift in g.gifts() {
            assert!(matches!(
                gift.kind,
                GiftKind::Red | GiftKind::Green | GiftKind::Gold | GiftKind::Special
            ));
        }
    }

    #[test]
    fn kind_table_tracks_special_chance() {
        let cfg = GiftGameConfig::default();
        let table = kind_table(&cfg, 3);
        assert!((table.total() - 1.0).abs() < 1e-9);
        assert_eq!(table.lookup(0.0), Some(&GiftKind::Special));
        assert_eq!(table.lookup(0.049), Some(&GiftKind::Special));
        assert_ne!(table.lookup(0.051), Some(&GiftKind::Special));
    }

    #[test]
    fn catching_while_paused_is_ignored() {
        let mut g = game();
        g.start_session(0.0);
        let id = g.push_gift(GiftKind::Red, 100.0, 100.0, 2.0);
        g.pause();
        assert_eq!(g.catch(id), None);
        g.resume();
        assert_eq!(g.catch(id), Some(10));
    }

    #[test]
    fn hit_test_picks_nearest_gift() {
        let mut g = game();
        g.start_session(0.0);
        let far = g.push_gift(GiftKind::Red, 100.0, 100.0, 2.0);
        let near = g.push_gift(GiftKind::Gold, 120.0, 100.0, 2.0);
        assert_eq!(g.gift_at(125.0, 100.0), Some(near));
        assert_eq!(g.gift_at(95.0, 100.0), Some(far));
        assert_eq!(g.gift_at(400.0, 400.0), None);
    }

    #[test]
    fn reward_box_reveals_then_dismisses() {
        let mut g = game();
        g.start_session(0.0);
        for _ in 0..3 {
            let id = g.push_gift(GiftKind::Crown, 100.0, 100.0, 2.0);
            g.catch(id);
        }
        assert!(matches!(g.phase(), Phase::LevelingUp(LevelUp { level: 1, .. })));
        // Box stays closed until clicked.
        g.advance(60_000.0);
        assert!(matches!(g.phase(), Phase::LevelingUp(_)));
        assert!(g.open_reward(60_000.0));
        assert!(!g.open_reward(60_010.0), "second click is ignored");
        g.advance(60_599.0);
        assert!(matches!(
            g.phase(),
            Phase::LevelingUp(LevelUp { stage: RewardStage::Opening { .. }, .. })
        ));
        g.advance(60_600.0);
        assert!(matches!(
            g.phase(),
            Phase::LevelingUp(LevelUp { stage: RewardStage::Revealed { .. }, .. })
        ));
        g.advance(65_000.0);
        assert_eq!(g.phase(), Phase::Playing);
        let events = g.drain_events();
        assert!(events.contains(&GameEvent::RewardRevealed { level: 1 }));
        assert!(events.contains(&GameEvent::LevelUpDismissed { level: 1 }));
    }

    #[test]
    fn special_catches_and_level_ups_chime() {
        use crate::audio::{Cue, CueLog};
        let events = [
            GameEvent::Caught { id: 1, kind: GiftKind::Red, points: 10 },
            GameEvent::Caught { id: 2, kind: GiftKind::Special, points: 50 },
            GameEvent::SpecialCaught { bonus_secs: 5 },
            GameEvent::LevelUp { level: 1, bonus_secs: 13 },
            GameEvent::NewHighScore(60),
        ];
        let mut log = CueLog::default();
        play_cues(&events, &mut log);
        assert_eq!(log.cues, vec![Cue::LevelUp, Cue::LevelUp]);
    }

    #[test]
    fn first_catches_announce_new_best_kind() {
        let mut g = game();
        g.start_session(0.0);
        let a = g.push_gift(GiftKind::Gold, 10.0, 10.0, 1.0);
        let b = g.push_gift(GiftKind::Red, 10.0, 10.0, 1.0);
        let c = g.push_gift(GiftKind::Cross, 10.0, 10.0, 1.0);
        g.drain_events();
        g.catch(a);
        g.catch(b);
        g.catch(c);
        let best: Vec<GiftKind> = g
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::NewBestCatch { kind, .. } => Some(kind),
                _ => None,
            })
            .collect();
        assert_eq!(best, vec![GiftKind::Gold, GiftKind::Cross]);
    }
}
