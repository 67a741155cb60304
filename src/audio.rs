//! Fire-and-forget audio cues.
//!
//! Implementations must swallow their own failures (log and move on); a missing
//! audio device never affects engine state.

pub trait AudioCues {
    /// Short synthesized impact. `grand` selects the layered variant used by big bursts.
    fn impact(&mut self, grand: bool);
    /// Spoken "Melkam Genna" greeting.
    fn greeting(&mut self);
    /// Rising chime for level-ups and bonus catches.
    fn level_up(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Impact { grand: bool },
    Greeting,
    LevelUp,
}

/// Keeps every requested cue; handy for headless runs and tests.
#[derive(Clone, Debug, Default)]
pub struct CueLog {
    pub cues: Vec<Cue>,
}

impl AudioCues for CueLog {
    fn impact(&mut self, grand: bool) {
        self.cues.push(Cue::Impact { grand });
    }
    fn greeting(&mut self) {
        self.cues.push(Cue::Greeting);
    }
    fn level_up(&mut self) {
        self.cues.push(Cue::LevelUp);
    }
}
