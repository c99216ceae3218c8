/// Top-level phase machine: Title → Playing ⇄ Paused, Playing → Upgrade →
/// Playing, Playing → GameOver → Title.
///
/// Commands that make no sense for the current phase are ignored.
use rand::Rng;
use tracing::{debug, info};

use crate::compute::{tick, TickOutcome};
use crate::entities::{FrameInput, World};
use crate::geometry::Vec2;
use crate::progression::{apply_upgrade, Upgrade, UpgradeOffer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Title,
    Playing,
    Paused,
    Upgrade,
    GameOver,
}

/// Discrete player intents, already decoded from raw input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    /// Leave a paused run for the title screen.
    Abort,
    /// Dismiss the game-over screen.
    Acknowledge,
    Special,
    /// Pointer click at an arena position.
    Click(Vec2),
    /// Pick an upgrade card by its position in the row.
    Choose(usize),
}

#[derive(Clone, Debug)]
pub struct Game {
    phase: Phase,
    world: Option<World>,
    offer: Option<UpgradeOffer>,
}

impl Game {
    pub fn new() -> Self {
        Game {
            phase: Phase::Title,
            world: None,
            offer: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The current run, if one has been started.
    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    /// Upgrades on offer while in the Upgrade phase.
    pub fn offer(&self) -> Option<&UpgradeOffer> {
        self.offer.as_ref()
    }

    /// Apply a command.  Returns `true` when it changed anything.
    pub fn handle(&mut self, command: Command) -> bool {
        match (self.phase, command) {
            (Phase::Title, Command::Start) => {
                self.world = Some(World::new());
                self.offer = None;
                self.phase = Phase::Playing;
                info!("new game");
                true
            }
            (Phase::Playing, Command::Pause) => {
                self.phase = Phase::Paused;
                true
            }
            (Phase::Playing, Command::Special) => self
                .world
                .as_mut()
                .and_then(|w| {
                    let beam = w.player.use_special()?;
                    w.beams.push(beam);
                    Some(())
                })
                .is_some(),
            (Phase::Paused, Command::Resume) => {
                self.phase = Phase::Playing;
                true
            }
            (Phase::Paused, Command::Abort) => {
                self.world = None;
                self.phase = Phase::Title;
                info!("run abandoned");
                true
            }
            (Phase::Upgrade, Command::Click(point)) => {
                let picked = self.offer.as_ref().and_then(|o| o.pick_at(point));
                self.choose(picked)
            }
            (Phase::Upgrade, Command::Choose(index)) => {
                let picked = self
                    .offer
                    .as_ref()
                    .and_then(|o| o.options.get(index).copied());
                self.choose(picked)
            }
            (Phase::GameOver, Command::Acknowledge) => {
                self.world = None;
                self.phase = Phase::Title;
                true
            }
            (phase, command) => {
                debug!(?phase, ?command, "command ignored");
                false
            }
        }
    }

    fn choose(&mut self, picked: Option<Upgrade>) -> bool {
        let (Some(upgrade), Some(world)) = (picked, self.world.as_mut()) else {
            return false;
        };
        apply_upgrade(world, upgrade);
        self.offer = None;
        self.phase = Phase::Playing;
        true
    }

    /// Run one simulation tick.  Only the Playing phase advances the world.
    pub fn step(&mut self, input: &FrameInput, rng: &mut impl Rng) {
        if self.phase != Phase::Playing {
            return;
        }
        let Some(world) = self.world.as_ref() else {
            return;
        };

        let (next, outcome) = tick(world, input, rng);
        self.world = Some(next);
        match outcome {
            TickOutcome::Continue => {}
            TickOutcome::BossDefeated(offer) => {
                self.offer = Some(offer);
                self.phase = Phase::Upgrade;
            }
            TickOutcome::PlayerDied => {
                self.phase = Phase::GameOver;
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
