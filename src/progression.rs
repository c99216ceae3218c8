/// Level advance, the upgrade catalog, and the upgrade-card layout.
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::constants::*;
use crate::entities::{Boss, FireMode, Player, World};
use crate::geometry::{Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Upgrade {
    FireRate,
    BulletSpeed,
    MoveSpeed,
    MaxHp,
    SpecialCharge,
}

impl Upgrade {
    pub const CATALOG: [Upgrade; 5] = [
        Upgrade::FireRate,
        Upgrade::BulletSpeed,
        Upgrade::MoveSpeed,
        Upgrade::MaxHp,
        Upgrade::SpecialCharge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Upgrade::FireRate => "Fire rate",
            Upgrade::BulletSpeed => "Bullet speed",
            Upgrade::MoveSpeed => "Move speed",
            Upgrade::MaxHp => "Max HP +20",
            Upgrade::SpecialCharge => "Special +1",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Upgrade::FireRate => "Shoot more often",
            Upgrade::BulletSpeed => "Your shots travel faster",
            Upgrade::MoveSpeed => "You move faster",
            Upgrade::MaxHp => "More health, fully healed",
            Upgrade::SpecialCharge => "One more beam attack",
        }
    }

    pub fn apply(self, player: &mut Player) {
        match self {
            Upgrade::FireRate => {
                player.shoot_cooldown_max = player.shoot_cooldown_max.saturating_sub(2).max(3);
            }
            Upgrade::BulletSpeed => player.bullet_speed += 2.0,
            Upgrade::MoveSpeed => {
                player.base_speed += 1.0;
                player.fast_speed += 1.0;
            }
            Upgrade::MaxHp => {
                player.max_hp += 20;
                player.hp = player.max_hp;
            }
            Upgrade::SpecialCharge => player.special_charges += 1,
        }
    }
}

/// Three distinct upgrades shown between bosses.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeOffer {
    pub options: Vec<Upgrade>,
}

impl UpgradeOffer {
    /// Sample without replacement from the catalog.
    pub fn roll(rng: &mut impl Rng) -> Self {
        let options = Upgrade::CATALOG
            .choose_multiple(rng, UPGRADE_CHOICES)
            .copied()
            .collect();
        UpgradeOffer { options }
    }

    /// Screen rectangles of the cards, left to right.
    pub fn card_rects(&self) -> Vec<Rect> {
        card_rects(self.options.len())
    }

    /// The upgrade whose card contains `point`, if any.
    pub fn pick_at(&self, point: Vec2) -> Option<Upgrade> {
        self.card_rects()
            .iter()
            .position(|r| r.contains(point))
            .and_then(|i| self.options.get(i).copied())
    }
}

/// Cards are laid out in one centred row in the middle of the screen.
pub fn card_rects(count: usize) -> Vec<Rect> {
    let n = count as f32;
    let total = n * CARD_WIDTH + (n - 1.0).max(0.0) * CARD_MARGIN;
    let start_x = ((WIDTH - total) / 2.0).floor();
    let y = (HEIGHT / 2.0 - CARD_HEIGHT / 2.0).floor();
    (0..count)
        .map(|i| {
            Rect::new(
                start_x + i as f32 * (CARD_WIDTH + CARD_MARGIN),
                y,
                CARD_WIDTH,
                CARD_HEIGHT,
            )
        })
        .collect()
}

/// Bank the boss bonus, bump the level, clear the field and roll an offer.
pub fn advance_level(world: &mut World, rng: &mut impl Rng) -> UpgradeOffer {
    world.score += SCORE_PER_BOSS_LEVEL * world.level;
    world.level += 1;
    world.shake = Default::default();
    world.clear_pools();
    world.player.fire_mode = FireMode::for_level(world.level);

    let offer = UpgradeOffer::roll(rng);
    info!(
        level = world.level,
        score = world.score,
        fire_mode = ?world.player.fire_mode,
        offer = ?offer.options,
        "boss defeated"
    );
    offer
}

/// Apply the chosen upgrade and bring in the next boss.
pub fn apply_upgrade(world: &mut World, upgrade: Upgrade) {
    upgrade.apply(&mut world.player);
    world.boss = Boss::new(world.level);
    info!(upgrade = ?upgrade, level = world.level, "upgrade applied, next boss");
}
