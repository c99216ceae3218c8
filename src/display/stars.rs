/// Two-layer scrolling star field drawn behind every screen.
use rand::Rng;

use boss_rush::constants::{HEIGHT, WIDTH};
use boss_rush::geometry::Vec2;

const FAR_STARS: usize = 55;
const NEAR_STARS: usize = 35;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Layer {
    Far,
    Near,
}

#[derive(Clone, Debug)]
pub struct Star {
    pub pos: Vec2,
    pub speed: f32,
    pub layer: Layer,
}

impl Star {
    fn spawn(layer: Layer, pos: Vec2, rng: &mut impl Rng) -> Self {
        let speed = match layer {
            Layer::Far => rng.gen_range(0.2..0.7),
            Layer::Near => rng.gen_range(0.8..2.0),
        };
        Star { pos, speed, layer }
    }
}

pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn new(rng: &mut impl Rng) -> Self {
        let layers = std::iter::repeat(Layer::Far)
            .take(FAR_STARS)
            .chain(std::iter::repeat(Layer::Near).take(NEAR_STARS));
        let stars = layers
            .map(|layer| {
                let pos = Vec2::new(rng.gen_range(0.0..=WIDTH), rng.gen_range(0.0..=HEIGHT));
                Star::spawn(layer, pos, rng)
            })
            .collect();
        Starfield { stars }
    }

    /// Scroll down; stars leaving the bottom re-enter at the top with a fresh x and speed.
    pub fn update(&mut self, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.pos.y += star.speed;
            if star.pos.y > HEIGHT {
                let pos = Vec2::new(rng.gen_range(0.0..=WIDTH), 0.0);
                *star = Star::spawn(star.layer, pos, rng);
            }
        }
    }
}
