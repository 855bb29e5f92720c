//! Artefacts: treasure lying around the labyrinth, drawn from a depleting
//! pool of names so that no two artefacts in a session ever share one.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const ARTEFACT_NAMES: [&str; 8] = [
    "Cornucopia",
    "Pandora's Box",
    "Caduceus",
    "Golden Fleece",
    "Golden Apple",
    "Thyrsus",
    "Medusa's Head",
    "Eros's Bow",
];

pub const MAX_ARTEFACT_WEIGHT: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Artefact {
    pub name: String,
    pub weight: u32,
    /// Cursed artefacts can never be picked up.
    pub cursed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtefactPool {
    remaining: Vec<String>,
}

impl Default for ArtefactPool {
    fn default() -> Self {
        ArtefactPool {
            remaining: ARTEFACT_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ArtefactPool {
    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Draw a new artefact, consuming its name. Returns `None` once every name is used.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Artefact> {
        if self.remaining.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.remaining.len());
        let name = self.remaining.swap_remove(idx);
        let artefact = Artefact {
            name,
            weight: rng.gen_range(1..=MAX_ARTEFACT_WEIGHT),
            cursed: rng.gen_bool(0.5),
        };
        debug!(
            "artefact drawn: {} (weight {}, cursed {}), {} names left",
            artefact.name,
            artefact.weight,
            artefact.cursed,
            self.remaining.len()
        );
        Some(artefact)
    }

    /// Coin-flip generation used on room entry.
    pub fn maybe_draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Artefact> {
        if self.is_exhausted() || !rng.gen_bool(0.5) {
            return None;
        }
        self.draw(rng)
    }
}
