//! Display-name pool for newly acquired creatures.
//!
//! Names are drawn uniformly at random and are not unique.

use rand::Rng;

/// Names a new creature can receive.
pub const NAME_POOL: &[&str] = &[
    "Bubbles", "Finn", "Nemo", "Coral", "Pip", "Goldie", "Splash", "Marlin", "Dory", "Sunny",
    "Pebble", "Ziggy", "Wanda", "Gill", "Flounder",
];

/// Pick a random name from [`NAME_POOL`].
pub fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let index = rng.random_range(0..NAME_POOL.len());
    NAME_POOL
        .get(index)
        .map_or_else(|| String::from("Fish"), |name| (*name).to_owned())
}
