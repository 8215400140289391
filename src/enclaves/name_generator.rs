/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

//! Random adjective-noun enclave names for `Create` calls that don't supply
//! one. Every combination matches the allowed name pattern, so generated
//! names skip re-validation only in spirit; the manager still validates.

use rand::seq::SliceRandom;

const ADJECTIVES: &[&str] = &[
    "amber", "ancient", "autumn", "billowing", "bitter", "bold", "broken",
    "calm", "cool", "crimson", "curly", "damp", "dawn", "delicate", "divine",
    "dry", "empty", "falling", "fancy", "flat", "floral", "fragrant",
    "frosty", "gentle", "green", "hidden", "holy", "icy", "jolly", "late",
    "lingering", "little", "lively", "long", "lucky", "misty", "morning",
    "muddy", "mute", "nameless", "noisy", "odd", "old", "orange", "patient",
    "plain", "polished", "proud", "purple", "quiet", "rapid", "raspy",
    "restless", "rough", "round", "royal", "shiny", "shy", "silent", "small",
    "snowy", "soft", "solitary", "sparkling", "spring", "square", "steep",
    "still", "summer", "twilight", "wandering", "weathered", "white", "wild",
    "winter", "wispy", "withered", "yellow", "young",
];

const NOUNS: &[&str] = &[
    "art", "band", "bar", "base", "bird", "block", "boat", "bonus", "bread",
    "breeze", "brook", "bush", "butterfly", "cake", "cell", "cherry",
    "cloud", "credit", "darkness", "dawn", "dew", "disk", "dream", "dust",
    "feather", "field", "fire", "firefly", "flower", "fog", "forest",
    "frog", "frost", "glade", "glitter", "grass", "hall", "hat", "haze",
    "heart", "hill", "king", "lab", "lake", "leaf", "limit", "math",
    "meadow", "mode", "moon", "morning", "mountain", "mouse", "mud",
    "night", "paper", "pine", "poetry", "pond", "queen", "rain", "recipe",
    "resonance", "rice", "river", "salad", "scene", "sea", "shadow",
    "shape", "silence", "sky", "smoke", "snow", "snowflake", "sound",
    "star", "sun", "sunset", "surf", "term", "thunder", "tooth", "tree",
    "truth", "union", "unit", "violet", "voice", "water", "waterfall",
    "wave", "wildflower", "wind", "wood",
];

/// Produces one random `adjective-noun` name candidate.
pub(crate) fn generate_enclave_name() -> String {
    let mut rng = rand::thread_rng();
    let adjective =
        ADJECTIVES.choose(&mut rng).expect("non-empty adjective list");
    let noun = NOUNS.choose(&mut rng).expect("non-empty noun list");
    format!("{adjective}-{noun}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enclaves::EnclaveName;

    #[test]
    fn test_generated_names_always_validate() {
        for _ in 0..200 {
            let candidate = generate_enclave_name();
            let _ = EnclaveName::new(&candidate)
                .expect("generated names must match the allowed pattern");
        }
    }
}
