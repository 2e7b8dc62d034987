//! Built-in Campaign
//!
//! The three-level campaign maps, ported from the original map text and
//! padded to rectangular grids. The stray `E` characters are legacy marks
//! from a hand-placed-enemy era of the map format; the parser treats them
//! as empty space and places patrollers from platform geometry instead.

/// Level 1: mostly flat ground with a few floating platforms.
pub const WORLD_MAP_1: &[&str] = &[
    "                                                                                                                                      ",
    "                                                                                                                                      ",
    "                                                                                                                                      ",
    "                                                                                                                                      ",
    "                                                                                                                                      ",
    "                     s                                                                                                                ",
    "               NNNN   XXXXXX                                                                                                          ",
    "               XXXX                               s                                     s                                             ",
    "                     XXXXX                                XXXXXXX                                     XXXXXXXXXXXXX                   ",
    "P                                             E                                   XXXX       E                                        ",
    "                                                                       E                                                    G         ",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX  ",
];

/// Level 2: staircase climbs and tighter platforming.
pub const WORLD_MAP_2: &[&str] = &[
    "                                                                                                                                     ",
    "                                                                                                                                     ",
    "                                                                                                                                     ",
    "                           s                                                 s                                                       ",
    "                     N    XXXXXXX                                          XXXXXXX                                                   ",
    "                   XXXXXX                                           N    XXXXXX                                                      ",
    "             N   XXXXX                   E                    N    XXXXX                                                             ",
    "           XXXX           E                                  XXXXXX             E            s                                       ",
    "     XXXXXX     X                                      XXXXXXX                                 XXXXXXXXXXXXXXX                       ",
    "P       E     XX    X                         E     X                                    XX  XX                E                     ",
    "             XXX     X                               XX                     E                                             G          ",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX ",
];

/// Level 3: the gauntlet before the final challenge.
pub const WORLD_MAP_3: &[&str] = &[
    "                                                                                                                                     ",
    "                                                                                                                                     ",
    "                                 s                                                                                                   ",
    "                           N    XXXXXXX   N                                          s                                               ",
    "                     N   XXXX        XXXX                                     N   XXXXXXX                                            ",
    "                   XXXX              XXXX   N                             XXXX                                                       ",
    "             N    XXXX       E              XXXX   N      N  XXXX       E                                                            ",
    "           XXXXXX           E                      XXXX    XXXX                  s                                                   ",
    "     XXXXXX   X                                            XXXX           E     XXXXXXXXXXXXX                                        ",
    "P       E     XX      X                         E                                              E                                     ",
    "             XXX       X                                         E                                                      G            ",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX ",
];

/// The campaign, in play order.
pub const CAMPAIGN: &[&[&str]] = &[WORLD_MAP_1, WORLD_MAP_2, WORLD_MAP_3];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::DeterministicRng;
    use crate::game::level::{Level, SpawnPolicy, PARTS_REQUIRED};

    #[test]
    fn test_all_campaign_maps_parse() {
        for (idx, map) in CAMPAIGN.iter().enumerate() {
            let mut rng = DeterministicRng::new(idx as u64);
            let level = Level::parse(map, &SpawnPolicy::default(), &mut rng)
                .unwrap_or_else(|e| panic!("map {idx} failed to parse: {e}"));

            assert!(level.goal.is_some(), "map {idx} has no goal");
            assert!(
                level.collectibles.len() as u32 >= PARTS_REQUIRED,
                "map {idx} is unwinnable"
            );
            assert!(!level.enemy_spawns.is_empty(), "map {idx} has no enemies");
            assert!(level.validate().is_empty(), "map {idx} has warnings");
        }
    }

    #[test]
    fn test_campaign_maps_are_rectangular() {
        for map in CAMPAIGN {
            let width = map[0].len();
            assert!(map.iter().all(|row| row.len() == width));
        }
    }
}
