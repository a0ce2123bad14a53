//! Power-up activation policy.
//!
//! The policy is a pure function of the held kind and the current context.
//! Kinds the bot does not recognise are never activated.

use game_core::{CellContent, PowerUpKind};

use super::AiContext;

/// Whether the held power-up should be used this tick.
///
/// - `ChameleonCloak`: a zookeeper is nearer than the cloak trigger distance.
/// - `Scavenger` / `BigMooseJuice`: more than `boost_min_pellets` plain pellets
///   lie nearer than `boost_radius`.
/// - `PowerPellet`: always.
pub fn should_activate(kind: PowerUpKind, ctx: &AiContext) -> bool {
    match kind {
        PowerUpKind::PowerPellet => true,
        PowerUpKind::ChameleonCloak => ctx
            .nearest_threat()
            .is_some_and(|(_, distance)| distance < ctx.config.cloak_trigger_distance),
        PowerUpKind::Scavenger | PowerUpKind::BigMooseJuice => {
            nearby_pellets(ctx) > ctx.config.boost_min_pellets
        }
        PowerUpKind::Other(_) => false,
    }
}

fn nearby_pellets(ctx: &AiContext) -> usize {
    ctx.grid()
        .count_nearer_than(ctx.position(), ctx.config.boost_radius, |content| {
            content == CellContent::Pellet
        })
}

#[cfg(test)]
mod tests {
    use game_core::{Animal, Cell, GameState, Position, Tick, Zookeeper};

    use super::*;
    use crate::config::EngineConfig;

    fn board(pellets: &[(i32, i32)], keepers: &[(i32, i32)], kind: PowerUpKind) -> GameState {
        let cells: Vec<Cell> = (0..15)
            .flat_map(|y| {
                (0..15).map(move |x| {
                    let content = if pellets.contains(&(x, y)) {
                        CellContent::Pellet
                    } else {
                        CellContent::Empty
                    };
                    Cell::at(x, y, content)
                })
            })
            .collect();
        let agent = Animal::new("me", Position::new(7, 7)).with_held_power_up(kind);
        let zookeepers = keepers
            .iter()
            .map(|&(x, y)| Zookeeper::new("zk", Position::new(x, y)))
            .collect();
        GameState::new(Tick(3), cells, vec![agent], zookeepers).unwrap()
    }

    fn decide(state: &GameState, kind: PowerUpKind) -> bool {
        let config = EngineConfig::default();
        should_activate(kind, &AiContext::new(&state.animals[0], state, &config))
    }

    #[test]
    fn power_pellet_is_always_used() {
        let state = board(&[], &[], PowerUpKind::PowerPellet);
        assert!(decide(&state, PowerUpKind::PowerPellet));
    }

    #[test]
    fn cloak_waits_for_a_close_zookeeper() {
        let far = board(&[], &[(7, 12)], PowerUpKind::ChameleonCloak);
        assert!(!decide(&far, PowerUpKind::ChameleonCloak));

        let close = board(&[], &[(7, 11)], PowerUpKind::ChameleonCloak);
        assert!(decide(&close, PowerUpKind::ChameleonCloak));

        let none = board(&[], &[], PowerUpKind::ChameleonCloak);
        assert!(!decide(&none, PowerUpKind::ChameleonCloak));
    }

    #[test]
    fn boosts_need_more_than_five_nearby_pellets() {
        let five = [(7, 8), (7, 9), (8, 7), (6, 7), (7, 6)];
        let sparse = board(&five, &[], PowerUpKind::Scavenger);
        assert!(!decide(&sparse, PowerUpKind::Scavenger));

        let six = [(7, 8), (7, 9), (8, 7), (6, 7), (7, 6), (12, 7)];
        let dense = board(&six, &[], PowerUpKind::BigMooseJuice);
        assert!(decide(&dense, PowerUpKind::BigMooseJuice));
    }

    #[test]
    fn pellets_at_the_boost_radius_do_not_count() {
        // (13, 7) is exactly six away
        let pellets = [(7, 8), (7, 9), (8, 7), (6, 7), (7, 6), (13, 7)];
        let state = board(&pellets, &[], PowerUpKind::Scavenger);
        assert!(!decide(&state, PowerUpKind::Scavenger));
    }

    #[test]
    fn unknown_kinds_are_held() {
        let state = board(&[], &[(7, 8)], PowerUpKind::Other(9));
        assert!(!decide(&state, PowerUpKind::Other(9)));
    }
}
