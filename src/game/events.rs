//! Fight Events
//!
//! Events generated during simulation, drained into each tick's result
//! for hosts to render hit flashes, sounds and the end-of-match screen.
//!
//! Within a tick, events appear in emission order: fighter slot 0's
//! update runs before slot 1's, so ordering is deterministic without an
//! explicit priority.

use serde::{Deserialize, Serialize};

use crate::game::fighter::FighterId;

/// Fight event payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FightEventData {
    /// A strike connected and the defender took damage
    HitLanded {
        /// Fighter whose strike connected
        attacker: FighterId,
        /// Fighter that took the hit
        defender: FighterId,
        /// Defender's hit points after the damage
        remaining_hp: u8,
    },

    /// A strike connected but the defender's guard absorbed it
    HitBlocked {
        /// Fighter whose strike was absorbed
        attacker: FighterId,
        /// Fighter that blocked
        defender: FighterId,
    },

    /// A fighter ran out of hit points
    FighterDefeated {
        /// The defeated fighter
        fighter: FighterId,
    },

    /// The match is over
    MatchEnded {
        /// Fighter left standing
        winner: FighterId,
    },
}

/// A fight event with the tick it occurred on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightEvent {
    /// Tick when the event occurred
    pub tick: u32,
    /// Event payload
    pub data: FightEventData,
}

impl FightEvent {
    /// Create a new event.
    pub fn new(tick: u32, data: FightEventData) -> Self {
        Self { tick, data }
    }

    /// Create a hit-landed event.
    pub fn hit_landed(tick: u32, attacker: FighterId, defender: FighterId, remaining_hp: u8) -> Self {
        Self::new(
            tick,
            FightEventData::HitLanded {
                attacker,
                defender,
                remaining_hp,
            },
        )
    }

    /// Create a hit-blocked event.
    pub fn hit_blocked(tick: u32, attacker: FighterId, defender: FighterId) -> Self {
        Self::new(tick, FightEventData::HitBlocked { attacker, defender })
    }

    /// Create a fighter-defeated event.
    pub fn fighter_defeated(tick: u32, fighter: FighterId) -> Self {
        Self::new(tick, FightEventData::FighterDefeated { fighter })
    }

    /// Create a match-ended event.
    pub fn match_ended(tick: u32, winner: FighterId) -> Self {
        Self::new(tick, FightEventData::MatchEnded { winner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_landed_fields() {
        let attacker = FighterId::new(0);
        let defender = FighterId::new(1);
        let event = FightEvent::hit_landed(42, attacker, defender, 7);

        assert_eq!(event.tick, 42);
        assert_eq!(
            event.data,
            FightEventData::HitLanded {
                attacker,
                defender,
                remaining_hp: 7,
            }
        );
    }

    #[test]
    fn test_match_ended_names_winner() {
        let winner = FighterId::new(1);
        let event = FightEvent::match_ended(900, winner);

        assert_eq!(event.tick, 900);
        assert_eq!(event.data, FightEventData::MatchEnded { winner });
    }
}
