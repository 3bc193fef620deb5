//! Strike Resolution
//!
//! Pure combat rules between the two fighters' probes. A strike test
//! recomputes both rectangles from current transforms at the moment of
//! the test; stored probe rects are a render convenience and are never
//! trusted for resolution.
//!
//! A connecting strike only raises flags. The damage applies later, when
//! the defender's Idle update consumes its latch; a latch the defender
//! never consumes is dropped here during probe maintenance, silently in
//! most states and as a blocked hit while guarding.

use tracing::trace;

use crate::game::events::FightEvent;
use crate::game::fighter::Fighter;
use crate::game::states::FighterState;

/// Test the attacker's strike against the defender's body.
///
/// The strike probe reads as hitting for the rest of the tick whether
/// or not it connects. A defeated fighter is never flagged. Returns
/// whether the strike connected.
pub(crate) fn resolve_strike(attacker: &mut Fighter, defender: &mut Fighter) -> bool {
    attacker.strike.hitting = true;

    if defender.is_defeated() {
        return false;
    }

    // Both rectangles are refreshed from this tick's transforms before
    // the test
    attacker.strike.reposition(attacker.position, attacker.facing);
    defender.vulnerable.reposition(defender.position, defender.facing);

    if attacker.strike.rect.overlaps(&defender.vulnerable.rect) {
        defender.vulnerable.got_hit = true;
        trace!("{} strike connects with {}", attacker.id, defender.id);
        true
    } else {
        false
    }
}

/// Drop an incoming-hit latch the owner's update did not consume.
///
/// Runs at the end of each fighter's phase. While guarding, the dropped
/// hit is reported as blocked; in any other state it vanishes without
/// effect (hit stun and mid-swing trades absorb hits the same way).
pub(crate) fn drop_stale_hit(fighter: &mut Fighter, tick: u32, events: &mut Vec<FightEvent>) {
    if !fighter.vulnerable.got_hit {
        return;
    }
    fighter.vulnerable.got_hit = false;

    if fighter.state == FighterState::Block {
        events.push(FightEvent::hit_blocked(
            tick,
            fighter.id.opponent(),
            fighter.id,
        ));
        trace!("{} blocks a strike", fighter.id);
    }
}

// =============================================================================
// TESTS
// =============================================================================
