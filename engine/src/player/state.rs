//! Locomotion state machine
//!
//! The regime is never stored across ticks as a source of truth: it is
//! re-derived every tick from the raw context flags, so it can never drift
//! out of sync with them.

use std::fmt;

use static_assertions::assert_impl_all;

/// Movement regime for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    /// Standing on a celestial body; velocity composed against the body
    OnGround,
    /// Inside a vehicle; velocity composed against the vehicle
    OnShip,
    /// No reference frame; jetpack forces accumulate momentum
    Flying,
    /// Attached to a seat; the vehicle controller has input authority
    Seated,
}

assert_impl_all!(PlayerState: Copy, Eq, std::hash::Hash, Send, Sync);

impl PlayerState {
    /// Resolve the regime with fixed priority Seated > OnShip > OnGround > Flying.
    pub const fn resolve(is_seated: bool, inside_vehicle: bool, is_grounded: bool) -> Self {
        if is_seated {
            PlayerState::Seated
        } else if inside_vehicle {
            PlayerState::OnShip
        } else if is_grounded {
            PlayerState::OnGround
        } else {
            PlayerState::Flying
        }
    }

    /// Regimes whose velocity snaps to a moving reference frame.
    pub const fn has_reference_frame(&self) -> bool {
        matches!(self, PlayerState::OnGround | PlayerState::OnShip)
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerState::OnGround => "on ground",
            PlayerState::OnShip => "on ship",
            PlayerState::Flying => "flying",
            PlayerState::Seated => "seated",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_every_flag_combination() {
        let expected = [
            // (seated, inside_vehicle, grounded) -> state
            ((false, false, false), PlayerState::Flying),
            ((false, false, true), PlayerState::OnGround),
            ((false, true, false), PlayerState::OnShip),
            ((false, true, true), PlayerState::OnShip),
            ((true, false, false), PlayerState::Seated),
            ((true, false, true), PlayerState::Seated),
            ((true, true, false), PlayerState::Seated),
            ((true, true, true), PlayerState::Seated),
        ];
        for ((seated, inside, grounded), state) in expected {
            assert_eq!(
                PlayerState::resolve(seated, inside, grounded),
                state,
                "seated={seated} inside={inside} grounded={grounded}"
            );
        }
    }

    #[test]
    fn test_resolve_is_deterministic() {
        for bits in 0..8u8 {
            let flags = (bits & 4 != 0, bits & 2 != 0, bits & 1 != 0);
            let first = PlayerState::resolve(flags.0, flags.1, flags.2);
            let second = PlayerState::resolve(flags.0, flags.1, flags.2);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_reference_frame_regimes() {
        assert!(PlayerState::OnGround.has_reference_frame());
        assert!(PlayerState::OnShip.has_reference_frame());
        assert!(!PlayerState::Flying.has_reference_frame());
        assert!(!PlayerState::Seated.has_reference_frame());
    }

    #[test]
    fn test_display() {
        assert_eq!(PlayerState::OnShip.to_string(), "on ship");
    }
}
