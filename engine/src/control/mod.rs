//! Control authority
//!
//! Exactly one controllable entity receives input each tick. Instead of a
//! process-wide singleton, the [`ActiveControllerRegistry`] is passed to
//! whoever needs to read or hand over authority (the player when sitting down,
//! the session when the pilot stands up).

use log::info;
use static_assertions::{assert_impl_all, assert_obj_safe};

use crate::input::ControlInput;
use crate::world::Scene;

/// Identifies a controllable entity in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControllerId(pub u32);

/// Everything a controller may touch while handling input.
pub struct ControlContext<'a> {
    pub scene: &'a mut Scene,
    pub registry: &'a mut ActiveControllerRegistry,
    /// Seconds since the previous tick
    pub dt: f32,
}

/// Something that can be driven by player input: the character itself or a
/// vehicle it is piloting.
pub trait Controllable {
    fn controller_id(&self) -> ControllerId;

    fn handle_input(&mut self, input: &ControlInput, ctx: &mut ControlContext<'_>);
}

assert_obj_safe!(Controllable);
assert_impl_all!(ControllerId: Copy, Eq, std::hash::Hash, Send, Sync);

/// Tracks which controller currently has input authority.
#[derive(Debug, Default, Clone)]
pub struct ActiveControllerRegistry {
    active: Option<ControllerId>,
    switch_count: u32,
}

impl ActiveControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `id` already active.
    pub fn with_active(id: ControllerId) -> Self {
        Self {
            active: Some(id),
            switch_count: 0,
        }
    }

    /// Give input authority to `id`. Returns the previously active controller.
    pub fn switch_active(&mut self, id: ControllerId) -> Option<ControllerId> {
        let previous = self.active.replace(id);
        if previous != Some(id) {
            self.switch_count += 1;
            info!("Control authority: {:?} -> {:?}", previous, id);
        }
        previous
    }

    #[inline]
    pub fn active(&self) -> Option<ControllerId> {
        self.active
    }

    #[inline]
    pub fn is_active(&self, id: ControllerId) -> bool {
        self.active == Some(id)
    }

    /// Number of actual authority changes so far.
    pub fn switch_count(&self) -> u32 {
        self.switch_count
    }
}

/// Route `input` to the active controller only.
///
/// Returns the id of the controller that handled it, or `None` when nothing is
/// active or the active id is not among `controllers`.
pub fn dispatch_input(
    controllers: &mut [&mut dyn Controllable],
    input: &ControlInput,
    ctx: &mut ControlContext<'_>,
) -> Option<ControllerId> {
    let active = ctx.registry.active()?;
    let controller = controllers
        .iter_mut()
        .find(|controller| controller.controller_id() == active)?;
    controller.handle_input(input, ctx);
    Some(active)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        id: ControllerId,
        handled: u32,
        hand_over_to: Option<ControllerId>,
    }

    impl Controllable for Recorder {
        fn controller_id(&self) -> ControllerId {
            self.id
        }

        fn handle_input(&mut self, _input: &ControlInput, ctx: &mut ControlContext<'_>) {
            self.handled += 1;
            if let Some(next) = self.hand_over_to {
                ctx.registry.switch_active(next);
            }
        }
    }

    fn recorder(id: u32) -> Recorder {
        Recorder {
            id: ControllerId(id),
            handled: 0,
            hand_over_to: None,
        }
    }

    #[test]
    fn test_switch_active_returns_previous() {
        let mut registry = ActiveControllerRegistry::new();
        assert_eq!(registry.switch_active(ControllerId(1)), None);
        assert_eq!(registry.switch_active(ControllerId(2)), Some(ControllerId(1)));
        assert!(registry.is_active(ControllerId(2)));
        assert!(!registry.is_active(ControllerId(1)));
        assert_eq!(registry.switch_count(), 2);

        // Re-activating the same controller is not a switch
        registry.switch_active(ControllerId(2));
        assert_eq!(registry.switch_count(), 2);
    }

    #[test]
    fn test_dispatch_reaches_only_active_controller() {
        let mut scene = Scene::new();
        let mut registry = ActiveControllerRegistry::with_active(ControllerId(2));
        let mut a = recorder(1);
        let mut b = recorder(2);
        let input = ControlInput::default();

        {
            let mut ctx = ControlContext { scene: &mut scene, registry: &mut registry, dt: 0.016 };
            let handled = dispatch_input(&mut [&mut a, &mut b], &input, &mut ctx);
            assert_eq!(handled, Some(ControllerId(2)));
        }
        assert_eq!(a.handled, 0);
        assert_eq!(b.handled, 1);
    }

    #[test]
    fn test_handover_takes_effect_next_dispatch() {
        let mut scene = Scene::new();
        let mut registry = ActiveControllerRegistry::with_active(ControllerId(1));
        let mut a = recorder(1);
        a.hand_over_to = Some(ControllerId(2));
        let mut b = recorder(2);
        let input = ControlInput::default();

        for _ in 0..2 {
            let mut ctx = ControlContext { scene: &mut scene, registry: &mut registry, dt: 0.016 };
            dispatch_input(&mut [&mut a, &mut b], &input, &mut ctx);
        }
        assert_eq!(a.handled, 1);
        assert_eq!(b.handled, 1);
        assert!(registry.is_active(ControllerId(2)));
    }

    #[test]
    fn test_dispatch_without_active_controller() {
        let mut scene = Scene::new();
        let mut registry = ActiveControllerRegistry::new();
        let mut a = recorder(1);
        let mut ctx = ControlContext { scene: &mut scene, registry: &mut registry, dt: 0.016 };
        assert_eq!(dispatch_input(&mut [&mut a], &ControlInput::default(), &mut ctx), None);
        assert_eq!(a.handled, 0);
    }
}
