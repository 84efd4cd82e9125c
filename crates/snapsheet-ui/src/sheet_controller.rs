//! The bottom sheet state machine.
//!
//! [`SheetController`] owns the snap list, the gesture baseline and the
//! animation coordinator, and turns host commands and pointer input into
//! state transitions. The only thing it reports back is `on_close`, invoked
//! once per completed dismissal.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use snapsheet_core::RuntimeHandle;
use snapsheet_foundation::{GestureTracker, PanEvent, PanGestureDetector, PointerEvent};

use crate::animation_coordinator::AnimationCoordinator;
use crate::config::{validate_screen_height, SheetConfig};
use crate::error::SheetError;
use crate::snap_points::SnapPoints;
use crate::snap_resolver::{SnapResolver, SnapTarget};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetState {
    Closed,
    Opening,
    Resting(usize),
    Dragging,
    /// Animating toward a resolved target. `Settling(Dismiss)` hands over to
    /// `Dismissing` as soon as the dismissal starts.
    Settling(SnapTarget),
    Dismissing,
}

impl SheetState {
    /// True for every state in which the sheet is on screen and not leaving.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            SheetState::Opening
                | SheetState::Resting(_)
                | SheetState::Dragging
                | SheetState::Settling(SnapTarget::Rest(_))
        )
    }
}

type CloseCallback = Rc<dyn Fn() + 'static>;

struct SheetInner {
    state: SheetState,
    snap_points: SnapPoints,
    initial_index: usize,
    /// Index the sheet rests at, or is heading to.
    current_index: usize,
    screen_height: f32,
    is_visible: bool,
    enable_backdrop_dismiss: bool,
    resolver: SnapResolver,
    coordinator: AnimationCoordinator,
    gesture: GestureTracker,
    pan: PanGestureDetector,
    /// Bumped whenever a dismissal starts or is abandoned. A dismiss
    /// completion only closes the sheet if it still carries the current value.
    close_generation: u64,
    on_close: CloseCallback,
}

impl SheetInner {
    fn transition(&mut self, next: SheetState) {
        if self.state != next {
            log::debug!("sheet {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    fn fraction_of(&self, index: usize) -> f32 {
        self.snap_points.get(index).unwrap_or(0.0)
    }

    fn open(&mut self, this: &Weak<RefCell<SheetInner>>) {
        let index = self.initial_index;
        self.current_index = index;
        self.transition(SheetState::Opening);
        self.animate_to_index(this, index);
    }

    fn settle_to(&mut self, this: &Weak<RefCell<SheetInner>>, index: usize) {
        self.current_index = index;
        self.transition(SheetState::Settling(SnapTarget::Rest(index)));
        self.animate_to_index(this, index);
    }

    fn animate_to_index(&mut self, this: &Weak<RefCell<SheetInner>>, index: usize) {
        let offset = self.snap_points.offset_for(index, self.screen_height);
        let opacity = self.coordinator.opacity_for(self.fraction_of(index));
        let this = this.clone();
        self.coordinator.animate_to_then(offset, opacity, move || {
            if let Some(strong) = this.upgrade() {
                SheetController::finish_settle(&strong, index);
            }
        });
    }

    fn begin_dismiss(&mut self, this: &Weak<RefCell<SheetInner>>) {
        self.gesture.reset();
        self.close_generation = self.close_generation.wrapping_add(1);
        let generation = self.close_generation;
        self.transition(SheetState::Dismissing);

        let this = this.clone();
        let closed_offset = self.screen_height;
        let opacity = self.coordinator.opacity_for(0.0);
        self.coordinator.animate_to_then(closed_offset, opacity, move || {
            if let Some(strong) = this.upgrade() {
                SheetController::finish_dismiss(&strong, generation);
            }
        });
    }

    /// Index a new drag treats as its starting point, if a drag may begin now.
    fn drag_origin(&self) -> Option<usize> {
        match self.state {
            SheetState::Resting(index) | SheetState::Settling(SnapTarget::Rest(index)) => {
                Some(index)
            }
            SheetState::Opening => Some(self.current_index),
            _ => None,
        }
    }
}

/// Interactive bottom sheet: snap points, drag, swipe and dismissal.
///
/// All methods must be called on the thread that drains the runtime's frame
/// callbacks. Animations advance only when the host drains frames; state
/// changes driven by animation completion (`Opening -> Resting`,
/// `Dismissing -> Closed`) happen inside those drains.
///
/// ```ignore
/// let runtime = Runtime::new(Arc::new(DefaultScheduler));
/// let sheet = SheetController::new(
///     SheetConfig::default(),
///     800.0,
///     runtime.handle(),
///     move || log::info!("sheet closed"),
/// )?;
/// sheet.set_visible(true);
/// ```
#[derive(Clone)]
pub struct SheetController {
    inner: Rc<RefCell<SheetInner>>,
}

impl SheetController {
    /// Validates `config` and builds a closed sheet. Starts opening right
    /// away when `config.is_visible` is set.
    pub fn new(
        config: SheetConfig,
        screen_height: f32,
        runtime: RuntimeHandle,
        on_close: impl Fn() + 'static,
    ) -> Result<Self, SheetError> {
        let snap_points = config.validate()?;
        let screen_height = validate_screen_height(screen_height)?;

        let coordinator = AnimationCoordinator::new(
            runtime,
            screen_height,
            config.position_spring,
            config.backdrop_fade,
            config.backdrop_opacity,
        );
        let inner = SheetInner {
            state: SheetState::Closed,
            snap_points,
            initial_index: config.initial_snap_point,
            current_index: config.initial_snap_point,
            screen_height,
            is_visible: false,
            enable_backdrop_dismiss: config.enable_backdrop_dismiss,
            resolver: SnapResolver::new(config.fast_swipe_velocity),
            coordinator,
            gesture: GestureTracker::new(),
            pan: PanGestureDetector::new(config.enable_pan_gesture),
            close_generation: 0,
            on_close: Rc::new(on_close),
        };
        let controller = Self {
            inner: Rc::new(RefCell::new(inner)),
        };
        if config.is_visible {
            controller.set_visible(true);
        }
        Ok(controller)
    }

    /// Mirrors the host's visibility flag. Only a change of the flag acts.
    ///
    /// `true` opens a closed sheet, and re-opens one that is still
    /// dismissing (that dismissal then never reports `on_close`). `false`
    /// dismisses an open sheet. A completed dismissal clears the flag, so
    /// the next `true` opens again.
    pub fn set_visible(&self, visible: bool) {
        let this = self.weak();
        let mut inner = self.inner.borrow_mut();
        if inner.is_visible == visible {
            log::trace!("set_visible({}) unchanged", visible);
            return;
        }
        inner.is_visible = visible;
        match (visible, inner.state) {
            (true, SheetState::Closed) => inner.open(&this),
            (true, SheetState::Dismissing) => {
                inner.close_generation = inner.close_generation.wrapping_add(1);
                inner.open(&this);
            }
            (false, state) if state.is_open() => inner.begin_dismiss(&this),
            (_, state) => log::debug!("set_visible({}) ignored while {:?}", visible, state),
        }
    }

    /// Closes the sheet. A second call while already dismissing is a no-op.
    pub fn dismiss(&self) {
        let this = self.weak();
        let mut inner = self.inner.borrow_mut();
        if inner.state.is_open() {
            inner.begin_dismiss(&this);
        } else {
            log::debug!("dismiss ignored while {:?}", inner.state);
        }
    }

    pub fn backdrop_tapped(&self) {
        let this = self.weak();
        let mut inner = self.inner.borrow_mut();
        if !inner.enable_backdrop_dismiss {
            log::debug!("backdrop tap ignored: backdrop dismiss disabled");
            return;
        }
        if inner.state.is_open() {
            inner.begin_dismiss(&this);
        } else {
            log::debug!("backdrop tap ignored while {:?}", inner.state);
        }
    }

    /// Animates to `index` and rests there. Index 0 is a valid resting
    /// point here; only gesture resolution treats it as dismissal.
    ///
    /// Accepted while opening, resting or settling toward a snap point;
    /// ignored otherwise.
    pub fn snap_to(&self, index: usize) -> Result<(), SheetError> {
        let this = self.weak();
        let mut inner = self.inner.borrow_mut();
        let len = inner.snap_points.len();
        if index >= len {
            return Err(SheetError::SnapIndexOutOfRange { index, len });
        }
        let state = inner.state;
        match state {
            SheetState::Opening
            | SheetState::Resting(_)
            | SheetState::Settling(SnapTarget::Rest(_)) => inner.settle_to(&this, index),
            state => log::debug!("snap_to({}) ignored while {:?}", index, state),
        }
        Ok(())
    }

    /// First contact of a drag. The gesture baseline is wherever the sheet
    /// is displayed right now.
    pub fn drag_started(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.pan.is_enabled() {
            return;
        }
        let Some(origin) = inner.drag_origin() else {
            log::debug!("drag ignored while {:?}", inner.state);
            return;
        };
        let base_offset = inner.coordinator.offset();
        inner.current_index = origin;
        inner.gesture.begin(base_offset);
        inner.coordinator.mirror_offset(base_offset);
        inner.transition(SheetState::Dragging);
    }

    /// `delta` is the vertical distance since the drag started.
    pub fn drag_moved(&self, delta: f32) {
        let mut inner = self.inner.borrow_mut();
        if inner.state != SheetState::Dragging {
            return;
        }
        if let Some(live_offset) = inner.gesture.update(delta) {
            inner.coordinator.mirror_offset(live_offset);
        }
    }

    /// `delta` as in [`drag_moved`](Self::drag_moved); `velocity` in px/s,
    /// positive toward the bottom of the screen.
    pub fn drag_ended(&self, delta: f32, velocity: f32) {
        let this = self.weak();
        let mut inner = self.inner.borrow_mut();
        if inner.state != SheetState::Dragging {
            return;
        }
        let Some(sample) = inner.gesture.end(delta, velocity) else {
            return;
        };
        inner.coordinator.mirror_offset(sample.live_offset);

        let fraction = SnapPoints::fraction_for_offset(sample.live_offset, inner.screen_height);
        let target = inner.resolver.resolve(
            fraction,
            sample.release_velocity,
            inner.current_index,
            &inner.snap_points,
        );
        log::debug!(
            "drag released at fraction {:.3}, velocity {:.0} px/s, from index {} -> {:?}",
            fraction,
            sample.release_velocity,
            inner.current_index,
            target
        );
        match target {
            SnapTarget::Rest(index) => inner.settle_to(&this, index),
            SnapTarget::Dismiss => {
                inner.transition(SheetState::Settling(SnapTarget::Dismiss));
                inner.begin_dismiss(&this);
            }
        }
    }

    /// Routes raw pointer input through the pan recogniser.
    pub fn handle_pointer_event(&self, event: &PointerEvent) {
        let pan_events = {
            self.inner.borrow_mut().pan.handle(event)
        };
        for pan_event in pan_events {
            match pan_event {
                PanEvent::Began => self.drag_started(),
                PanEvent::Changed { translation } => self.drag_moved(translation),
                PanEvent::Ended {
                    translation,
                    velocity,
                } => self.drag_ended(translation, velocity),
            }
        }
    }

    /// Applies a new screen height. Whatever is in flight is re-aimed at the
    /// new geometry; a resting or closed sheet jumps there.
    pub fn resize(&self, screen_height: f32) -> Result<(), SheetError> {
        let screen_height = validate_screen_height(screen_height)?;
        let mut inner = self.inner.borrow_mut();
        inner.screen_height = screen_height;
        let index = inner.current_index;
        let resting_offset = inner.snap_points.offset_for(index, screen_height);
        let state = inner.state;
        match state {
            SheetState::Closed => inner.coordinator.snap_to(screen_height, 0.0),
            SheetState::Resting(_) => {
                let opacity = inner.coordinator.backdrop_opacity();
                inner.coordinator.snap_to(resting_offset, opacity);
            }
            SheetState::Opening | SheetState::Settling(SnapTarget::Rest(_)) => {
                inner.coordinator.retarget_offset(resting_offset)
            }
            SheetState::Settling(SnapTarget::Dismiss) | SheetState::Dismissing => {
                inner.coordinator.retarget_offset(screen_height)
            }
            // The finger owns the offset; release resolves against the new height.
            SheetState::Dragging => {}
        }
        log::debug!("sheet resized to {:.0} while {:?}", screen_height, state);
        Ok(())
    }

    pub fn state(&self) -> SheetState {
        self.inner.borrow().state
    }

    /// Offset of the sheet's top edge from the top of the screen, as
    /// currently displayed.
    pub fn current_offset(&self) -> f32 {
        self.inner.borrow().coordinator.offset()
    }

    /// Visible fraction of the screen, always within `[0, 1]`.
    pub fn current_fraction(&self) -> f32 {
        let inner = self.inner.borrow();
        SnapPoints::fraction_for_offset(inner.coordinator.offset(), inner.screen_height)
    }

    pub fn backdrop_opacity(&self) -> f32 {
        self.inner.borrow().coordinator.backdrop_opacity()
    }

    pub fn current_index(&self) -> usize {
        self.inner.borrow().current_index
    }

    pub fn screen_height(&self) -> f32 {
        self.inner.borrow().screen_height
    }

    /// The host's last visibility flag, cleared once a dismissal completes.
    pub fn is_visible(&self) -> bool {
        self.inner.borrow().is_visible
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().coordinator.is_animating()
    }

    fn weak(&self) -> Weak<RefCell<SheetInner>> {
        Rc::downgrade(&self.inner)
    }

    fn finish_settle(this: &Rc<RefCell<SheetInner>>, index: usize) {
        let mut inner = this.borrow_mut();
        let state = inner.state;
        match state {
            SheetState::Opening => inner.transition(SheetState::Resting(index)),
            SheetState::Settling(SnapTarget::Rest(target)) if target == index => {
                inner.transition(SheetState::Resting(index))
            }
            state => log::debug!("stale settle completion for {} while {:?}", index, state),
        }
    }

    fn finish_dismiss(this: &Rc<RefCell<SheetInner>>, generation: u64) {
        let on_close = {
            let mut inner = this.borrow_mut();
            if inner.state != SheetState::Dismissing || inner.close_generation != generation {
                log::debug!("stale dismiss completion #{}", generation);
                return;
            }
            inner.current_index = inner.initial_index;
            inner.is_visible = false;
            inner.transition(SheetState::Closed);
            inner.on_close.clone()
        };
        // Released first: the host typically answers with `set_visible(false)`.
        on_close();
    }
}

#[cfg(test)]
#[path = "tests/sheet_controller_tests.rs"]
mod tests;
