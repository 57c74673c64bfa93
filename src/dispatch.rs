use std::cell::RefCell;
use std::rc::Rc;

use crate::input::KeyInput;
use crate::speech::Announcer;

/// The contract every overlay and hotkey handler implements.
///
/// `is_active` must be side-effect free; it may be consulted several times
/// per frame. Handlers are long-lived: registration order is fixed at
/// startup and only the active flag changes, flipped by the owning
/// overlay's open/close.
pub trait KeyHandler {
    fn is_active(&self) -> bool;

    /// Returns whether the key was consumed. `false` from an active handler
    /// lets the key continue down the chain and, past the last handler, to
    /// the host's own default handling.
    fn process_key(&mut self, input: KeyInput, ctx: &mut DispatchCtx<'_>) -> bool;
}

/// Per-dispatch context handed to handlers: the announcer to speak through,
/// plus the request side of the input-blocker latch.
pub struct DispatchCtx<'a> {
    pub announcer: &'a mut dyn Announcer,
    block_default: bool,
}

impl<'a> DispatchCtx<'a> {
    pub fn new(announcer: &'a mut dyn Announcer) -> Self {
        Self {
            announcer,
            block_default: false,
        }
    }

    /// Suppress the host's default cancel action for this key press. Used
    /// when a handler consumes Escape for an internal purpose (clearing a
    /// search buffer, ascending a level) and the same physical press must
    /// not also close the screen.
    pub fn block_default_cancel(&mut self) {
        self.block_default = true;
    }
}

/// Shared-handle registration: the host keeps an `Rc<RefCell<_>>` to an
/// overlay it registered so it can drive open/close/resume between frames.
/// Single-threaded by design; nothing in the engine crosses threads.
impl<T: KeyHandler> KeyHandler for Rc<RefCell<T>> {
    fn is_active(&self) -> bool {
        self.borrow().is_active()
    }

    fn process_key(&mut self, input: KeyInput, ctx: &mut DispatchCtx<'_>) -> bool {
        self.borrow_mut().process_key(input, ctx)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Band {
    Global,
    Overlay,
    Fallback,
}

/// Priority-ordered handler list. Global hotkeys run before overlays,
/// overlays before the catch-all fallback; within a band, registration
/// order is dispatch order.
pub struct DispatchChain {
    handlers: Vec<(Band, Box<dyn KeyHandler>)>,
    blocked: bool,
}

impl DispatchChain {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            blocked: false,
        }
    }

    pub fn register_global(&mut self, handler: impl KeyHandler + 'static) {
        self.insert(Band::Global, Box::new(handler));
    }

    pub fn register_overlay(&mut self, handler: impl KeyHandler + 'static) {
        self.insert(Band::Overlay, Box::new(handler));
    }

    pub fn register_fallback(&mut self, handler: impl KeyHandler + 'static) {
        self.insert(Band::Fallback, Box::new(handler));
    }

    fn insert(&mut self, band: Band, handler: Box<dyn KeyHandler>) {
        let position = self
            .handlers
            .iter()
            .position(|(b, _)| *b > band)
            .unwrap_or(self.handlers.len());
        self.handlers.insert(position, (band, handler));
    }

    /// Walk the chain: the first active handler that consumes the key ends
    /// the pass. Returns whether any handler consumed it.
    pub fn dispatch(&mut self, input: KeyInput, announcer: &mut dyn Announcer) -> bool {
        let mut ctx = DispatchCtx::new(announcer);
        let mut handled = false;
        for (_, handler) in self.handlers.iter_mut() {
            if !handler.is_active() {
                continue;
            }
            if handler.process_key(input, &mut ctx) {
                handled = true;
                break;
            }
        }
        if ctx.block_default {
            self.blocked = true;
        }
        handled
    }

    /// One-shot read of the input-blocker latch: true at most once after a
    /// handler requested suppression of the default cancel action.
    pub fn take_input_block(&mut self) -> bool {
        std::mem::take(&mut self.blocked)
    }
}

impl Default for DispatchChain {
    fn default() -> Self {
        Self::new()
    }
}
