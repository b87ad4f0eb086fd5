//! Re-dispatches host input events as broadcast calls on a script object.
//!
//! The bridge is owned by its [`Context`], never by a class, so two script environments bound to
//! two stages (or even to the same stage) keep separate subscriptions.
//!
//! ```text
//!  host stage ──mouseDown──▶ handler ──broadcastMessage("onMouseDown")──▶ Mouse ──▶ listeners
//! ```

use std::collections::HashMap;
use std::rc::Rc;

use crate::runner::ds::object::ScriptObjectRef;
use crate::runner::ds::operations::broadcast::broadcast_call;
use crate::runner::ds::realm::Context;
use crate::runner::ds::value::ScriptValue;
use crate::runner::host::stage::{EventHandler, HandlerId, InputEventKind, StageRef};

pub const BROADCAST_METHOD: &str = "broadcastMessage";

lazy_static! {
    static ref BROADCAST_MESSAGES: HashMap<InputEventKind, &'static str> = {
        let mut m = HashMap::new();
        m.insert(InputEventKind::MouseDown, "onMouseDown");
        m.insert(InputEventKind::MouseMove, "onMouseMove");
        m.insert(InputEventKind::MouseOut, "onMouseOut");
        m.insert(InputEventKind::MouseUp, "onMouseUp");
        m
    };
}

/// Script message delivered for a host event.
pub fn broadcast_message_for(kind: InputEventKind) -> &'static str {
    BROADCAST_MESSAGES[&kind]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Unbound,
    Bound,
}

struct StageBinding {
    stage: StageRef,
    handlers: HashMap<InputEventKind, HandlerId>,
}

pub struct EventBridge {
    binding: Option<StageBinding>,
}

impl EventBridge {
    pub fn new() -> Self {
        EventBridge { binding: None }
    }

    pub fn state(&self) -> BindingState {
        match self.binding {
            Some(_) => BindingState::Bound,
            None => BindingState::Unbound,
        }
    }

    pub fn stage(&self) -> Option<StageRef> {
        self.binding.as_ref().map(|b| b.stage.clone())
    }

    /// Handle of the handler currently registered for `kind`.
    pub fn current_handler(&self, kind: InputEventKind) -> Option<HandlerId> {
        self.binding
            .as_ref()
            .and_then(|b| b.handlers.get(&kind).copied())
    }

    /// Subscribes `listener` to every input event of `stage`, replacing any earlier subscription.
    ///
    /// Each old handler is removed from the stage it was registered on before its replacement is
    /// added, so repeated binding never leaves duplicate handlers behind.
    pub fn bind_stage(&mut self, ctx: &Context, listener: &ScriptObjectRef, stage: &StageRef) {
        let previous = self.binding.take();
        let rebinding = previous.is_some();
        let moved = previous
            .as_ref()
            .map_or(false, |old| !same_stage(&old.stage, stage));
        let mut handlers = HashMap::new();

        for kind in InputEventKind::ALL.iter().copied() {
            if let Some(old) = &previous {
                if let Some(id) = old.handlers.get(&kind) {
                    old.stage.borrow_mut().remove_event_listener(kind, *id);
                }
            }

            let weak_ctx = ctx.downgrade();
            let target = listener.clone();
            let message = broadcast_message_for(kind);
            let handler = EventHandler::new(move |_event| {
                if let Some(ctx) = weak_ctx.upgrade() {
                    tracing::trace!(target: "event_bridge", broadcast = message, "dispatching host event");
                    broadcast_call(
                        &ctx,
                        &target,
                        BROADCAST_METHOD,
                        &[ScriptValue::from(message)],
                    );
                }
            });

            handlers.insert(kind, handler.id());
            stage.borrow_mut().add_event_listener(kind, handler);
        }

        tracing::debug!(
            target: "event_bridge",
            context = %ctx.id(),
            rebinding,
            moved,
            "stage bound"
        );
        self.binding = Some(StageBinding {
            stage: stage.clone(),
            handlers,
        });
    }

    /// Removes every handler this bridge registered. A no-op when nothing is bound.
    pub fn unbind(&mut self) {
        if let Some(binding) = self.binding.take() {
            let mut stage = binding.stage.borrow_mut();
            for (kind, id) in binding.handlers.iter() {
                stage.remove_event_listener(*kind, *id);
            }
            tracing::debug!(target: "event_bridge", "stage unbound");
        }
    }

    pub fn show_cursor(&self) {
        self.set_cursor_visible(true);
    }

    pub fn hide_cursor(&self) {
        self.set_cursor_visible(false);
    }

    fn set_cursor_visible(&self, visible: bool) {
        match &self.binding {
            Some(binding) => binding.stage.borrow_mut().set_cursor_visible(visible),
            None => {
                tracing::debug!(target: "event_bridge", visible, "no stage bound, cursor change ignored")
            }
        }
    }
}

impl Default for EventBridge {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `a` and `b` are the same host stage.
pub fn same_stage(a: &StageRef, b: &StageRef) -> bool {
    Rc::ptr_eq(a, b)
}
