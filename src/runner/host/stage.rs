//! The host stage: the source of input events and owner of the cursor-visibility flag.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use uuid::Uuid;

pub type HandlerId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEventKind {
    MouseDown,
    MouseMove,
    MouseOut,
    MouseUp,
}
impl InputEventKind {
    pub const ALL: [InputEventKind; 4] = [
        InputEventKind::MouseDown,
        InputEventKind::MouseMove,
        InputEventKind::MouseOut,
        InputEventKind::MouseUp,
    ];

    /// The host's name for the event.
    pub fn event_name(&self) -> &'static str {
        match self {
            InputEventKind::MouseDown => "mouseDown",
            InputEventKind::MouseMove => "mouseMove",
            InputEventKind::MouseOut => "mouseOut",
            InputEventKind::MouseUp => "mouseUp",
        }
    }
}
impl fmt::Display for InputEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.event_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub kind: InputEventKind,
    pub x: f64,
    pub y: f64,
}
impl InputEvent {
    pub fn new(kind: InputEventKind, x: f64, y: f64) -> Self {
        InputEvent { kind, x, y }
    }
}

/// A registered callback, identified by a handle the registrant keeps for later removal.
#[derive(Clone)]
pub struct EventHandler {
    id: HandlerId,
    callback: Rc<dyn Fn(&InputEvent)>,
}
impl EventHandler {
    pub fn new<F: Fn(&InputEvent) + 'static>(callback: F) -> Self {
        EventHandler {
            id: Uuid::new_v4(),
            callback: Rc::new(callback),
        }
    }

    pub fn id(&self) -> HandlerId {
        self.id
    }

    pub fn handle(&self, event: &InputEvent) {
        (self.callback)(event)
    }
}
impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventHandler({})", self.id)
    }
}

pub trait HostStage {
    fn add_event_listener(&mut self, kind: InputEventKind, handler: EventHandler);

    /// Returns whether a handler with `id` was registered for `kind`.
    fn remove_event_listener(&mut self, kind: InputEventKind, id: HandlerId) -> bool;

    /// Handlers for `kind` in registration order.
    fn listeners(&self, kind: InputEventKind) -> Vec<EventHandler>;

    fn cursor_visible(&self) -> bool;

    fn set_cursor_visible(&mut self, visible: bool);
}

pub type StageRef = Rc<RefCell<dyn HostStage>>;

/// In-memory stage, used when embedding without a real host and in tests.
#[derive(Debug)]
pub struct SimpleStage {
    listeners: HashMap<InputEventKind, Vec<EventHandler>>,
    cursor_visible: bool,
    pub width: f64,
    pub height: f64,
}
impl SimpleStage {
    pub fn new(width: f64, height: f64) -> Self {
        SimpleStage {
            listeners: HashMap::new(),
            cursor_visible: true,
            width,
            height,
        }
    }

    pub fn listener_count(&self, kind: InputEventKind) -> usize {
        self.listeners.get(&kind).map(|l| l.len()).unwrap_or(0)
    }

    pub fn total_listener_count(&self) -> usize {
        self.listeners.values().map(|l| l.len()).sum()
    }
}
impl Default for SimpleStage {
    fn default() -> Self {
        SimpleStage::new(550.0, 400.0)
    }
}
impl HostStage for SimpleStage {
    fn add_event_listener(&mut self, kind: InputEventKind, handler: EventHandler) {
        self.listeners.entry(kind).or_insert_with(Vec::new).push(handler);
    }

    fn remove_event_listener(&mut self, kind: InputEventKind, id: HandlerId) -> bool {
        match self.listeners.get_mut(&kind) {
            Some(handlers) => {
                let before = handlers.len();
                handlers.retain(|h| h.id() != id);
                handlers.len() != before
            }
            None => false,
        }
    }

    fn listeners(&self, kind: InputEventKind) -> Vec<EventHandler> {
        self.listeners.get(&kind).cloned().unwrap_or_default()
    }

    fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }
}

/// Delivers `event` to every handler registered for its kind and returns how many ran.
///
/// Handlers are snapshotted first and run with the stage unborrowed, so they may change the stage.
pub fn fire<S: HostStage + ?Sized>(stage: &RefCell<S>, event: &InputEvent) -> usize {
    let handlers = stage.borrow().listeners(event.kind);
    for handler in &handlers {
        handler.handle(event);
    }
    handlers.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_remove_by_handle() {
        let mut stage = SimpleStage::default();
        let a = EventHandler::new(|_| {});
        let b = EventHandler::new(|_| {});
        stage.add_event_listener(InputEventKind::MouseDown, a.clone());
        stage.add_event_listener(InputEventKind::MouseDown, b.clone());
        assert!(stage.remove_event_listener(InputEventKind::MouseDown, a.id()));
        assert!(!stage.remove_event_listener(InputEventKind::MouseDown, a.id()));
        assert!(!stage.remove_event_listener(InputEventKind::MouseUp, b.id()));
        assert_eq!(stage.listener_count(InputEventKind::MouseDown), 1);
    }

    #[test]
    fn test_fire_lets_handlers_mutate_stage() {
        let stage = Rc::new(RefCell::new(SimpleStage::default()));
        let hits = Rc::new(Cell::new(0));
        let weak_stage = Rc::downgrade(&stage);
        let counter = hits.clone();
        stage.borrow_mut().add_event_listener(
            InputEventKind::MouseUp,
            EventHandler::new(move |_| {
                counter.set(counter.get() + 1);
                if let Some(s) = weak_stage.upgrade() {
                    s.borrow_mut().set_cursor_visible(false);
                }
            }),
        );
        let ran = fire(&*stage, &InputEvent::new(InputEventKind::MouseUp, 1.0, 2.0));
        assert_eq!(ran, 1);
        assert_eq!(hits.get(), 1);
        assert!(!stage.borrow().cursor_visible());
        assert_eq!(fire(&*stage, &InputEvent::new(InputEventKind::MouseDown, 0.0, 0.0)), 0);
    }
}
