//! Glyph selection and change notification.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

/// Events panels can listen to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneEvent {
    /// The selected glyph changed.
    SelectedGlyphChanged { previous: Option<String>, current: Option<String> },
    /// The selected glyph's data was changed from outside the panels (undo, remote edit).
    CurrentGlyphChanged { glyph_name: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneEventKind {
    SelectedGlyph,
    CurrentGlyph,
}

impl SceneEvent {
    pub fn kind(&self) -> SceneEventKind {
        match self {
            SceneEvent::SelectedGlyphChanged { .. } => SceneEventKind::SelectedGlyph,
            SceneEvent::CurrentGlyphChanged { .. } => SceneEventKind::CurrentGlyph,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

type Listener = Arc<dyn Fn(&SceneEvent) + Send + Sync>;

/// Holds the glyph selection and dispatches [`SceneEvent`]s.
///
/// Listeners run after every internal lock is released, so they may read the
/// selection or register further listeners.
#[derive(Default)]
pub struct SceneSettings {
    selected_glyph_name: Mutex<Option<String>>,
    listeners: Mutex<Vec<(ListenerId, SceneEventKind, Listener)>>,
    next_listener_id: AtomicUsize,
}

impl SceneSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_glyph_name(&self) -> Option<String> {
        self.selected_glyph_name.lock().clone()
    }

    /// Changes the selection; listeners are only notified if it actually changed.
    pub fn set_selected_glyph_name(&self, name: Option<String>) {
        let previous = {
            let mut selected = self.selected_glyph_name.lock();
            if *selected == name {
                return;
            }
            std::mem::replace(&mut *selected, name.clone())
        };
        self.dispatch(&SceneEvent::SelectedGlyphChanged { previous, current: name });
    }

    pub fn notify_current_glyph_changed(&self) {
        let glyph_name = self.selected_glyph_name();
        self.dispatch(&SceneEvent::CurrentGlyphChanged { glyph_name });
    }

    pub fn add_listener(&self, kind: SceneEventKind, listener: impl Fn(&SceneEvent) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, kind, Arc::new(listener)));
        id
    }

    /// Returns false if no listener with that id was registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let len = listeners.len();
        listeners.retain(|(listener_id, _, _)| *listener_id != id);
        listeners.len() != len
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    fn dispatch(&self, event: &SceneEvent) {
        let kind = event.kind();
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .filter(|(_, listener_kind, _)| *listener_kind == kind)
            .map(|(_, _, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(event);
        }
    }
}

impl std::fmt::Debug for SceneSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneSettings")
            .field("selected_glyph_name", &*self.selected_glyph_name.lock())
            .field("listeners", &self.listeners.lock().len())
            .finish()
    }
}
