use tracing::{debug, warn};
use web_sys::HtmlCanvasElement;

use crate::config::EditorConfig;
use crate::consts::CLONE_OFFSET_CELLS;
use crate::doc::{DocError, Document, Element, ElementId, ElementKind, PageSize};
use crate::drag::DragState;
use crate::geometry::{CanvasRect, Point, pointer_to_document, snap_to_grid};
use crate::guides::Guide;
use crate::hit::{self, HitPart};
use crate::history::{History, HistoryError, Snapshot};
use crate::input::{Button, Gesture, Key, Modifiers};
use crate::resize::ResizeState;
use crate::rotate::RotateState;
use crate::selection;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Document, selection or guides changed; redraw.
    RenderNeeded,
    /// The selection is now exactly these ids, in z-order.
    SelectionChanged(Vec<ElementId>),
    ElementsCreated(Vec<ElementId>),
    ElementsDeleted(Vec<ElementId>),
    /// A new undo step was recorded.
    Committed,
    SetCursor(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Doc(#[from] DocError),
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug)]
pub struct EngineCore {
    pub doc: Document,
    pub history: History,
    pub config: EditorConfig,
    pub canvas: CanvasRect,
    pub input: Gesture,
    guides: Vec<Guide>,
    clipboard: Vec<Element>,
    paste_count: i32,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        let mut doc = Document::default();
        doc.set_grid_size(config.grid_size);
        Self {
            doc,
            history: History::new(config.max_history_depth),
            config,
            canvas: CanvasRect::default(),
            input: Gesture::Idle,
            guides: Vec::new(),
            clipboard: Vec::new(),
            paste_count: 0,
        }
    }

    // --- Data inputs ---

    /// Replace the document with one loaded from storage and forget all history.
    ///
    /// Any gesture in progress is dropped without committing.
    pub fn load_document(&mut self, doc: Document) -> Result<Vec<Action>, EngineError> {
        doc.validate()?;
        self.doc = doc;
        self.input = Gesture::Idle;
        self.guides.clear();
        self.history.clear();
        debug!(elements = self.doc.len(), "engine: document loaded");
        Ok(self.refresh())
    }

    /// Update where the canvas sits on screen and its zoom.
    pub fn set_canvas_rect(&mut self, canvas: CanvasRect) {
        self.canvas = canvas;
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, client_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        if !self.input.is_idle() {
            warn!(active = self.input.name(), "engine: pointer-down while a gesture is active; ignored");
            return Vec::new();
        }

        let pt = pointer_to_document(client_pt, &self.canvas);
        let Some(hit) = hit::hit_test(pt, &self.doc, &self.canvas, &self.config) else {
            let mut actions = Vec::new();
            if selection::clear(&mut self.doc) {
                self.push_selection_changed(&mut actions);
            }
            return actions;
        };

        let id = hit.element_id;
        if self.doc.get(&id).is_none_or(|e| e.is_locked) {
            return Vec::new();
        }

        let mut actions = Vec::new();
        let gesture = match hit.part {
            HitPart::ResizeHandle(handle) => ResizeState::start(&self.doc, &id, handle, pt).map(Gesture::Resizing),
            HitPart::RotateHandle => RotateState::start(&self.doc, &id, pt).map(Gesture::Rotating),
            HitPart::Body => {
                let changed = if modifiers.toggles_selection() {
                    selection::toggle(&mut self.doc, &id)
                } else {
                    selection::select_only(&mut self.doc, &id)
                };
                if changed {
                    self.push_selection_changed(&mut actions);
                }
                // a toggle that deselected the element does not pick it up
                if selection::is_selected(&self.doc, &id) {
                    DragState::start(&self.doc, &id, pt).map(Gesture::Dragging)
                } else {
                    None
                }
            }
        };

        if let Some(gesture) = gesture {
            debug!(%id, gesture = gesture.name(), "engine: gesture start");
            actions.push(Action::SetCursor(cursor_for(hit.part).to_owned()));
            self.input = gesture;
        }
        actions
    }

    pub fn on_pointer_move(&mut self, client_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let pt = pointer_to_document(client_pt, &self.canvas);
        if self.input.is_idle() {
            let cursor = match hit::hit_test(pt, &self.doc, &self.canvas, &self.config) {
                Some(h) if self.doc.get(&h.element_id).is_some_and(|e| !e.is_locked) => cursor_for(h.part),
                _ => "default",
            };
            return vec![Action::SetCursor(cursor.to_owned())];
        }
        self.update_gesture(pt, modifiers);
        vec![Action::RenderNeeded]
    }

    pub fn on_pointer_up(&mut self, client_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary || self.input.is_idle() {
            return Vec::new();
        }
        let pt = pointer_to_document(client_pt, &self.canvas);
        self.update_gesture(pt, modifiers);

        let gesture = std::mem::take(&mut self.input);
        self.guides.clear();
        let mut actions = vec![Action::RenderNeeded, Action::SetCursor("default".to_owned())];
        if !gesture.changed(&self.doc) {
            debug!(gesture = gesture.name(), "engine: gesture ended without change");
            return actions;
        }

        let mut before = self.doc.clone();
        gesture.cancel(&mut before);
        match self.history.record(&before) {
            Ok(()) => {
                debug!(gesture = gesture.name(), depth = self.history.undo_count(), "engine: commit");
                actions.push(Action::Committed);
            }
            Err(e) => warn!(error = %e, "engine: failed to record gesture"),
        }
        actions
    }

    /// Abandon the active gesture and restore the element to its pointer-down state.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        if self.input.is_idle() {
            return Vec::new();
        }
        let gesture = std::mem::take(&mut self.input);
        gesture.cancel(&mut self.doc);
        self.guides.clear();
        debug!(gesture = gesture.name(), "engine: gesture cancelled");
        vec![Action::RenderNeeded, Action::SetCursor("default".to_owned())]
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Result<Vec<Action>, EngineError> {
        if key.is("Escape") {
            return Ok(self.cancel_gesture());
        }
        if key.is("Delete") || key.is("Backspace") {
            return self.delete_selected();
        }
        if !modifiers.command() {
            return Ok(Vec::new());
        }
        if key.is("z") {
            return if modifiers.shift { self.redo() } else { self.undo() };
        }
        if key.is("y") {
            return self.redo();
        }
        if key.is("d") {
            return self.duplicate_selected();
        }
        if key.is("c") {
            return Ok(self.copy_selected());
        }
        if key.is("v") {
            return self.paste();
        }
        if key.is("a") {
            return Ok(self.select_all());
        }
        Ok(Vec::new())
    }

    // --- History ---

    pub fn undo(&mut self) -> Result<Vec<Action>, EngineError> {
        if !self.input.is_idle() {
            return Ok(Vec::new());
        }
        let Some(previous) = self.history.undo(&self.doc)? else {
            return Ok(Vec::new());
        };
        self.doc = previous;
        Ok(self.refresh())
    }

    pub fn redo(&mut self) -> Result<Vec<Action>, EngineError> {
        if !self.input.is_idle() {
            return Ok(Vec::new());
        }
        let Some(next) = self.history.redo()? else {
            return Ok(Vec::new());
        };
        self.doc = next;
        Ok(self.refresh())
    }

    // --- Commands ---

    /// Create a new element, snapped to the grid and kept inside the canvas.
    /// It becomes the only selected element.
    pub fn add_element(
        &mut self,
        kind: ElementKind,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<Vec<Action>, EngineError> {
        if !self.input.is_idle() {
            return Ok(Vec::new());
        }
        let snapshot = Snapshot::capture(&self.doc)?;
        let grid = self.doc.grid_size();
        let element = Element::new(
            kind,
            snap_to_grid(f64::from(x), grid),
            snap_to_grid(f64::from(y), grid),
            width.max(self.config.min_width),
            height.max(self.config.min_height),
        );
        let id = self.doc.insert(element)?;
        selection::select_only(&mut self.doc, &id);
        self.history.push_snapshot(snapshot);
        debug!(%id, ?kind, "engine: element added");

        let mut actions = vec![Action::ElementsCreated(vec![id])];
        self.push_selection_changed(&mut actions);
        actions.push(Action::Committed);
        Ok(actions)
    }

    /// Delete every selected element that is not locked.
    pub fn delete_selected(&mut self) -> Result<Vec<Action>, EngineError> {
        if !self.input.is_idle() {
            return Ok(Vec::new());
        }
        let ids: Vec<ElementId> = self
            .doc
            .elements()
            .iter()
            .filter(|e| e.is_selected && !e.is_locked)
            .map(|e| e.id)
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let snapshot = Snapshot::capture(&self.doc)?;
        for id in &ids {
            self.doc.remove(id);
        }
        self.history.push_snapshot(snapshot);
        debug!(count = ids.len(), "engine: elements deleted");

        let mut actions = vec![Action::ElementsDeleted(ids)];
        self.push_selection_changed(&mut actions);
        actions.push(Action::Committed);
        Ok(actions)
    }

    /// Copy the selection in place, offset by two grid cells. The copies
    /// replace the selection.
    pub fn duplicate_selected(&mut self) -> Result<Vec<Action>, EngineError> {
        if !self.input.is_idle() {
            return Ok(Vec::new());
        }
        let sources: Vec<Element> = self.doc.elements().iter().filter(|e| e.is_selected).cloned().collect();
        let offset = CLONE_OFFSET_CELLS * self.doc.grid_size();
        self.insert_copies(sources, offset)
    }

    /// Put the selected elements on the engine clipboard.
    pub fn copy_selected(&mut self) -> Vec<Action> {
        let copied: Vec<Element> = self.doc.elements().iter().filter(|e| e.is_selected).cloned().collect();
        if copied.is_empty() {
            return Vec::new();
        }
        debug!(count = copied.len(), "engine: copied");
        self.clipboard = copied;
        self.paste_count = 0;
        Vec::new()
    }

    /// Insert the clipboard contents. Each paste lands two grid cells further
    /// from the originals than the last.
    pub fn paste(&mut self) -> Result<Vec<Action>, EngineError> {
        if !self.input.is_idle() || self.clipboard.is_empty() {
            return Ok(Vec::new());
        }
        self.paste_count += 1;
        let offset = self.paste_count * CLONE_OFFSET_CELLS * self.doc.grid_size();
        self.insert_copies(self.clipboard.clone(), offset)
    }

    pub fn select_all(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.input.is_idle() && selection::select_all(&mut self.doc) {
            self.push_selection_changed(&mut actions);
        }
        actions
    }

    /// Select `id` alone, or toggle it when `modifiers` ask for it.
    pub fn select(&mut self, id: &ElementId, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if !self.input.is_idle() {
            return actions;
        }
        let changed = if modifiers.toggles_selection() {
            selection::toggle(&mut self.doc, id)
        } else {
            selection::select_only(&mut self.doc, id)
        };
        if changed {
            self.push_selection_changed(&mut actions);
        }
        actions
    }

    pub fn clear_selection(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.input.is_idle() && selection::clear(&mut self.doc) {
            self.push_selection_changed(&mut actions);
        }
        actions
    }

    pub fn set_locked(&mut self, id: &ElementId, locked: bool) -> Result<Vec<Action>, EngineError> {
        if !self.input.is_idle() || self.doc.get(id).is_none_or(|e| e.is_locked == locked) {
            return Ok(Vec::new());
        }
        let snapshot = Snapshot::capture(&self.doc)?;
        if let Some(element) = self.doc.get_mut(id) {
            element.is_locked = locked;
        }
        self.history.push_snapshot(snapshot);
        debug!(%id, locked, "engine: lock changed");
        Ok(vec![Action::RenderNeeded, Action::Committed])
    }

    /// Merge properties-panel fields into an element's payload.
    pub fn merge_payload(&mut self, id: &ElementId, patch: &serde_json::Value) -> Result<Vec<Action>, EngineError> {
        if !self.input.is_idle() {
            return Ok(Vec::new());
        }
        let Some(before) = self.doc.get(id).map(|e| e.payload.clone()) else {
            return Ok(Vec::new());
        };
        let snapshot = Snapshot::capture(&self.doc)?;
        if !self.doc.merge_payload(id, patch) || self.doc.get(id).is_some_and(|e| e.payload == before) {
            return Ok(Vec::new());
        }
        self.history.push_snapshot(snapshot);
        Ok(vec![Action::RenderNeeded, Action::Committed])
    }

    /// Change the page and pull every element back inside it.
    pub fn set_page_size(&mut self, page_size: PageSize) -> Result<Vec<Action>, EngineError> {
        if !self.input.is_idle() {
            return Ok(Vec::new());
        }
        let snapshot = Snapshot::capture(&self.doc)?;
        if !self.doc.set_page_size(page_size) {
            return Ok(Vec::new());
        }
        self.history.push_snapshot(snapshot);
        debug!(?page_size, "engine: page size changed");
        Ok(vec![Action::RenderNeeded, Action::Committed])
    }

    // --- Queries ---

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Selected ids in z-order.
    #[must_use]
    pub fn selection(&self) -> Vec<ElementId> {
        selection::selected_ids(&self.doc)
    }

    /// Guide markers for the drag in progress.
    #[must_use]
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.input.is_idle()
    }

    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.doc.get(id)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.history.redo_count()
    }

    // --- Internals ---

    fn update_gesture(&mut self, pt: Point, modifiers: Modifiers) {
        match &mut self.input {
            Gesture::Idle => {}
            Gesture::Dragging(state) => self.guides = state.update(&mut self.doc, pt, &self.config),
            Gesture::Resizing(state) => state.update(&mut self.doc, pt, &self.config),
            Gesture::Rotating(state) => state.update(&mut self.doc, pt, modifiers.shift),
        }
    }

    fn insert_copies(&mut self, sources: Vec<Element>, offset: i32) -> Result<Vec<Action>, EngineError> {
        if sources.is_empty() {
            return Ok(Vec::new());
        }
        let snapshot = Snapshot::capture(&self.doc)?;
        selection::clear(&mut self.doc);
        let mut created = Vec::with_capacity(sources.len());
        for source in sources {
            let mut copy = Element::new(source.kind, source.x + offset, source.y + offset, source.width, source.height);
            copy.rotation = source.rotation;
            copy.is_locked = source.is_locked;
            copy.payload = source.payload;
            copy.is_selected = true;
            created.push(self.doc.insert(copy)?);
        }
        self.history.push_snapshot(snapshot);
        debug!(count = created.len(), offset, "engine: elements copied");

        let mut actions = vec![Action::ElementsCreated(created)];
        self.push_selection_changed(&mut actions);
        actions.push(Action::Committed);
        Ok(actions)
    }

    fn push_selection_changed(&self, actions: &mut Vec<Action>) {
        actions.push(Action::SelectionChanged(self.selection()));
        actions.push(Action::RenderNeeded);
    }

    /// Actions after the whole document was swapped out.
    fn refresh(&mut self) -> Vec<Action> {
        self.guides.clear();
        let mut actions = Vec::new();
        self.push_selection_changed(&mut actions);
        actions
    }
}

fn cursor_for(part: HitPart) -> &'static str {
    match part {
        HitPart::Body => "move",
        HitPart::ResizeHandle(handle) => handle.cursor(),
        HitPart::RotateHandle => "grab",
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self::with_config(canvas, EditorConfig::default())
    }

    #[must_use]
    pub fn with_config(canvas: HtmlCanvasElement, config: EditorConfig) -> Self {
        Self { canvas, core: EngineCore::with_config(config) }
    }

    /// Set the renderer's zoom factor (1.0 = no zoom).
    pub fn set_zoom(&mut self, zoom: f64) {
        self.core.canvas.zoom = zoom;
    }

    /// Read the canvas origin from the DOM so pointer mapping follows scrolling and layout.
    fn sync_canvas_rect(&mut self) {
        let rect = self.canvas.get_bounding_client_rect();
        let zoom = self.core.canvas.zoom;
        self.core.set_canvas_rect(CanvasRect { left: rect.left(), top: rect.top(), zoom });
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, client_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.sync_canvas_rect();
        self.core.on_pointer_down(client_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, client_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.sync_canvas_rect();
        self.core.on_pointer_move(client_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, client_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.sync_canvas_rect();
        self.core.on_pointer_up(client_pt, button, modifiers)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Result<Vec<Action>, EngineError> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Delegated data inputs ---

    pub fn load_document(&mut self, doc: Document) -> Result<Vec<Action>, EngineError> {
        self.core.load_document(doc)
    }

    pub fn add_element(
        &mut self,
        kind: ElementKind,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<Vec<Action>, EngineError> {
        self.core.add_element(kind, x, y, width, height)
    }

    pub fn merge_payload(&mut self, id: &ElementId, patch: &serde_json::Value) -> Result<Vec<Action>, EngineError> {
        self.core.merge_payload(id, patch)
    }

    pub fn set_page_size(&mut self, page_size: PageSize) -> Result<Vec<Action>, EngineError> {
        self.core.set_page_size(page_size)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn document(&self) -> &Document {
        self.core.document()
    }

    #[must_use]
    pub fn selection(&self) -> Vec<ElementId> {
        self.core.selection()
    }

    #[must_use]
    pub fn guides(&self) -> &[Guide] {
        self.core.guides()
    }
}
