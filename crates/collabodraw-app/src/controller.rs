//! Board controller: the single owner of a whiteboard session.
//!
//! Pointer input arrives in screen coordinates and is converted through the
//! viewport. Every mutation of the element store is followed by exactly one
//! history commit and marks the board dirty for auto-save.

use crate::config::AppConfig;
use crate::navigation::{NavigationParams, share_url};
use crate::scheduler::{Scheduler, Task};
use crate::shortcuts::{ShortcutAction, ShortcutRegistry};
use collabodraw_core::elements::{StickyNote, Text};
use collabodraw_core::selection::{self, HIT_TOLERANCE, apply_edit};
use collabodraw_core::storage::{
    AutoSaveManager, BoardRepository, MANUAL_SAVE_DESCRIPTION, Storage, StorageError, Version,
};
use collabodraw_core::time::{Duration, Instant};
use collabodraw_core::{
    Board, Change, Clipboard, ContentEdit, DEFAULT_BOARD_NAME, Element, ElementId, ElementStore,
    HexColor, History, MultiMoveState, Presence, Selection, SessionTimer, ToolKind, Viewport,
};
use collabodraw_render::view::{overlay_cursors, overlay_selection};
use collabodraw_render::{
    DrawingEngine, RasterSurface, RenderError, RenderResult, compose_view, export_file_name,
    png_data_url, render_board,
};
use kurbo::{Point, Rect, Vec2};
use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Controller errors.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

/// A user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// What the host should do after a pointer press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    None,
    /// Ask the user for text, then call [`BoardController::add_text`].
    TextRequested(Point),
    /// An element was placed immediately.
    Placed(ElementId),
}

/// A rendered PNG ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub file_name: String,
    pub data_url: String,
}

/// Owns the board and all session state around it.
pub struct BoardController<S: Storage> {
    board: Board,
    board_id: String,
    history: History,
    engine: DrawingEngine<RasterSurface>,
    viewport: Viewport,
    selection: Selection,
    clipboard: Clipboard,
    drag: Option<MultiMoveState>,
    /// Last screen position of a hand-tool drag.
    pan_anchor: Option<Point>,
    tool: ToolKind,
    color: HexColor,
    timer: SessionTimer,
    presence: Presence,
    autosave: AutoSaveManager<S>,
    scheduler: Scheduler,
    notifications: VecDeque<Notification>,
    config: AppConfig,
}

impl<S: Storage> BoardController<S> {
    /// Start a session with an empty board.
    pub fn new(storage: Arc<S>, config: AppConfig, now: Instant) -> Result<Self, ControllerError> {
        let repository = BoardRepository::new(storage);
        let user = repository.current_user()?;
        let surface = RasterSurface::new(config.surface_width, config.surface_height)?;
        let engine = DrawingEngine::new(surface, config.background_color);

        let mut autosave = AutoSaveManager::new(repository);
        autosave.set_interval(Duration::from_secs(config.autosave_interval_secs));
        autosave.mark_clean(now);
        let scheduler = Scheduler::new(
            now,
            autosave.interval(),
            Duration::from_secs(config.cursor_refresh_secs),
        );

        log::info!("Session started for {}", user.name);
        let board = Board::default();
        Ok(Self {
            history: History::new(&board.elements),
            board,
            board_id: Uuid::new_v4().to_string(),
            engine,
            viewport: Viewport::default(),
            selection: Selection::new(),
            clipboard: Clipboard::new(),
            drag: None,
            pan_anchor: None,
            tool: ToolKind::default(),
            color: HexColor::black(),
            timer: SessionTimer::default(),
            presence: Presence::new(user),
            autosave,
            scheduler,
            notifications: VecDeque::new(),
            config,
        })
    }

    /// Start a session and restore the saved board, if any.
    pub fn open(
        storage: Arc<S>,
        config: AppConfig,
        params: &NavigationParams,
        now: Instant,
    ) -> Result<Self, ControllerError> {
        let mut controller = Self::new(storage, config, now)?;
        if let Some(board) = &params.board {
            controller.board_id = board.clone();
        }
        if let Some(session) = &params.session {
            log::info!("Joining session {}", session);
        }
        controller.load_board(now);
        Ok(controller)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn elements(&self) -> &ElementStore {
        &self.board.elements
    }

    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn color(&self) -> HexColor {
        self.color
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    pub fn presence_mut(&mut self) -> &mut Presence {
        &mut self.presence
    }

    /// The board surface, in board units.
    pub fn surface(&self) -> &RasterSurface {
        self.engine.surface()
    }

    pub fn zoom_percent(&self) -> u32 {
        self.viewport.zoom_percent()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.autosave.is_dirty()
    }

    /// Saved versions, newest first.
    pub fn versions(&self) -> Vec<Version> {
        self.autosave.repository().versions()
    }

    /// Take every pending notification, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let message = message.into();
        log::debug!("Notification: {}", message);
        self.notifications.push_back(Notification { kind, message });
    }

    fn redraw(&mut self) {
        self.engine.redraw_all(&self.board.elements);
    }

    /// Commit the store to history and flag it for auto-save.
    fn record_change(&mut self) {
        self.history.commit(&self.board.elements);
        self.autosave.mark_dirty();
    }

    fn after_append(&mut self, id: ElementId) {
        if let Some(element) = self.board.elements.get(id) {
            self.presence.broadcast(&Change::Draw {
                id,
                kind: element.kind(),
            });
        }
        self.record_change();
    }

    /// Copy view and tool state into the board before it is persisted.
    fn sync_settings(&mut self) {
        let settings = &mut self.board.settings;
        settings.set_viewport(&self.viewport);
        settings.timer = self.timer.seconds();
        settings.tool = self.tool;
        settings.color = self.color;
    }

    /// Replace the whole session state with `board`.
    fn apply_board(&mut self, board: Board, now: Instant) {
        self.engine.cancel_stroke(&self.board.elements);
        self.drag = None;
        self.pan_anchor = None;
        self.selection.clear();

        self.viewport = board.settings.viewport();
        self.timer = SessionTimer::from_seconds(board.settings.timer);
        self.tool = board.settings.tool;
        self.color = board.settings.color;
        self.board = board;

        self.history.reset(&self.board.elements);
        self.redraw();
        self.autosave.mark_clean(now);
    }

    // Tools

    /// Switch tools, abandoning any gesture in progress.
    pub fn select_tool(&mut self, tool: ToolKind) {
        self.engine.cancel_stroke(&self.board.elements);
        self.tool = tool;
        log::debug!("Tool: {}", tool.name());
    }

    /// Color for new elements.
    pub fn select_color(&mut self, color: HexColor) {
        self.color = color;
    }

    /// Recolor the selected elements.
    pub fn recolor_selected(&mut self, color: HexColor) -> usize {
        let changed = selection::set_color(&mut self.board.elements, &self.selection, color);
        if changed > 0 {
            self.redraw();
            self.record_change();
        }
        changed
    }

    // Pointer input

    /// Board position under `screen`, clamped to the drawing surface.
    pub fn board_point(&self, screen: Point) -> Point {
        let point = self.viewport.screen_to_board(screen);
        let surface = self.engine.surface();
        Point::new(
            point.x.clamp(0.0, f64::from(surface.width())),
            point.y.clamp(0.0, f64::from(surface.height())),
        )
    }

    pub fn pointer_down(&mut self, screen: Point, shift: bool) -> PointerOutcome {
        let point = self.board_point(screen);
        match self.tool {
            ToolKind::Select => {
                self.begin_select(point, shift);
                PointerOutcome::None
            }
            ToolKind::Hand => {
                self.pan_anchor = Some(screen);
                PointerOutcome::None
            }
            ToolKind::Text => PointerOutcome::TextRequested(point),
            ToolKind::Sticky => match self.add_sticky(point) {
                Some(id) => PointerOutcome::Placed(id),
                None => PointerOutcome::None,
            },
            ToolKind::Pen
            | ToolKind::Highlighter
            | ToolKind::Rectangle
            | ToolKind::Circle
            | ToolKind::Line
            | ToolKind::Arrow => {
                self.engine.begin_stroke(self.tool, self.color, point);
                PointerOutcome::None
            }
        }
    }

    fn begin_select(&mut self, point: Point, shift: bool) {
        let tolerance = HIT_TOLERANCE / self.viewport.zoom;
        let hit = self.board.elements.element_at(point, tolerance).map(Element::id);
        match hit {
            Some(id) => {
                if shift {
                    self.selection.add(id);
                } else if !self.selection.contains(id) {
                    self.selection.select(id);
                }
                self.drag = Some(MultiMoveState::new(point, &self.board.elements, &self.selection));
            }
            None if !shift => self.selection.clear(),
            None => {}
        }
    }

    pub fn pointer_move(&mut self, screen: Point) {
        let point = self.board_point(screen);
        if let Some(drag) = self.drag.as_mut() {
            drag.update(point, &mut self.board.elements);
            self.engine.redraw_all(&self.board.elements);
            return;
        }
        if let Some(anchor) = self.pan_anchor {
            self.viewport.pan(screen - anchor);
            self.pan_anchor = Some(screen);
            return;
        }
        if self.engine.is_drawing() {
            self.engine.extend_stroke(point, &self.board.elements);
        }
    }

    /// Finish the current gesture. Returns the id of a newly drawn element.
    pub fn pointer_up(&mut self, screen: Point) -> Option<ElementId> {
        let point = self.board_point(screen);
        self.pan_anchor = None;

        if let Some(mut drag) = self.drag.take() {
            drag.update(point, &mut self.board.elements);
            if drag.moved() {
                self.redraw();
                self.presence.broadcast(&Change::Move {
                    ids: drag.original_elements.keys().copied().collect(),
                    delta: drag.delta(),
                });
                self.record_change();
            }
            return None;
        }

        if !self.engine.is_drawing() {
            return None;
        }
        let id = self.engine.commit_stroke(point, &mut self.board.elements)?;
        self.after_append(id);
        Some(id)
    }

    // Placement and editing

    /// Place a text element. Blank text is ignored.
    pub fn add_text(&mut self, point: Point, text: &str) -> Option<ElementId> {
        if text.trim().is_empty() {
            return None;
        }
        let element = Element::Text(Text::new(point, text.to_string(), self.color));
        let id = self.board.elements.append(element)?;
        self.redraw();
        self.after_append(id);
        Some(id)
    }

    /// Place a sticky note with its top-left corner at `point`.
    pub fn add_sticky(&mut self, point: Point) -> Option<ElementId> {
        let id = self.board.elements.append(Element::Sticky(StickyNote::new(point)))?;
        self.redraw();
        self.after_append(id);
        Some(id)
    }

    /// Apply `edit` to the first selected element it fits.
    pub fn edit_selected(&mut self, edit: &ContentEdit) -> bool {
        let ids = self.selection.ids().to_vec();
        let mut applied = false;
        for id in ids {
            self.board.elements.update(id, |element| applied = apply_edit(element, edit));
            if applied {
                break;
            }
        }
        if applied {
            self.redraw();
            self.record_change();
        }
        applied
    }

    // History

    pub fn undo(&mut self) -> bool {
        if !self.history.undo(&mut self.board.elements) {
            self.notify(NotificationKind::Info, "Nothing to undo");
            return false;
        }
        self.after_restore();
        self.notify(NotificationKind::Success, "Undone");
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.redo(&mut self.board.elements) {
            self.notify(NotificationKind::Info, "Nothing to redo");
            return false;
        }
        self.after_restore();
        self.notify(NotificationKind::Success, "Redone");
        true
    }

    fn after_restore(&mut self) {
        self.engine.cancel_stroke(&self.board.elements);
        self.drag = None;
        self.selection.retain_existing(&self.board.elements);
        self.redraw();
        self.autosave.mark_dirty();
    }

    // View

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
        log::debug!("Zoom: {}%", self.zoom_percent());
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
        log::debug!("Zoom: {}%", self.zoom_percent());
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset();
        log::debug!("Zoom reset to 100%");
    }

    /// Pan by a screen-space delta.
    pub fn pan_by(&mut self, screen_delta: Vec2) {
        self.viewport.pan(screen_delta);
    }

    /// Wheel zoom keeping `screen` fixed.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        self.viewport.zoom_at(screen, factor);
    }

    /// Compose the visible part of the board with selection and cursor
    /// overlays.
    pub fn render_view(&self, width: u32, height: u32) -> RenderResult<RasterSurface> {
        let mut screen = compose_view(
            self.engine.surface(),
            &self.viewport,
            width,
            height,
            self.config.background_color,
        )?;
        let bounds: Vec<Rect> = self
            .selection
            .elements(&self.board.elements)
            .map(Element::bounds)
            .collect();
        overlay_selection(&mut screen, &self.viewport, &bounds);
        overlay_cursors(&mut screen, &self.viewport, self.presence.cursors());
        Ok(screen)
    }

    // Manipulation

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.board.elements);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Remove every element. An already empty board is left alone.
    pub fn clear_canvas(&mut self) {
        if self.board.elements.is_empty() {
            return;
        }
        self.board.elements.replace_all(Vec::new());
        self.selection.clear();
        self.redraw();
        self.presence.broadcast(&Change::Clear);
        self.record_change();
        log::info!("Canvas cleared");
    }

    pub fn duplicate_selected(&mut self) -> Vec<ElementId> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        let ids = selection::duplicate(&mut self.board.elements, &self.selection);
        self.selection.set(ids.iter().copied());
        self.redraw();
        self.record_change();
        self.notify(NotificationKind::Success, "Elements duplicated");
        ids
    }

    pub fn copy_selected(&mut self) -> usize {
        let copied = self.clipboard.copy(&self.board.elements, &self.selection);
        if copied > 0 {
            self.notify(NotificationKind::Success, "Copied to clipboard");
        }
        copied
    }

    /// Paste the clipboard; the pasted clones become the selection.
    pub fn paste(&mut self) -> Vec<ElementId> {
        if self.clipboard.is_empty() {
            self.notify(NotificationKind::Info, "Nothing to paste");
            return Vec::new();
        }
        let ids = self.clipboard.paste(&mut self.board.elements);
        self.selection.set(ids.iter().copied());
        self.redraw();
        self.record_change();
        self.notify(NotificationKind::Success, "Pasted from clipboard");
        ids
    }

    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.ids().to_vec();
        let removed = selection::delete(&mut self.board.elements, &self.selection);
        if removed == 0 {
            return 0;
        }
        self.selection.clear();
        self.redraw();
        self.presence.broadcast(&Change::Delete { ids });
        self.record_change();
        self.notify(NotificationKind::Success, "Elements deleted");
        removed
    }

    pub fn bring_to_front(&mut self) -> usize {
        let changed = selection::bring_to_front(&mut self.board.elements, &self.selection);
        self.after_layer_change(changed)
    }

    pub fn send_to_back(&mut self) -> usize {
        let changed = selection::send_to_back(&mut self.board.elements, &self.selection);
        self.after_layer_change(changed)
    }

    fn after_layer_change(&mut self, changed: usize) -> usize {
        if changed > 0 {
            self.redraw();
            self.record_change();
        }
        changed
    }

    // Persistence

    /// Rename the board; a blank name falls back to the default.
    pub fn set_board_name(&mut self, name: &str) {
        let name = match name.trim() {
            "" => DEFAULT_BOARD_NAME,
            trimmed => trimmed,
        };
        if self.board.name != name {
            self.board.name = name.to_string();
            self.autosave.mark_dirty();
        }
    }

    /// Save the board and append a "Manual save" version.
    pub fn save_board(&mut self, now: Instant) -> Result<Version, ControllerError> {
        self.sync_settings();
        match self.autosave.save(&self.board, MANUAL_SAVE_DESCRIPTION, now) {
            Ok(version) => {
                self.notify(NotificationKind::Success, "Board saved successfully!");
                Ok(version)
            }
            Err(e) => {
                log::error!("Failed to save board: {}", e);
                self.notify(NotificationKind::Error, "Failed to save board");
                Err(e.into())
            }
        }
    }

    /// Replace the session with the saved board.
    ///
    /// Returns false when nothing usable is saved; the current board is kept.
    pub fn load_board(&mut self, now: Instant) -> bool {
        let loaded = self.autosave.repository().load_board();
        match loaded {
            Some(board) => {
                self.apply_board(board, now);
                true
            }
            None => false,
        }
    }

    /// Replace the session with a saved version.
    pub fn restore_version(&mut self, id: &str, now: Instant) -> bool {
        let restored = self.autosave.repository().restore_version(id);
        match restored {
            Ok(Some((version, board))) => {
                self.apply_board(board, now);
                // The restored state differs from the saved record
                self.autosave.mark_dirty();
                self.notify(
                    NotificationKind::Success,
                    format!("Version restored: {}", version.time_label()),
                );
                true
            }
            Ok(None) => {
                log::warn!("Version {} not found", id);
                false
            }
            Err(e) => {
                log::error!("Failed to restore version: {}", e);
                self.notify(NotificationKind::Error, "Failed to restore version");
                false
            }
        }
    }

    fn render_export(&self) -> RenderResult<RasterSurface> {
        render_board(
            &self.board.elements,
            self.config.export_width,
            self.config.export_height,
            self.config.background_color,
        )
    }

    /// The board at the export size, PNG encoded.
    pub fn export_png_bytes(&self) -> Result<Vec<u8>, ControllerError> {
        Ok(self.render_export()?.encode_png()?)
    }

    /// Render the board at the export size and encode it as a PNG data URL.
    pub fn export_png(&mut self) -> Result<ExportedImage, ControllerError> {
        let surface = self.render_export()?;
        let image = ExportedImage {
            file_name: export_file_name(&self.board.name),
            data_url: png_data_url(&surface)?,
        };
        log::info!("Board exported as {}", image.file_name);
        self.notify(NotificationKind::Success, "Board exported as PNG!");
        Ok(image)
    }

    /// Link to this board under `base`.
    pub fn share_link(&mut self, base: &str) -> String {
        let url = share_url(base, &self.board_id);
        self.notify(NotificationKind::Success, "Board link copied to clipboard!");
        url
    }

    // Periodic work

    pub fn toggle_timer(&mut self) -> bool {
        self.timer.toggle()
    }

    /// Run whatever periodic tasks are due at `now`.
    pub fn tick(&mut self, now: Instant) {
        for task in self.scheduler.poll(now) {
            match task {
                Task::TimerTick => self.timer.tick(),
                Task::RefreshCursors => self.presence.refresh_cursors(&mut rand::rng()),
                Task::AutoSave => self.autosave_if_needed(now),
            }
        }
    }

    fn autosave_if_needed(&mut self, now: Instant) {
        self.sync_settings();
        match self.autosave.maybe_save(&self.board, now) {
            Ok(true) => log::info!("Auto-saved {}", self.board.name),
            Ok(false) => {}
            Err(e) => {
                log::error!("Auto-save failed: {}", e);
                self.notify(NotificationKind::Error, "Auto-save failed");
            }
        }
    }

    // Keyboard

    /// Escape: abandon the gesture or drag and clear the selection.
    pub fn cancel(&mut self) {
        self.engine.cancel_stroke(&self.board.elements);
        if let Some(drag) = self.drag.take() {
            drag.revert(&mut self.board.elements);
            self.redraw();
        }
        self.pan_anchor = None;
        self.selection.clear();
    }

    /// Dispatch a key press. Returns false for unbound keys.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, now: Instant) -> bool {
        let Some(action) = ShortcutRegistry::resolve(key, ctrl, shift) else {
            return false;
        };
        match action {
            ShortcutAction::SelectTool(tool) => self.select_tool(tool),
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::Redo => {
                self.redo();
            }
            ShortcutAction::Save => {
                // Failures are already reported as notifications
                let _ = self.save_board(now);
            }
            ShortcutAction::Copy => {
                self.copy_selected();
            }
            ShortcutAction::Paste => {
                self.paste();
            }
            ShortcutAction::Duplicate => {
                self.duplicate_selected();
            }
            ShortcutAction::SelectAll => self.select_all(),
            ShortcutAction::Delete => {
                if self.selection.is_empty() {
                    self.clear_canvas();
                } else {
                    self.delete_selected();
                }
            }
            ShortcutAction::Cancel => self.cancel(),
            ShortcutAction::ZoomIn => self.zoom_in(),
            ShortcutAction::ZoomOut => self.zoom_out(),
            ShortcutAction::ResetZoom => self.reset_zoom(),
            ShortcutAction::ShowHelp => {
                let help = ShortcutRegistry::help_lines().join("\n");
                self.notify(NotificationKind::Info, help);
            }
        }
        true
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use collabodraw_core::storage::MemoryStorage;

    fn controller() -> BoardController<MemoryStorage> {
        let config = AppConfig {
            surface_width: 400,
            surface_height: 300,
            export_width: 200,
            export_height: 100,
            ..AppConfig::default()
        };
        BoardController::new(Arc::new(MemoryStorage::new()), config, Instant::now()).unwrap()
    }

    fn messages(controller: &mut BoardController<MemoryStorage>) -> Vec<String> {
        controller
            .drain_notifications()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }

    fn draw(controller: &mut BoardController<MemoryStorage>, tool: ToolKind, from: Point, to: Point) -> Option<ElementId> {
        controller.select_tool(tool);
        controller.pointer_down(from, false);
        controller.pointer_move(to);
        controller.pointer_up(to)
    }

    #[test]
    fn test_draw_commits_history() {
        let mut c = controller();
        let id = draw(&mut c, ToolKind::Rectangle, Point::new(10.0, 10.0), Point::new(50.0, 40.0)).unwrap();
        assert!(c.elements().contains(id));
        assert_eq!(c.history().undo_len(), 2);
        assert!(c.has_unsaved_changes());
    }

    #[test]
    fn test_pointer_respects_viewport() {
        let mut c = controller();
        c.zoom_in();
        c.reset_zoom();
        c.pan_by(Vec2::new(100.0, 0.0));
        let id = draw(&mut c, ToolKind::Line, Point::new(110.0, 10.0), Point::new(150.0, 10.0)).unwrap();
        match c.elements().get(id) {
            Some(Element::Line(line)) => {
                assert_eq!(line.start(), Point::new(10.0, 10.0));
                assert_eq!(line.end(), Point::new(50.0, 10.0));
            }
            other => panic!("unexpected element {:?}", other),
        }
    }

    #[test]
    fn test_pointer_clamped_to_surface() {
        let mut c = controller();
        c.pan_by(Vec2::new(100.0, 50.0));
        let id = draw(&mut c, ToolKind::Line, Point::new(20.0, 10.0), Point::new(700.0, 500.0)).unwrap();
        match c.elements().get(id) {
            Some(Element::Line(line)) => {
                assert_eq!(line.start(), Point::new(0.0, 0.0));
                assert_eq!(line.end(), Point::new(400.0, 300.0));
            }
            other => panic!("unexpected element {:?}", other),
        }

        c.select_tool(ToolKind::Text);
        let outcome = c.pointer_down(Point::new(-40.0, 120.0), false);
        assert_eq!(outcome, PointerOutcome::TextRequested(Point::new(0.0, 70.0)));
    }

    #[test]
    fn test_undo_notifications() {
        let mut c = controller();
        assert!(!c.undo());
        assert_eq!(messages(&mut c), vec!["Nothing to undo"]);
        assert!(!c.redo());
        assert_eq!(messages(&mut c), vec!["Nothing to redo"]);
    }

    #[test]
    fn test_text_tool_requests_text() {
        let mut c = controller();
        c.select_tool(ToolKind::Text);
        let outcome = c.pointer_down(Point::new(30.0, 40.0), false);
        assert_eq!(outcome, PointerOutcome::TextRequested(Point::new(30.0, 40.0)));
        assert!(c.add_text(Point::new(30.0, 40.0), "   ").is_none());
        let id = c.add_text(Point::new(30.0, 40.0), "Hello").unwrap();
        assert!(c.elements().contains(id));
    }

    #[test]
    fn test_sticky_placement_and_edit() {
        let mut c = controller();
        c.select_tool(ToolKind::Sticky);
        let PointerOutcome::Placed(id) = c.pointer_down(Point::new(20.0, 20.0), false) else {
            panic!("sticky not placed");
        };
        c.select_tool(ToolKind::Select);
        c.pointer_down(Point::new(100.0, 80.0), false);
        c.pointer_up(Point::new(100.0, 80.0));
        assert!(c.selection().contains(id));

        let before = c.history().undo_len();
        let edit = ContentEdit::Note {
            title: "Ideas".into(),
            content: "Ship it".into(),
        };
        assert!(c.edit_selected(&edit));
        assert_eq!(c.history().undo_len(), before + 1);
        assert!(!c.edit_selected(&ContentEdit::Text("nope".into())));
    }

    #[test]
    fn test_hand_tool_pans() {
        let mut c = controller();
        c.select_tool(ToolKind::Hand);
        c.pointer_down(Point::new(100.0, 100.0), false);
        c.pointer_move(Point::new(130.0, 90.0));
        c.pointer_up(Point::new(130.0, 90.0));
        assert_eq!(c.viewport().pan, Vec2::new(30.0, -10.0));
        assert!(c.elements().is_empty());
    }

    #[test]
    fn test_delete_key_without_selection_clears() {
        let mut c = controller();
        draw(&mut c, ToolKind::Line, Point::new(0.0, 0.0), Point::new(20.0, 20.0));
        assert!(c.handle_key("Delete", false, false, Instant::now()));
        assert!(c.elements().is_empty());
        assert!(c.undo());
        assert_eq!(c.elements().len(), 1);
    }

    #[test]
    fn test_layer_changes() {
        let mut c = controller();
        let a = draw(&mut c, ToolKind::Rectangle, Point::new(10.0, 10.0), Point::new(60.0, 60.0)).unwrap();
        draw(&mut c, ToolKind::Rectangle, Point::new(20.0, 20.0), Point::new(70.0, 70.0)).unwrap();
        c.select_tool(ToolKind::Select);
        c.pointer_down(Point::new(10.0, 30.0), false);
        c.pointer_up(Point::new(10.0, 30.0));
        assert_eq!(c.selection().ids(), &[a]);
        assert_eq!(c.bring_to_front(), 1);
        assert_eq!(c.elements().drawing_order().last().map(|e| e.id()), Some(a));
        assert_eq!(c.send_to_back(), 1);
        assert_eq!(c.elements().get(a).map(Element::layer), Some(-1000));
    }

    #[test]
    fn test_timer_ticks_through_scheduler() {
        let mut c = controller();
        let start = Instant::now();
        assert!(c.toggle_timer());
        c.tick(start + Duration::from_secs(1));
        c.tick(start + Duration::from_secs(2));
        assert!(c.timer().seconds() >= 1);
    }

    #[test]
    fn test_export_png() {
        let mut c = controller();
        c.set_board_name("Sprint Plan");
        let image = c.export_png().unwrap();
        assert_eq!(image.file_name, "Sprint Plan.png");
        assert!(image.data_url.starts_with("data:image/png;base64,"));
        assert_eq!(messages(&mut c), vec!["Board exported as PNG!"]);
    }

    #[test]
    fn test_share_link() {
        let mut c = controller();
        let url = c.share_link("https://draw.example/board");
        assert_eq!(url, format!("https://draw.example/board?board={}", c.board_id()));
        assert_eq!(messages(&mut c), vec!["Board link copied to clipboard!"]);
    }

    #[test]
    fn test_render_view_shows_selection() {
        let mut c = controller();
        draw(&mut c, ToolKind::Rectangle, Point::new(50.0, 50.0), Point::new(100.0, 100.0));
        c.select_all();
        let screen = c.render_view(200, 200).unwrap();
        assert_eq!(screen.pixel(75, 46), Some(collabodraw_render::view::SELECTION_COLOR));
    }
}
