//! WebAssembly entry point and browser bindings.

use crate::config::AppConfig;
use crate::controller::BoardController;
use crate::navigation::NavigationParams;
use collabodraw_core::storage::LocalStorage;
use collabodraw_core::time::Instant;
use collabodraw_core::{HexColor, ToolKind};
use kurbo::{Point, Vec2};
use std::sync::Arc;
use wasm_bindgen::prelude::*;

/// Read navigation parameters from the page URL.
pub fn get_url_params() -> NavigationParams {
    let Some(window) = web_sys::window() else {
        return NavigationParams::default();
    };
    let location = window.location();
    let search = location.search().unwrap_or_default();
    let hash = location.hash().unwrap_or_default();
    NavigationParams::from_location(&search, &hash)
}

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A board session driven from JavaScript.
#[wasm_bindgen]
pub struct WebBoard {
    controller: BoardController<LocalStorage>,
}

#[wasm_bindgen]
impl WebBoard {
    /// Open the board named in the page URL, or the last saved board.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebBoard, JsValue> {
        let storage = LocalStorage::new().map_err(to_js)?;
        let params = get_url_params();
        let controller = BoardController::open(Arc::new(storage), AppConfig::default(), &params, Instant::now())
            .map_err(to_js)?;
        Ok(WebBoard { controller })
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, shift: bool) {
        self.controller.pointer_down(Point::new(x, y), shift);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.controller.pointer_move(Point::new(x, y));
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.controller.pointer_up(Point::new(x, y));
    }

    /// Place text at a screen position.
    pub fn add_text(&mut self, x: f64, y: f64, text: &str) -> bool {
        let point = self.controller.board_point(Point::new(x, y));
        self.controller.add_text(point, text).is_some()
    }

    pub fn key(&mut self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.controller.handle_key(key, ctrl, shift, Instant::now())
    }

    /// Select a tool by name ("pen", "rectangle", ...).
    pub fn select_tool(&mut self, name: &str) -> bool {
        match ToolKind::all().iter().find(|tool| tool.name() == name) {
            Some(tool) => {
                self.controller.select_tool(*tool);
                true
            }
            None => false,
        }
    }

    /// Set the drawing color from a `#rrggbb` string.
    pub fn select_color(&mut self, color: &str) -> Result<(), JsValue> {
        let color: HexColor = color.parse().map_err(to_js)?;
        self.controller.select_color(color);
        Ok(())
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.controller.pan_by(Vec2::new(dx, dy));
    }

    pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
        self.controller.zoom_at(Point::new(x, y), factor);
    }

    pub fn zoom_percent(&self) -> u32 {
        self.controller.zoom_percent()
    }

    pub fn set_board_name(&mut self, name: &str) {
        self.controller.set_board_name(name);
    }

    pub fn save(&mut self) -> Result<(), JsValue> {
        self.controller.save_board(Instant::now()).map(|_| ()).map_err(to_js)
    }

    pub fn restore_version(&mut self, id: &str) -> bool {
        self.controller.restore_version(id, Instant::now())
    }

    pub fn toggle_timer(&mut self) -> bool {
        self.controller.toggle_timer()
    }

    pub fn timer_display(&self) -> String {
        self.controller.timer().display()
    }

    /// Call from a short `setInterval`; runs due periodic tasks.
    pub fn tick(&mut self) {
        self.controller.tick(Instant::now());
    }

    /// RGBA pixels of the visible view, for `ImageData`.
    pub fn render(&self, width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
        let view = self.controller.render_view(width, height).map_err(to_js)?;
        Ok(view.pixels().to_vec())
    }

    pub fn export_data_url(&mut self) -> Result<String, JsValue> {
        Ok(self.controller.export_png().map_err(to_js)?.data_url)
    }

    pub fn share_link(&mut self) -> String {
        let base = web_sys::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default();
        self.controller.share_link(&base)
    }

    /// Pending notification messages, oldest first.
    pub fn take_notifications(&mut self) -> Vec<String> {
        self.controller
            .drain_notifications()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }
}

/// Initialize logging when the module loads.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Starting CollaboDraw (WASM)");

    let params = get_url_params();
    if let Some(ref board) = params.board {
        log::info!("Board from URL: {}", board);
    }
    if let Some(ref session) = params.session {
        log::info!("Session from URL: {}", session);
    }
}
