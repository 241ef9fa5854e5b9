//! Native entry point.
//!
//! Usage:
//!   collabodraw [board=<id>&session=<id>]   show the saved board
//!   collabodraw export [file.png]           render the saved board to a PNG
//!   collabodraw shortcuts                   list keyboard shortcuts

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Starting CollaboDraw");

    if let Err(e) = native::run(std::env::args().skip(1).collect()) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser build starts through `run_wasm`.
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use collabodraw_app::{AppConfig, BoardController, NavigationParams, ShortcutRegistry};
    use collabodraw_core::storage::{FileStorage, PlatformStorage, create_default_storage};
    use collabodraw_core::time::Instant;
    use std::error::Error;
    use std::sync::Arc;

    pub fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let command = args.first().map(String::as_str);
        if command == Some("shortcuts") {
            ShortcutRegistry::print_all();
            return Ok(());
        }

        let config = AppConfig::load_or_default();
        let storage: PlatformStorage = match &config.storage_dir {
            Some(dir) => FileStorage::new(dir.clone())?,
            None => create_default_storage()?,
        };
        log::info!("Storage at {}", storage.base_path().display());

        let query = match command {
            Some("export") | None => "",
            Some(query) => query,
        };
        let params = NavigationParams::from_location(query, "");
        let controller = BoardController::open(Arc::new(storage), config, &params, Instant::now())?;

        if command == Some("export") {
            let path = match args.get(1) {
                Some(path) => path.clone(),
                None => collabodraw_render::export_file_name(&controller.board().name),
            };
            std::fs::write(&path, controller.export_png_bytes()?)?;
            println!("Exported {}", path);
            return Ok(());
        }

        let board = controller.board();
        println!("{} ({} elements)", board.name, board.elements.len());
        for version in controller.versions() {
            println!("  {}  {:12} {}", version.time_label(), version.description, version.id);
        }
        Ok(())
    }
}
