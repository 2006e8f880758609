//! Main application entry point.

mod app;
mod save;
mod shortcuts;
mod ui;

use std::path::{Path, PathBuf};

use app::MarkPenApp;

fn main() {
    env_logger::init();
    log::info!("Starting MarkPen");

    let args: Vec<String> = std::env::args().collect();
    let image_path = match args.get(1).map(String::as_str) {
        Some("--shortcuts") => {
            shortcuts::ShortcutRegistry::print_all();
            return;
        }
        Some(arg) => PathBuf::from(arg),
        None => match pick_image() {
            Some(path) => path,
            None => {
                eprintln!("Usage: markpen <image.png|jpg|jpeg>");
                std::process::exit(1);
            }
        },
    };

    if !image_path.exists() {
        eprintln!("File not found: {}", image_path.display());
        std::process::exit(1);
    }

    if !is_supported_image(&image_path) {
        eprintln!(
            "Unsupported file type: {} (expected .png, .jpg, or .jpeg)",
            image_path.display()
        );
        std::process::exit(1);
    }

    let image = match image::open(&image_path) {
        Ok(image) => image,
        Err(err) => {
            eprintln!("Cannot open {}: {err}", image_path.display());
            std::process::exit(1);
        }
    };

    let title = format!(
        "MarkPen — {}",
        image_path
            .file_name()
            .unwrap_or_default()
            .to_str()
            .unwrap_or("")
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title(&title),
        ..Default::default()
    };

    if let Err(err) = eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(MarkPenApp::new(image_path, image)))),
    ) {
        eprintln!("Cannot start editor: {err}");
        std::process::exit(1);
    }
}

/// Extension check performed before the editor opens.
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg"))
        .unwrap_or(false)
}

fn pick_image() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open Image")
        .add_filter("Images", &["png", "jpg", "jpeg"])
        .pick_file()
}
