//! Background save worker.
//!
//! The editor hands the flattened PNG to the host side as a
//! `save-image` message; this worker plays the host, decoding the
//! data URL and writing the bytes wherever the user points the
//! file dialog. The dialog and the write both run off the UI thread.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use markpen_core::message::{HostMessage, png_from_data_url};

#[derive(Debug)]
pub enum SaveEvent {
    Finished(PathBuf),
    Cancelled,
    Failed(String),
}

pub struct SaveWorker {
    rx: Receiver<SaveEvent>,
    _worker: thread::JoinHandle<()>,
}

impl SaveWorker {
    pub fn spawn(message: HostMessage, default_name: String) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker = thread::spawn(move || {
            let _ = tx.send(run_save(message, &default_name));
        });
        Self {
            rx,
            _worker: worker,
        }
    }

    pub fn try_recv(&self) -> Option<SaveEvent> {
        self.rx.try_recv().ok()
    }
}

fn run_save(message: HostMessage, default_name: &str) -> SaveEvent {
    let HostMessage::SaveImage { data_url } = message;
    let Some(png_bytes) = png_from_data_url(&data_url) else {
        return SaveEvent::Failed("save message carries an invalid data URL".to_string());
    };

    let Some(path) = rfd::FileDialog::new()
        .set_title("Save annotated image")
        .set_file_name(default_name)
        .add_filter("PNG Image", &["png"])
        .save_file()
    else {
        return SaveEvent::Cancelled;
    };

    match std::fs::write(&path, &png_bytes) {
        Ok(()) => {
            log::info!("Saved annotated image to: {:?}", path);
            SaveEvent::Finished(path)
        }
        Err(err) => SaveEvent::Failed(format!("cannot write {}: {err}", path.display())),
    }
}
