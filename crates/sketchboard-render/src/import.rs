//! Image import: decode a file into a bitmap and place it on the board.
//!
//! Decoding can be slow, so [`PendingImport`] runs it on a worker thread. The
//! board stays usable meanwhile; the image only joins the scene once the
//! owner calls [`PendingImport::try_finish`] or [`PendingImport::wait`] and
//! the decode succeeded.

use crate::renderer::{RenderError, RenderResult};
use sketchboard_core::{Bitmap, ShapeId, Whiteboard};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Decode PNG, JPEG or WebP bytes into an RGBA8 bitmap.
pub fn decode_image(bytes: &[u8]) -> RenderResult<Bitmap> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Bitmap::new(width, height, rgba.into_raw())
        .ok_or_else(|| RenderError::InvalidBitmap(format!("{width}x{height}")))
}

/// Decode synchronously and insert. On failure the board is left untouched.
pub fn import_image(board: &mut Whiteboard, bytes: &[u8]) -> RenderResult<ShapeId> {
    match decode_image(bytes) {
        Ok(bitmap) => Ok(board.insert_image(bitmap)),
        Err(err) => {
            log::error!("image import failed: {err}");
            Err(err)
        }
    }
}

/// An image decode running in the background.
#[derive(Debug)]
pub struct PendingImport {
    rx: Receiver<RenderResult<Bitmap>>,
}

impl PendingImport {
    /// Start decoding `bytes` on a worker thread.
    pub fn spawn(bytes: Vec<u8>) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // The receiver may be gone if the import was abandoned.
            let _ = tx.send(decode_image(&bytes));
        });
        Self { rx }
    }

    /// Read `path` and decode it on a worker thread.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = std::fs::read(&path)
                .map_err(RenderError::from)
                .and_then(|bytes| decode_image(&bytes));
            let _ = tx.send(result);
        });
        Self { rx }
    }

    /// Insert the image if decoding has finished.
    ///
    /// While still decoding, hands the import back as `Err` so it can be
    /// polled again.
    pub fn try_finish(self, board: &mut Whiteboard) -> Result<RenderResult<ShapeId>, Self> {
        match self.rx.try_recv() {
            Ok(result) => Ok(Self::finish(board, result)),
            Err(TryRecvError::Empty) => Err(self),
            Err(TryRecvError::Disconnected) => Ok(Self::finish(board, Err(worker_gone()))),
        }
    }

    /// Block until decoding finishes, then insert.
    pub fn wait(self, board: &mut Whiteboard) -> RenderResult<ShapeId> {
        let result = self.rx.recv().unwrap_or_else(|_| Err(worker_gone()));
        Self::finish(board, result)
    }

    fn finish(board: &mut Whiteboard, result: RenderResult<Bitmap>) -> RenderResult<ShapeId> {
        match result {
            Ok(bitmap) => Ok(board.insert_image(bitmap)),
            Err(err) => {
                log::error!("image import failed: {err}");
                Err(err)
            }
        }
    }
}

fn worker_gone() -> RenderError {
    RenderError::WorkerGone
}
