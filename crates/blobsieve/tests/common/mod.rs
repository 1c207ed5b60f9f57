#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use ndarray::{arr2, ArrayD};

/// The 3x5 mask used throughout the sieve tests:
///
/// ```text
/// 0 0 0 1 0
/// 1 1 1 0 0
/// 1 1 1 0 1
/// ```
///
/// With face adjacency it has components of size 1, 6 and 1; with full
/// adjacency the top pixel joins the block (size 7).
pub fn example_mask() -> ArrayD<bool> {
    arr2(&[[0u8, 0, 0, 1, 0], [1, 1, 1, 0, 0], [1, 1, 1, 0, 1]])
        .mapv(|v| v != 0)
        .into_dyn()
}

/// Build a boolean mask from 0/1 rows.
pub fn mask2(rows: &[[u8; 5]]) -> ArrayD<bool> {
    let flat: Vec<bool> = rows.iter().flatten().map(|&v| v != 0).collect();
    ArrayD::from_shape_vec(vec![rows.len(), 5], flat).expect("shape matches data")
}

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log buffer lock")).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a fmt subscriber writing into a buffer; return its output.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
