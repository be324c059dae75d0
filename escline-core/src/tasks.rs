//! Background writer tasks that consume decoded output during an
//! interactive session.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};
use tracing::{info, instrument};

/// Responsible for spawning a blocking task with [`tokio::task::spawn_blocking()`]
/// and forwarding each decoded line received on `file_rx` to it, where the raw
/// bytes are appended to the transcript at `file_path`, one record per line.
#[instrument(name = "File output", skip(file_rx))]
pub async fn run_file_output(
    mut file_rx: tokio::sync::broadcast::Receiver<Vec<u8>>,
    file_path: PathBuf,
) {
    let (write_tx, write_rx) = std::sync::mpsc::channel::<Vec<u8>>();
    info!("Creating file: '{}'", file_path.display());
    let write_handle = tokio::task::spawn_blocking(move || {
        let file = match File::create(&file_path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Failed to create file '{}': {e}", file_path.display());
                return;
            }
        };
        let mut writer = BufWriter::with_capacity(8 * 1024, file);

        writeln!(writer, "Session started at: {}", chrono::Utc::now()).ok();
        while let Ok(data) = write_rx.recv() {
            writer.write_all(&data).ok();
            writer.write_all(b"\n").ok();
            // Line-oriented volume; flush per record so the transcript
            // trails the session by at most one line.
            let _ = writer.flush();
        }
        let _ = writer.flush();
    });

    let data_streamer = tokio::spawn(async move {
        loop {
            match file_rx.recv().await {
                Ok(data) => {
                    if write_tx.send(data).is_err() {
                        break;
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    eprintln!("File writer lagged, skipped {skipped} lines");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let _ = data_streamer.await;
    let _ = write_handle.await;
}
