//! As of now, there is only one function, [`run_debug_output`], which is meant
//! to debug the bytes the decoder produces for each line of input. Tracing
//! events with the [`tracing`](https://docs.rs/tracing/latest/tracing/) crate
//! are configured separately by the `escline` binary.

/// This function is used for debugging the bytes produced by the decoder.
/// It will create a file "debug.txt" and print each decoded line as the
/// actual bytes along with the corresponding (lossy) UTF-8 text.
///
/// A line written to "debug.txt" may look like this:
///
/// "\[04:41:27.550\] OUT 7 bytes: \[1B, 5B, 33, 31, 6D, 68, 69\] UTF8: ^\[\[31mhi"
///
/// Each line will only print a maximum of 20 bytes, after 20 it will simply
/// write "...".
pub async fn run_debug_output(mut rx: tokio::sync::broadcast::Receiver<Vec<u8>>) {
    use std::io::{BufWriter, Write};
    use std::path::Path;

    let path = Path::new("./debug.txt");
    let file = match std::fs::File::create(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to create file: {e}");
            return;
        }
    };
    let mut writer = BufWriter::new(file);
    writeln!(writer, "Session started at: {}", chrono::Utc::now()).ok();

    loop {
        match rx.recv().await {
            Ok(data) => {
                let shown = std::cmp::min(20, data.len());
                writeln!(
                    writer,
                    "[{}] OUT {} bytes: {:02X?}{} UTF8: {}",
                    chrono::Utc::now().format("%H:%M:%S%.3f"),
                    data.len(),
                    &data[..shown],
                    if data.len() > shown { "..." } else { "" },
                    String::from_utf8_lossy(&data)
                )
                .ok();
                let _ = writer.flush();
            }
            Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                eprintln!("Debug writer lagged, skipped {skipped} lines");
            }
            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
        }
    }
    let _ = writer.flush();
}
