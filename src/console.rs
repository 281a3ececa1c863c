use std::io;

use tracing::Level;
use web_sys::console::log_1;

/// `io::Write` sink that forwards each formatted tracing line to `console.log`.
pub struct ConsoleWriter;

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let line = String::from_utf8_lossy(buf);
        log_1(&line.trim_end().into());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Panic messages and tracing output both end up in the browser console.
/// Calling this more than once is harmless.
pub fn init() {
    console_error_panic_hook::set_once();

    // No clock on wasm32-unknown-unknown, so no timestamps
    let _ = tracing_subscriber::fmt()
        .with_writer(|| ConsoleWriter)
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .try_init();
}
