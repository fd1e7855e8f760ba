//! Output sink for rendered diagnostics.
//!
//! Everything the reporter prints goes through a [`Console`]. Production code
//! points it at stdout or stderr; tests capture into a [`CaptureBuffer`].

use std::io::Write;
use std::sync::{Arc, Mutex};

/// Receives already-formatted text, newlines included.
pub type Sink = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Clone)]
pub struct Console {
    sink: Sink,
}

impl Console {
    pub fn new(sink: Sink) -> Self {
        Self { sink }
    }

    pub fn stdout() -> Self {
        Self::new(Arc::new(|text: &str| {
            let mut out = std::io::stdout().lock();
            // Write failures such as a closed pipe are dropped.
            let _ = out.write_all(text.as_bytes());
            let _ = out.flush();
        }))
    }

    pub fn stderr() -> Self {
        Self::new(Arc::new(|text: &str| {
            let _ = std::io::stderr().lock().write_all(text.as_bytes());
        }))
    }

    /// Console that appends into a shared buffer.
    pub fn capture() -> (Self, CaptureBuffer) {
        let buffer = CaptureBuffer::default();
        let target = buffer.clone();
        let console = Self::new(Arc::new(move |text: &str| target.push(text)));
        (console, buffer)
    }

    pub fn print(&self, text: &str) {
        (self.sink)(text);
    }

    pub fn println(&self, text: &str) {
        (self.sink)(&format!("{}\n", text));
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

#[derive(Clone, Default, Debug)]
pub struct CaptureBuffer(Arc<Mutex<String>>);

impl CaptureBuffer {
    fn push(&self, text: &str) {
        self.0
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_str(text);
    }

    pub fn contents(&self) -> String {
        self.0
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}
