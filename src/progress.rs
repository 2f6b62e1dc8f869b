// src/progress.rs
/// Lightweight progress reporting for a run.
/// The CLI implements this to print one line per step; library callers can
/// pass `None` or [`NullProgress`].
pub trait Progress {
    /// Called at the start with the number of selected sources.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One source got through download and parse.
    fn item_done(&mut self, _key: &str) {}

    /// One source failed at some stage.
    fn item_failed(&mut self, _key: &str, _err: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints to stdout (progress) and stderr (failures).
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, key: &str) {
        self.done += 1;
        println!("[{}/{}] {key} done", self.done, self.total);
    }

    fn item_failed(&mut self, key: &str, err: &str) {
        self.done += 1;
        eprintln!("[{}/{}] ERROR {key}: {err}", self.done, self.total);
    }
}
