use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::trace::{TraceEvent, TraceSink};

/// A trace sink that appends one formatted line per instruction to a file,
/// truncating it on creation the way a fresh run should not be confused
/// with a previous one's output.
pub struct FileTraceSink {
    file: File,
}

impl FileTraceSink {
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<FileTraceSink> {
        let _ = fs::remove_file(&path);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(true)
            .open(path)?;
        Ok(FileTraceSink { file })
    }
}

impl TraceSink for FileTraceSink {
    fn record(&mut self, event: &TraceEvent) {
        // A trace sink observing a diagnostic run is not expected to fail;
        // if the log file disappears mid-run there is nothing sensible to
        // do but drop the line rather than panic the emulator.
        let _ = writeln!(self.file, "{}", event);
    }
}
