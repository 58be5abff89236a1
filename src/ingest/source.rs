use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Buffered line source over the raw measurement file.
///
/// Failure to open means the source is unavailable; errors surfaced while
/// iterating are mid-stream faults and abort the scan that hit them.
pub struct LineSource {
    reader: BufReader<File>,
}

impl LineSource {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            reader: BufReader::new(file),
        })
    }

    /// Line-by-line iteration, for the sequential engine.
    pub fn lines(self) -> io::Lines<BufReader<File>> {
        self.reader.lines()
    }

    /// Iteration in chunks of at most `chunk_size` lines. Order within a
    /// chunk follows input order.
    pub fn chunks(self, chunk_size: usize) -> LineChunks {
        LineChunks {
            lines: self.reader.lines(),
            chunk_size: chunk_size.max(1),
            done: false,
        }
    }
}

pub struct LineChunks {
    lines: io::Lines<BufReader<File>>,
    chunk_size: usize,
    done: bool,
}

impl Iterator for LineChunks {
    type Item = io::Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut chunk = Vec::new();
        while chunk.len() < self.chunk_size {
            match self.lines.next() {
                Some(Ok(line)) => chunk.push(line),
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                None => {
                    self.done = true;
                    break;
                }
            }
        }

        if chunk.is_empty() { None } else { Some(Ok(chunk)) }
    }
}
