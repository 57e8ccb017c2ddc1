//! Streaming reader/writer for zstd-compressed JSONL corpus files.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use zstd::stream::read::Decoder;
use zstd::stream::write::Encoder;

/// Stream a `.jsonl.zst` file line by line, passing each line (trailing
/// `\n`/`\r\n` stripped) to `on_line`. Decode errors abort the stream: a
/// forum file that cannot be decoded fails the run instead of silently
/// thinning the corpus.
pub fn for_each_line_cfg(
    path: &Path,
    read_buf_bytes: usize,
    mut on_line: impl FnMut(&str) -> Result<()>,
) -> Result<()> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let decoder =
        Decoder::new(file).with_context(|| format!("zstd decoder for {}", path.display()))?;
    let mut reader = BufReader::with_capacity(read_buf_bytes, decoder);

    let mut buf = String::with_capacity(16 * 1024);
    loop {
        buf.clear();
        let n = reader
            .read_line(&mut buf)
            .with_context(|| format!("decode {}", path.display()))?;
        if n == 0 {
            break;
        }
        if buf.ends_with('\n') {
            let _ = buf.pop();
            if buf.ends_with('\r') {
                let _ = buf.pop();
            }
        }
        on_line(&buf)?;
    }
    Ok(())
}

/// Line-oriented zstd JSONL writer. `finish` flushes and closes the frame;
/// dropping without it loses the tail.
pub struct ZstLineWriter {
    enc: Encoder<'static, BufWriter<File>>,
}

impl ZstLineWriter {
    pub fn create(path: &Path, level: i32, write_buf_bytes: usize) -> Result<Self> {
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        let enc = Encoder::new(BufWriter::with_capacity(write_buf_bytes, file), level)
            .with_context(|| format!("zstd encoder for {}", path.display()))?;
        Ok(Self { enc })
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.enc.write_all(line.as_bytes())?;
        self.enc.write_all(b"\n")?;
        Ok(())
    }

    pub fn finish(self) -> Result<()> {
        let mut inner = self.enc.finish()?;
        inner.flush()?;
        Ok(())
    }
}
