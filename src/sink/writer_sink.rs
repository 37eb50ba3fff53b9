use crate::error::Result;
use crate::sink::LogSink;
use std::io::Write;

/// 输出到调用方提供的任意 writer
pub struct WriterSink {
    writer: Box<dyn Write + Send>,
}

impl WriterSink {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }
}

impl LogSink for WriterSink {
    fn write(&mut self, record: &[u8]) -> Result<()> {
        self.writer.write_all(record)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
