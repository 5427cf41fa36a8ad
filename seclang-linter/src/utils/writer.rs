use std::fs::File;
use std::io::{Stderr, Stdout, Write};
use std::string::FromUtf8Error;

///
/// Output of a command: regular output goes to `buffer`, rendered diagnostics and command
/// errors to `err`. Tests use `Vec` buffers on both sides and read them back.
///
pub struct Writer {
    buffer: WriteBuffer,
    err: WriteBuffer,
}

impl Default for Writer {
    fn default() -> Self {
        Writer::new(
            WriteBuffer::Stdout(std::io::stdout()),
            WriteBuffer::Stderr(std::io::stderr()),
        )
    }
}

impl Writer {
    pub fn new(buffer: WriteBuffer, err: WriteBuffer) -> Self {
        Self { buffer, err }
    }

    pub fn buffered() -> Self {
        Writer::new(WriteBuffer::Vec(vec![]), WriteBuffer::Vec(vec![]))
    }

    pub fn write_err(&mut self, s: String) -> std::io::Result<()> {
        writeln!(self.err, "{}", s)
    }

    pub fn err_to_stripped(&self) -> Result<String, FromUtf8Error> {
        self.err.stripped()
    }

    pub fn stripped(&self) -> Result<String, FromUtf8Error> {
        self.buffer.stripped()
    }

    pub fn into_string(self) -> Result<String, FromUtf8Error> {
        self.buffer.into_string()
    }
}

impl Write for Writer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.buffer.flush()?;
        self.err.flush()
    }
}

pub enum WriteBuffer {
    Stdout(Stdout),
    Stderr(Stderr),
    Vec(Vec<u8>),
    File(File),
}

impl WriteBuffer {
    /// captured content without ANSI colour codes, empty for process streams and files
    fn stripped(&self) -> Result<String, FromUtf8Error> {
        match self {
            WriteBuffer::Vec(vec) => {
                let plain = strip_ansi_escapes::strip(vec).unwrap_or_else(|_| vec.clone());
                String::from_utf8(plain)
            }
            _ => Ok(String::new()),
        }
    }

    fn into_string(self) -> Result<String, FromUtf8Error> {
        match self {
            WriteBuffer::Vec(vec) => String::from_utf8(vec),
            _ => Ok(String::new()),
        }
    }
}

impl Write for WriteBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            WriteBuffer::Stdout(stdout) => stdout.write(buf),
            WriteBuffer::Stderr(stderr) => stderr.write(buf),
            WriteBuffer::Vec(vec) => vec.write(buf),
            WriteBuffer::File(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            WriteBuffer::Stdout(stdout) => stdout.flush(),
            WriteBuffer::Stderr(stderr) => stderr.flush(),
            WriteBuffer::Vec(vec) => vec.flush(),
            WriteBuffer::File(file) => file.flush(),
        }
    }
}
