use std::io;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Rendering hint for a line of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Highlight,
    Error,
}

/// One interactive text channel: a terminal, or one network connection.
///
/// `ask` is a single blocking request/response exchange; `write` emits one
/// line. The interpreter never touches the underlying io directly, so the
/// same command loop runs over stdin/stdout and over a TCP stream.
#[async_trait]
pub trait Console: Send {
    /// Print `prompt` without a newline and wait for one line of input.
    /// Returns `None` when the channel is closed (EOF / disconnect).
    async fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Write one line of output.
    async fn write(&mut self, text: &str, style: Style) -> io::Result<()>;
}

/// `Console` over any buffered async reader/writer pair.
///
/// ANSI styling is opt-in: on for a local terminal, off for sockets.
pub struct LineConsole<R, W> {
    reader: R,
    writer: W,
    color: bool,
}

impl<R, W> LineConsole<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            color: false,
        }
    }

    #[must_use]
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    fn render(&self, text: &str, style: Style) -> String {
        if !self.color {
            return text.to_owned();
        }
        match style {
            Style::Plain => text.to_owned(),
            Style::Highlight => format!("\x1b[1m{text}\x1b[0m"),
            Style::Error => format!("\x1b[31m{text}\x1b[0m"),
        }
    }
}

#[async_trait]
impl<R, W> Console for LineConsole<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let rendered = self.render(prompt, Style::Highlight);
        self.writer.write_all(rendered.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    async fn write(&mut self, text: &str, style: Style) -> io::Result<()> {
        let rendered = self.render(text, style);
        self.writer.write_all(rendered.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }
}
