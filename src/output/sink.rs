//! Image sinks: showing a named buffer and encoding it to a file.

use super::{PngEncoder, TerminalEncoder, TerminalMode};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Something that can present a rendered figure under a name.
pub trait Display {
    /// Present `fb` titled `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the display is unavailable or the write fails.
    fn show(&mut self, name: &str, fb: &Framebuffer) -> Result<()>;
}

/// Displays figures as colored text on a terminal or any writer.
#[derive(Debug)]
pub struct TerminalDisplay<W: Write> {
    out: W,
    encoder: TerminalEncoder,
}

impl TerminalDisplay<io::Stdout> {
    /// Display on standard output with half-block rendering.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout(), TerminalEncoder::new())
    }
}

impl<W: Write> TerminalDisplay<W> {
    /// Display into `out` using `encoder`.
    pub fn new(out: W, encoder: TerminalEncoder) -> Self {
        Self { out, encoder }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn show(&mut self, name: &str, fb: &Framebuffer) -> Result<()> {
        writeln!(self.out, "{name}")?;
        self.encoder.write_to(fb, &mut self.out)?;
        Ok(())
    }
}

/// Encode `fb` to `path`, choosing the format from the extension.
///
/// `.png` writes an RGB PNG, `.txt` writes ASCII art.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] for other extensions, or the I/O or
/// encoding error.
pub fn encode_to_file<P: AsRef<Path>>(path: P, fb: &Framebuffer) -> Result<()> {
    let path = path.as_ref();
    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => PngEncoder::write_to_file(fb, path),
        Some("txt") => {
            let text = TerminalEncoder::new().mode(TerminalMode::Ascii).render(fb);
            fs::write(path, text)?;
            Ok(())
        }
        other => Err(Error::UnsupportedFormat(other.unwrap_or_default().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_terminal_display_writes_name_and_image() {
        let fb = Framebuffer::filled(8, 8, Color::WHITE).unwrap();
        let encoder = TerminalEncoder::new().mode(TerminalMode::Ascii).width(4);
        let mut display = TerminalDisplay::new(Vec::new(), encoder);

        display.show("demo", &fb).unwrap();

        let text = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(text, "demo\n@@@@\n@@@@\n");
    }

    #[test]
    fn test_encode_png_and_txt() {
        let fb = Framebuffer::filled(16, 8, Color::BLACK).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let png = dir.path().join("out.PNG");
        encode_to_file(&png, &fb).unwrap();
        assert_eq!(&fs::read(&png).unwrap()[1..4], b"PNG");

        let txt = dir.path().join("out.txt");
        encode_to_file(&txt, &fb).unwrap();
        assert!(fs::read_to_string(&txt).unwrap().starts_with(' '));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let fb = Framebuffer::new(4, 4).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let err = encode_to_file(dir.path().join("out.bmp"), &fb).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ref e) if e == "bmp"));

        let err = encode_to_file(dir.path().join("noext"), &fb).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
        assert!(!dir.path().join("out.bmp").exists());
    }
}
