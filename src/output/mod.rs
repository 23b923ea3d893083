//! Output encoders and display sinks (PNG, terminal).

mod png_encoder;
mod sink;
mod terminal;

pub use png_encoder::PngEncoder;
pub use sink::{encode_to_file, Display, TerminalDisplay};
pub use terminal::{TerminalEncoder, TerminalMode};
