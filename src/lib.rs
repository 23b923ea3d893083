//! # Trueno-Figure
//!
//! Retained-mode 2-D plotting canvas for data science scripts.
//!
//! A [`Figure`](figure::Figure) records drawing commands (polylines, scatter
//! markers, text, circles, rectangles, polygons, ellipses) in data
//! coordinates. On render it derives an axis rectangle from the accumulated
//! data bounds and the axis policy, picks "nice" tick values, maps data to
//! pixels, replays every command into an RGB framebuffer and lays out an
//! optional legend. Rendered figures go to PNG files or straight to the
//! terminal.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trueno_figure::prelude::*;
//!
//! # fn main() -> trueno_figure::Result<()> {
//! let mut fig = Figure::new(640, 480)?;
//! fig.plot(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 4.0, 9.0], Color::BLUE, 2.0, "squares");
//! fig.circle(1.5, 4.0, 0.5, ShapeStyle::filled(Color::RED, 0.5), "spot");
//! fig.grid(true);
//! fig.legend(true, "northWest");
//! fig.save("squares.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialize/deserialize layout, styles and axis rectangles
//! - `demo`: Build the `trueno-figure-demo` binary

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// RGB color type and named constants.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, pixel rectangles).
pub mod geometry;

/// Stroke, fill and text styles.
pub mod style;

// ============================================================================
// Plotting Model
// ============================================================================

/// Retained drawing commands.
pub mod command;

/// Running data bounds of all commands.
pub mod bounds;

/// Axis rectangle, policy and resolution.
pub mod axis;

/// "Nice" tick generation.
pub mod ticks;

/// Data-to-pixel mapping and margin layout.
pub mod scale;

/// Legend entries, placement and drawing.
pub mod legend;

/// The user-facing figure.
pub mod figure;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization primitives and bitmap text.
pub mod render;

/// Render pass: axes, grid, commands, legend and labels.
pub mod renderer;

/// Output encoders and display sinks (PNG, terminal).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-figure operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_figure::prelude::*;
/// ```
pub mod prelude {
    pub use batuta_common::display::WithDimensions;

    pub use crate::axis::{AxisPolicy, AxisRect};
    pub use crate::color::Color;
    pub use crate::command::Command;
    pub use crate::error::{Error, Result};
    pub use crate::figure::Figure;
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{PixelPoint, Point};
    pub use crate::legend::LegendLocation;
    pub use crate::output::{Display, TerminalDisplay, TerminalEncoder, TerminalMode};
    pub use crate::scale::Layout;
    pub use crate::style::{HAlign, ShapeStyle, TextStyle, VAlign};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
