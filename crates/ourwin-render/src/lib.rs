//! Software rendering primitives for ourwin.
//!
//! - [`types`]: integer [`Point`], [`Size`], [`Rect`] and RGBA [`Color`]
//! - [`surface`]: the [`Surface`] drawing contract and [`PixelSurface`]
//! - [`text`]: the [`TextShaper`] metrics contract, [`MonospaceShaper`]
//!   and [`TextLayout`]

pub mod surface;
pub mod text;
pub mod types;

pub use surface::{PixelSurface, Surface};
pub use text::{MonospaceShaper, SharedShaper, TextAlign, TextLayout, TextShaper};
pub use types::{Color, Point, Rect, Size};
