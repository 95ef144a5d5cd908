/*!
A decoder for Type1 charstrings.

This crate decrypts and interprets Type1 charstrings, the stack-based bytecode
that describes the outline and hints of a glyph in a Type1 font program, and
reports the result as a sequence of callbacks on a [`GlyphSink`].

The full operator set is supported, including subroutines, the othersubr
protocol (Flex, hint replacement, counter control), `seac` accented characters
and multiple master blending. Reading the font program itself, i.e. finding
the charstrings and subroutines, is left to the caller, which provides them
through a [`Source`] and the offsets in [`ParseConfig`].

## Example
```
use hayro_charstring::{GlyphSink, MemorySource, ParseConfig, parse};

#[derive(Default)]
struct Points(Vec<(f32, f32)>);

impl GlyphSink for Points {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.push((x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.push((x, y));
    }
}

// 0 500 hsbw 100 200 rmoveto 50 0 rlineto closepath endchar
let data = [139, 248, 136, 13, 239, 247, 92, 21, 189, 139, 5, 9, 14];
let mut points = Points::default();
parse(&mut MemorySource::new(&data), 0, &ParseConfig::default(), &mut points).unwrap();

assert_eq!(points.0, [(100.0, 200.0), (150.0, 200.0)]);
```

## Safety
This crate forbids unsafe code via a crate-level attribute.
*/

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use bitflags::bitflags;

mod argstack;
mod charstring;
mod decrypt;
mod error;
mod operator;
mod source;
pub mod standard;
mod util;

pub use argstack::MAX_ARGUMENTS_STACK_LEN;
pub use charstring::{BCA_LEN, MAX_AXES, MAX_MASTERS, MAX_SUBR_DEPTH, parse};
pub use decrypt::{decrypt, decrypt_double};
pub use error::{Error, Result};
pub use source::{MemorySource, Source};

/// The generic operator code that is reported for `dotsection`.
pub const DOTSECTION: u16 = 12 << 8;

bitflags! {
    /// The callbacks a [`GlyphSink`] implements.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        /// [`GlyphSink::width`].
        const WIDTH = 1 << 0;
        /// [`GlyphSink::move_to`].
        const MOVE = 1 << 1;
        /// [`GlyphSink::line_to`].
        const LINE = 1 << 2;
        /// [`GlyphSink::curve_to`].
        const CURVE = 1 << 3;
        /// [`GlyphSink::stem`].
        const STEM = 1 << 4;
        /// [`GlyphSink::flex`].
        const FLEX = 1 << 5;
        /// [`GlyphSink::seac`].
        const SEAC = 1 << 6;
        /// [`GlyphSink::genop`].
        const GENOP = 1 << 7;
        /// Width and path callbacks.
        const OUTLINE = Self::WIDTH.bits() | Self::MOVE.bits() | Self::LINE.bits() | Self::CURVE.bits();
    }
}

bitflags! {
    /// Flags attached to a stem hint.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct StemFlags: u8 {
        /// The stem is vertical (`vstem`), otherwise horizontal.
        const VERTICAL = 1 << 0;
        /// The stem belongs to a counter control group.
        const COUNTER = 1 << 1;
        /// The stem was specified with `hstem3`/`vstem3`.
        const STEM3 = 1 << 2;
        /// The stem starts a new set of hints (hint substitution).
        const NEW_HINTS = 1 << 3;
        /// The stem starts a new counter control group.
        const NEW_GROUP = 1 << 4;
    }
}

bitflags! {
    /// Flags controlling how a charstring is decoded.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ParseFlags: u8 {
        /// Stop as soon as the width is known.
        const WIDTH_ONLY = 1 << 0;
        /// Transform all coordinates by [`ParseConfig::matrix`].
        const USE_MATRIX = 1 << 1;
        /// Resolve deprecated operators: `seac` is decomposed into its
        /// components and `dotsection` is dropped.
        const UPDATE_OPS = 1 << 2;
    }
}

/// Receives the decoded glyph.
///
/// All methods have empty default implementations. A sink declares the
/// methods it actually implements through [`GlyphSink::capabilities`]; the
/// decoder falls back to an equivalent decomposition for missing ones.
pub trait GlyphSink {
    /// Returns the callbacks this sink implements.
    fn capabilities(&self) -> Capabilities {
        Capabilities::OUTLINE
    }

    /// Reports the horizontal advance width.
    fn width(&mut self, _hadv: f32) {}

    /// Starts a new contour.
    fn move_to(&mut self, _x: f32, _y: f32) {}

    /// Appends a line to the current contour.
    fn line_to(&mut self, _x: f32, _y: f32) {}

    /// Appends a cubic curve to the current contour.
    fn curve_to(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32, _x3: f32, _y3: f32) {}

    /// Reports a stem hint spanning `edge0` to `edge1`.
    ///
    /// Without this capability, hints are dropped.
    fn stem(&mut self, _flags: StemFlags, _edge0: f32, _edge1: f32) {}

    /// Reports a Flex hint, consisting of two curves given by six absolute
    /// points, and its depth in hundredths of a device pixel.
    ///
    /// Without this capability, the two curves are reported via
    /// [`GlyphSink::curve_to`].
    fn flex(&mut self, _depth: f32, _points: &[f32; 12]) {}

    /// Reports an accented character composed of the StandardEncoding codes
    /// `bchar` and `achar`, with the accent shifted by `(adx, ady)`.
    ///
    /// Without this capability, the components are decoded in place.
    fn seac(&mut self, _adx: f32, _ady: f32, _bchar: u8, _achar: u8) {}

    /// Reports an operator without a dedicated callback, such as
    /// [`DOTSECTION`].
    fn genop(&mut self, _op: u16, _args: &[f32]) {}
}

/// An affine transformation matrix.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix {
    pub sx: f32,
    pub ky: f32,
    pub kx: f32,
    pub sy: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Matrix {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        sx: 1.0,
        ky: 0.0,
        kx: 0.0,
        sy: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Creates a matrix from the six entries of a PostScript matrix.
    pub fn from_row(m: [f32; 6]) -> Self {
        Self {
            sx: m[0],
            ky: m[1],
            kx: m[2],
            sy: m[3],
            tx: m[4],
            ty: m[5],
        }
    }

    /// Whether this is the identity matrix.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Transforms a point.
    #[inline]
    pub fn transform(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.sx * x + self.kx * y + self.tx,
            self.ky * x + self.sy * y + self.ty,
        )
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Everything the decoder needs to know about the font besides the charstring.
#[derive(Clone, Copy, Default)]
pub struct ParseConfig<'a> {
    /// Decoding flags.
    pub flags: ParseFlags,
    /// The source offsets of the font's subroutines, indexed by subroutine
    /// number.
    pub subrs: &'a [u64],
    /// The transform applied with [`ParseFlags::USE_MATRIX`].
    pub matrix: Matrix,
    /// The number of master designs of a multiple master font.
    pub masters: usize,
    /// The weight vector, one weight per master.
    pub weight_vector: &'a [f32],
    /// The normalized design vector, one value per axis.
    pub normalized_design_vector: &'a [f32],
    /// The user design vector, one value per axis.
    pub user_design_vector: &'a [f32],
    /// Maps a StandardEncoding code to the source offset of the
    /// corresponding glyph's charstring. Used to decompose `seac`.
    pub seac_lookup: Option<&'a dyn Fn(u8) -> Option<u64>>,
}

impl core::fmt::Debug for ParseConfig<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParseConfig")
            .field("flags", &self.flags)
            .field("subrs", &self.subrs.len())
            .field("matrix", &self.matrix)
            .field("masters", &self.masters)
            .field("weight_vector", &self.weight_vector)
            .field("seac_lookup", &self.seac_lookup.is_some())
            .finish_non_exhaustive()
    }
}

/// The components of an accented character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SeacComponents {
    /// The StandardEncoding code of the base character.
    pub base: u8,
    /// The StandardEncoding code of the accent.
    pub accent: u8,
}

/// Information collected while decoding a glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphInfo {
    /// The advance width, if the charstring specified one.
    pub width: Option<f32>,
    /// The components, if the glyph is an accented character.
    pub seac: Option<SeacComponents>,
}
