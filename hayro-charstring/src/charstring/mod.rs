//! The charstring interpreter.

mod arith;
mod blend;
mod othersubr;
mod path;

use crate::argstack::{Accumulator, ArgumentsStack};
use crate::error::{Error, Result};
use crate::operator::{sb_operator, tb_operator};
use crate::source::{Input, Source};
use crate::util::{TryNumFrom, to_index};
use crate::{
    Capabilities, DOTSECTION, GlyphInfo, GlyphSink, ParseConfig, ParseFlags, SeacComponents,
};
use bitflags::bitflags;
use log::{debug, trace, warn};

/// The maximum nesting depth of subroutine calls.
pub const MAX_SUBR_DEPTH: usize = 10;
/// The length of the BuildCharArray.
pub const BCA_LEN: usize = 32;
/// The maximum number of master designs.
pub const MAX_MASTERS: usize = 16;
/// The maximum number of design axes.
pub const MAX_AXES: usize = 4;

/// Reference point plus six curve points of a Flex, plus depth and end point.
const FLEX_LEN: usize = 17;
const FLEX_POINTS_LEN: usize = 14;
const CNTR_LEN: usize = 96;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) struct Flags: u16 {
        /// Between Flex start and Flex end.
        const IN_FLEX = 1 << 0;
        /// A moveto must be synthesized before the next line or curve.
        const PEND_MOVETO = 1 << 1;
        /// The next stem starts a new set of hints.
        const PEND_HINTSUBS = 1 << 2;
        /// The glyph uses hint substitution.
        const SEEN_HINTSUBS = 1 << 3;
        const SEEN_MOVETO = 1 << 4;
        const SEEN_ENDCHAR = 1 << 5;
        /// Control points and hint edges are rounded from now on.
        const SEEN_BLEND = 1 << 6;
        /// The next stem starts a new counter group.
        const NEW_GROUP = 1 << 7;
        const USE_MATRIX = 1 << 8;
    }
}

/// How a decode level ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Return,
    EndChar,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SeacPhase {
    None,
    Base,
    AccentPreMove,
    AccentPostMove,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Point {
    x: f32,
    y: f32,
}

#[derive(Clone, Copy, Debug)]
struct Seac {
    phase: SeacPhase,
    /// The side bearing of the component currently being decoded.
    component_lsb: Point,
    /// The offset applied to the accent.
    shift: Point,
}

/// Decodes the charstring at `offset` and reports the glyph to `sink`.
pub fn parse(
    source: &mut dyn Source,
    offset: u64,
    config: &ParseConfig<'_>,
    sink: &mut dyn GlyphSink,
) -> Result<GlyphInfo> {
    let mut decoder = Decoder::new(source, config, sink);

    match decoder.run(offset) {
        Ok(()) => Ok(GlyphInfo {
            width: decoder.width,
            seac: decoder.seac_components,
        }),
        Err(e) => {
            warn!("failed to decode charstring at offset {offset}: {e}");

            Err(e)
        }
    }
}

pub(crate) struct Decoder<'a> {
    config: &'a ParseConfig<'a>,
    sink: &'a mut dyn GlyphSink,
    caps: Capabilities,
    input: Input<'a>,
    flags: Flags,
    stack: ArgumentsStack,
    x: f32,
    y: f32,
    lsb: Point,
    width: Option<f32>,
    cntr: Accumulator<CNTR_LEN>,
    seac: Seac,
    seac_components: Option<SeacComponents>,
    flex: Accumulator<FLEX_LEN>,
    /// The running point of the Flex that is being collected.
    flex_point: Point,
    bca: [f32; BCA_LEN],
    wv: [f32; MAX_MASTERS],
    ndv: [f32; MAX_AXES],
    udv: [f32; MAX_AXES],
    subr_depth: usize,
    seed: u32,
}

impl<'a> Decoder<'a> {
    fn new(
        source: &'a mut dyn Source,
        config: &'a ParseConfig<'a>,
        sink: &'a mut dyn GlyphSink,
    ) -> Self {
        let mut flags = Flags::PEND_MOVETO;

        if config.flags.contains(ParseFlags::USE_MATRIX) && !config.matrix.is_identity() {
            flags |= Flags::USE_MATRIX;
        }

        let mut wv = [0.0; MAX_MASTERS];
        let mut ndv = [0.0; MAX_AXES];
        let mut udv = [0.0; MAX_AXES];
        copy_prefix(&mut wv, config.weight_vector);
        copy_prefix(&mut ndv, config.normalized_design_vector);
        copy_prefix(&mut udv, config.user_design_vector);

        Self {
            config,
            caps: sink.capabilities(),
            sink,
            input: Input::new(source),
            flags,
            stack: ArgumentsStack::new(),
            x: 0.0,
            y: 0.0,
            lsb: Point::default(),
            width: None,
            cntr: Accumulator::new(),
            seac: Seac {
                phase: SeacPhase::None,
                component_lsb: Point::default(),
                shift: Point::default(),
            },
            seac_components: None,
            flex: Accumulator::new(),
            flex_point: Point::default(),
            bca: [0.0; BCA_LEN],
            wv,
            ndv,
            udv,
            subr_depth: 0,
            seed: 1,
        }
    }

    fn run(&mut self, offset: u64) -> Result<()> {
        self.input.seek(offset)?;
        self.decode()?;

        Ok(())
    }

    /// Decodes until `return`, `endchar` or `seac`.
    fn decode(&mut self) -> Result<Flow> {
        macro_rules! trace_op {
            ($name:literal) => {
                trace!("{} ({})", $name, &self.stack.dump());
            };
        }

        loop {
            let op = self.input.read_byte()?;

            match op {
                sb_operator::HORIZONTAL_STEM => {
                    trace_op!("HSTEM");
                    self.stack.require(2)?;
                    self.hint_stem(false, self.stack.at(0), self.stack.at(1));
                    self.stack.clear();
                }
                sb_operator::VERTICAL_STEM => {
                    trace_op!("VSTEM");
                    self.stack.require(2)?;
                    self.hint_stem(true, self.stack.at(0), self.stack.at(1));
                    self.stack.clear();
                }
                sb_operator::VERTICAL_MOVE_TO => {
                    trace_op!("VMOVETO");
                    self.stack.require(1)?;
                    self.move_to(0.0, self.stack.at(0))?;
                    self.stack.clear();
                }
                sb_operator::LINE_TO => {
                    trace_op!("RLINETO");
                    self.stack.require(2)?;
                    self.line_to(self.stack.at(0), self.stack.at(1));
                    self.stack.clear();
                }
                sb_operator::HORIZONTAL_LINE_TO => {
                    trace_op!("HLINETO");
                    self.stack.require(1)?;
                    self.line_to(self.stack.at(0), 0.0);
                    self.stack.clear();
                }
                sb_operator::VERTICAL_LINE_TO => {
                    trace_op!("VLINETO");
                    self.stack.require(1)?;
                    self.line_to(0.0, self.stack.at(0));
                    self.stack.clear();
                }
                sb_operator::CURVE_TO => {
                    trace_op!("RRCURVETO");
                    self.stack.require(6)?;
                    let s = &self.stack;
                    let (dx1, dy1, dx2, dy2, dx3, dy3) =
                        (s.at(0), s.at(1), s.at(2), s.at(3), s.at(4), s.at(5));
                    self.curve_to(dx1, dy1, dx2, dy2, dx3, dy3);
                    self.stack.clear();
                }
                sb_operator::CLOSE_PATH => {
                    trace_op!("CLOSEPATH");
                    self.flags.insert(Flags::PEND_MOVETO);
                    self.stack.clear();
                }
                sb_operator::CALL_SUBR => {
                    trace_op!("CALLSUBR");

                    if self.call_subr()? == Flow::EndChar {
                        return Ok(Flow::EndChar);
                    }
                }
                sb_operator::RETURN => {
                    trace_op!("RETURN");

                    return Ok(Flow::Return);
                }
                sb_operator::ESCAPE => {
                    let op = self.input.read_byte()?;

                    if self.decode_escape(op)? == Some(Flow::EndChar) {
                        return Ok(Flow::EndChar);
                    }
                }
                sb_operator::HSBW => {
                    trace_op!("HSBW");
                    self.stack.require(2)?;
                    let (sbx, wx) = (self.stack.at(0), self.stack.at(1));
                    self.stack.clear();

                    if self.side_bearing_and_width(sbx, 0.0, wx) == Flow::EndChar {
                        return Ok(Flow::EndChar);
                    }
                }
                sb_operator::ENDCHAR => {
                    trace_op!("ENDCHAR");
                    self.flags.insert(Flags::SEEN_ENDCHAR);
                    self.stack.clear();

                    return Ok(Flow::EndChar);
                }
                sb_operator::BLEND => {
                    trace_op!("BLEND");
                    let n = to_index(self.stack.pop()?)?;
                    self.blend(n)?;
                }
                sb_operator::MOVE_TO => {
                    trace_op!("RMOVETO");
                    self.stack.require(2)?;
                    self.move_to(self.stack.at(0), self.stack.at(1))?;
                    self.stack.clear();
                }
                sb_operator::HORIZONTAL_MOVE_TO => {
                    trace_op!("HMOVETO");
                    self.stack.require(1)?;
                    self.move_to(self.stack.at(0), 0.0)?;
                    self.stack.clear();
                }
                sb_operator::VH_CURVE_TO => {
                    trace_op!("VHCURVETO");
                    self.stack.require(4)?;
                    let s = &self.stack;
                    let (dy1, dx2, dy2, dx3) = (s.at(0), s.at(1), s.at(2), s.at(3));
                    self.curve_to(0.0, dy1, dx2, dy2, dx3, 0.0);
                    self.stack.clear();
                }
                sb_operator::HV_CURVE_TO => {
                    trace_op!("HVCURVETO");
                    self.stack.require(4)?;
                    let s = &self.stack;
                    let (dx1, dx2, dy2, dy3) = (s.at(0), s.at(1), s.at(2), s.at(3));
                    self.curve_to(dx1, 0.0, dx2, dy2, 0.0, dy3);
                    self.stack.clear();
                }
                32..=246 => {
                    self.stack.push(f32::from(i16::from(op) - 139))?;
                }
                247..=250 => {
                    let b1 = self.input.read_byte()?;
                    let n = (i16::from(op) - 247) * 256 + i16::from(b1) + 108;
                    debug_assert!((108..=1131).contains(&n));
                    self.stack.push(f32::from(n))?;
                }
                251..=254 => {
                    let b1 = self.input.read_byte()?;
                    let n = -(i16::from(op) - 251) * 256 - i16::from(b1) - 108;
                    debug_assert!((-1131..=-108).contains(&n));
                    self.stack.push(f32::from(n))?;
                }
                sb_operator::FIXED_32 => {
                    let mut b = [0; 4];
                    for byte in &mut b {
                        *byte = self.input.read_byte()?;
                    }

                    self.stack.push(i32::from_be_bytes(b) as f32)?;
                }
                _ => {
                    debug!("reserved charstring operator {op}");

                    return Err(Error::InvalidOperator);
                }
            }
        }
    }

    fn decode_escape(&mut self, op: u8) -> Result<Option<Flow>> {
        macro_rules! trace_op {
            ($name:literal) => {
                trace!("{} ({})", $name, &self.stack.dump());
            };
        }

        match op {
            tb_operator::DOTSECTION => {
                trace_op!("DOTSECTION");

                if !self.config.flags.contains(ParseFlags::UPDATE_OPS)
                    && self.caps.contains(Capabilities::GENOP)
                {
                    self.sink.genop(DOTSECTION, &[]);
                }

                self.stack.clear();
            }
            tb_operator::VSTEM3 => {
                trace_op!("VSTEM3");
                self.stem3(true)?;
                self.stack.clear();
            }
            tb_operator::HSTEM3 => {
                trace_op!("HSTEM3");
                self.stem3(false)?;
                self.stack.clear();
            }
            tb_operator::SEAC => {
                trace_op!("SEAC");
                self.stack.require(5)?;
                let s = &self.stack;
                let (asb, adx, ady, bchar, achar) = (s.at(0), s.at(1), s.at(2), s.at(3), s.at(4));
                self.stack.clear();
                self.seac(asb, adx, ady, bchar, achar)?;

                return Ok(Some(Flow::EndChar));
            }
            tb_operator::SBW => {
                trace_op!("SBW");
                self.stack.require(4)?;
                let s = &self.stack;
                let (sbx, sby, wx) = (s.at(0), s.at(1), s.at(2));
                self.stack.clear();

                if self.side_bearing_and_width(sbx, sby, wx) == Flow::EndChar {
                    return Ok(Some(Flow::EndChar));
                }
            }
            tb_operator::CALL_OTHER_SUBR => {
                trace_op!("CALLOTHERSUBR");
                self.call_other_subr()?;
            }
            tb_operator::POP => {
                // Othersubr results are left on the operand stack, so there is
                // nothing to move.
                trace_op!("POP");
            }
            tb_operator::SET_CURRENT_POINT => {
                trace_op!("SETCURRENTPOINT");
                self.stack.require(2)?;
                // The point is absolute, so the accent shift counts as applied.
                self.take_accent_shift();
                let p = self.absolute(self.stack.at(0), self.stack.at(1));
                self.x = self.round_final(p.x);
                self.y = self.round_final(p.y);
                self.stack.clear();
            }
            _ => {
                trace!("ESCAPE {op} ({})", &self.stack.dump());
                self.arith(op)?;
            }
        }

        Ok(None)
    }

    /// Decodes the charstring at `offset` as a nested level.
    fn recurse(&mut self, offset: u64) -> Result<Flow> {
        if self.subr_depth >= MAX_SUBR_DEPTH {
            return Err(Error::SubrDepth);
        }

        self.subr_depth += 1;
        self.input.seek(offset)?;
        let flow = self.decode();
        self.subr_depth -= 1;

        flow
    }

    fn call_subr(&mut self) -> Result<Flow> {
        let index = self.stack.pop()?;
        let offset = usize::try_num_from(index)
            .and_then(|i| self.config.subrs.get(i))
            .copied()
            .ok_or(Error::InvalidSubr)?;

        let saved = self.input.position();
        let flow = self.recurse(offset)?;

        if flow == Flow::Return {
            self.input.seek(saved)?;
        }

        Ok(flow)
    }

    /// Handles `hsbw` and `sbw`.
    fn side_bearing_and_width(&mut self, sbx: f32, sby: f32, wx: f32) -> Flow {
        self.x = self.round_final(sbx);
        self.y = self.round_final(sby);

        if self.seac.phase != SeacPhase::None {
            // Components only contribute their side bearing.
            self.seac.component_lsb = Point { x: sbx, y: sby };

            return Flow::Return;
        }

        if self.width.is_some() {
            debug!("ignoring repeated side bearing and width");

            return Flow::Return;
        }

        self.lsb = Point { x: sbx, y: sby };

        // Widths in 16.16 fixed point.
        let mut width = self.round_control(if wx.abs() > 32000.0 { wx / 65536.0 } else { wx });

        if self.flags.contains(Flags::USE_MATRIX) {
            width *= self.config.matrix.sx;
        }

        self.width = Some(width);

        if self.caps.contains(Capabilities::WIDTH) {
            self.sink.width(width);
        }

        if self.config.flags.contains(ParseFlags::WIDTH_ONLY) {
            self.flags.insert(Flags::SEEN_ENDCHAR);

            return Flow::EndChar;
        }

        Flow::Return
    }

    /// Handles `seac`, which ends the charstring.
    fn seac(&mut self, asb: f32, adx: f32, ady: f32, bchar: f32, achar: f32) -> Result<()> {
        let base = u8::try_num_from(bchar).ok_or(Error::BadSeac)?;
        let accent = u8::try_num_from(achar).ok_or(Error::BadSeac)?;

        if self.seac.phase != SeacPhase::None {
            debug!("nested seac");

            return Err(Error::BadSeac);
        }

        self.seac_components = Some(SeacComponents { base, accent });
        self.flags.insert(Flags::SEEN_ENDCHAR);

        if !self.config.flags.contains(ParseFlags::UPDATE_OPS)
            && self.caps.contains(Capabilities::SEAC)
        {
            self.sink.seac(adx - asb, ady, base, accent);

            return Ok(());
        }

        let lookup = self.config.seac_lookup.ok_or(Error::BadSeac)?;
        let base_offset = lookup(base).ok_or(Error::BadSeac)?;
        let accent_offset = lookup(accent).ok_or(Error::BadSeac)?;

        self.seac.phase = SeacPhase::Base;
        self.recurse(base_offset)?;

        self.seac.phase = SeacPhase::AccentPreMove;
        self.seac.shift = Point {
            x: adx - asb,
            y: ady,
        };
        self.seac.component_lsb = Point::default();
        self.x = 0.0;
        self.y = 0.0;
        self.flags.insert(Flags::PEND_MOVETO);
        self.flags.remove(Flags::SEEN_ENDCHAR);
        self.stack.clear();
        self.recurse(accent_offset)?;

        self.seac.phase = SeacPhase::None;
        self.flags.insert(Flags::SEEN_ENDCHAR);

        Ok(())
    }
}

fn copy_prefix(dst: &mut [f32], src: &[f32]) {
    let len = dst.len().min(src.len());
    dst[..len].copy_from_slice(&src[..len]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySource;

    struct Nothing;

    impl GlyphSink for Nothing {}

    fn stack_after(data: &[u8]) -> Result<Vec<f32>> {
        let mut source = MemorySource::new(data);
        let config = ParseConfig::default();
        let mut sink = Nothing;
        let mut decoder = Decoder::new(&mut source, &config, &mut sink);
        decoder.run(0)?;

        Ok((0..decoder.stack.len()).map(|i| decoder.stack.at(i)).collect())
    }

    #[test]
    fn single_byte_numbers() {
        assert_eq!(stack_after(&[32, 139, 246, 11]), Ok(vec![-107.0, 0.0, 107.0]));
    }

    #[test]
    fn two_byte_numbers() {
        assert_eq!(
            stack_after(&[247, 0, 250, 255, 251, 0, 254, 255, 11]),
            Ok(vec![108.0, 1131.0, -108.0, -1131.0])
        );
    }

    #[test]
    fn five_byte_numbers() {
        assert_eq!(
            stack_after(&[
                255, 0x7F, 0xFF, 0xFF, 0x00, 255, 0xFF, 0xFF, 0xFF, 0xFF, 255, 0x80, 0x00, 0x00,
                0x00, 11
            ]),
            Ok(vec![2147483392.0, -1.0, -2147483648.0])
        );
    }

    #[test]
    fn number_round_trip() {
        fn encode(v: i32) -> Vec<u8> {
            match v {
                -107..=107 => vec![(v + 139) as u8],
                108..=1131 => {
                    let v = v - 108;
                    vec![(v / 256 + 247) as u8, (v % 256) as u8]
                }
                -1131..=-108 => {
                    let v = -v - 108;
                    vec![(v / 256 + 251) as u8, (v % 256) as u8]
                }
                _ => {
                    let mut out = vec![255];
                    out.extend_from_slice(&v.to_be_bytes());
                    out
                }
            }
        }

        for v in [
            -1131, -1130, -108, -107, -1, 0, 1, 107, 108, 365, 1131, 1132, -1132, 32000, -32768,
            -65536, 16777216, -16777216,
        ] {
            let mut data = encode(v);
            data.push(sb_operator::RETURN);

            assert_eq!(stack_after(&data), Ok(vec![v as f32]), "{v}");
        }
    }

    #[test]
    fn reserved_operators() {
        for op in [0, 2, 15, 17, 18, 19, 20, 23, 24, 25, 26, 27, 28, 29] {
            assert_eq!(stack_after(&[op]), Err(Error::InvalidOperator), "{op}");
        }

        assert_eq!(stack_after(&[12, 19]), Err(Error::InvalidOperator));
        assert_eq!(stack_after(&[12, 25]), Err(Error::InvalidOperator));
    }

    #[test]
    fn truncated_number() {
        assert_eq!(stack_after(&[247]), Err(Error::StreamRead));
        assert_eq!(stack_after(&[255, 0, 0]), Err(Error::StreamRead));
    }

    #[test]
    fn arithmetic_keeps_results() {
        // 3 4 add 2 mul return
        assert_eq!(stack_after(&[142, 143, 12, 10, 141, 12, 24, 11]), Ok(vec![14.0]));
    }
}
