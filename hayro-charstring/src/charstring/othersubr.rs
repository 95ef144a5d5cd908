//! The othersubr protocol: Flex, hint replacement, counter control and the
//! multiple master helpers.

use super::{BCA_LEN, Decoder, FLEX_POINTS_LEN, Flags, MAX_MASTERS, Point};
use crate::StemFlags;
use crate::error::{Error, Result};
use crate::operator::{other_subr, tb_operator};
use crate::util::{TryNumFrom, checked_range, to_index};
use log::debug;

impl Decoder<'_> {
    /// Handles `callothersubr`.
    pub(super) fn call_other_subr(&mut self) -> Result<()> {
        self.stack.require(2)?;
        let selector = self.stack.pop()?;
        let n = to_index(self.stack.pop()?)?;
        self.stack.require(n)?;

        let selector = i32::try_num_from(selector).ok_or(Error::InvalidOtherSubr)?;
        let arity = match selector {
            other_subr::FLEX_END => 3,
            other_subr::FLEX_START | other_subr::FLEX_POINT | other_subr::RANDOM => 0,
            other_subr::HINT_SUBS
            | other_subr::STORE_WV
            | other_subr::GET
            | other_subr::DUP => 1,
            other_subr::COUNTER_1 | other_subr::COUNTER_2 => n,
            // The operand count depends on the number of masters, which
            // `blend` validates first.
            other_subr::BLEND_1..=other_subr::BLEND_6 => 0,
            other_subr::ADD
            | other_subr::SUB
            | other_subr::MUL
            | other_subr::DIV
            | other_subr::PUT
            | other_subr::EXCH => 2,
            other_subr::IFELSE => 4,
            _ => {
                debug!("unknown othersubr {selector}");

                return Err(Error::InvalidOtherSubr);
            }
        };

        self.stack.require(arity)?;

        match selector {
            other_subr::FLEX_END => self.flex_end(n),
            other_subr::FLEX_START => {
                self.flex_start();

                Ok(())
            }
            // Marks a Flex point; the point itself was collected by the moveto.
            other_subr::FLEX_POINT => Ok(()),
            other_subr::HINT_SUBS => {
                // The subroutine number stays on the stack for `pop callsubr`.
                self.flags.insert(Flags::PEND_HINTSUBS | Flags::SEEN_HINTSUBS);

                Ok(())
            }
            other_subr::COUNTER_1 => self.counter_control(n, false),
            other_subr::COUNTER_2 => self.counter_control(n, true),
            other_subr::BLEND_1 => self.blend(1),
            other_subr::BLEND_2 => self.blend(2),
            other_subr::BLEND_3 => self.blend(3),
            other_subr::BLEND_4 => self.blend(4),
            other_subr::BLEND_6 => self.blend(6),
            other_subr::STORE_WV => self.store_weight_vector(),
            other_subr::ADD => self.arith(tb_operator::ADD),
            other_subr::SUB => self.arith(tb_operator::SUB),
            other_subr::MUL => self.arith(tb_operator::MUL),
            other_subr::DIV => self.arith(tb_operator::DIV),
            other_subr::PUT => self.arith(tb_operator::PUT),
            other_subr::GET => self.arith(tb_operator::GET),
            other_subr::IFELSE => self.arith(tb_operator::IFELSE),
            other_subr::RANDOM => self.arith(tb_operator::RANDOM),
            other_subr::DUP => self.arith(tb_operator::DUP),
            other_subr::EXCH => self.arith(tb_operator::EXCH),
            _ => Err(Error::InvalidOtherSubr),
        }
    }

    fn flex_start(&mut self) {
        self.take_accent_shift();
        self.flags.insert(Flags::IN_FLEX);
        self.flex.clear();
        self.flex_point = Point {
            x: self.x,
            y: self.y,
        };
    }

    /// Ends a Flex, given `depth x y` on the stack.
    ///
    /// The final point on the stack wins over the one reached by the collected
    /// movetos. Afterwards `x y` are left on the stack for `setcurrentpoint`.
    fn flex_end(&mut self, n: usize) -> Result<()> {
        if n != 3
            || !self.flags.contains(Flags::IN_FLEX)
            || self.flex.len() != FLEX_POINTS_LEN
        {
            debug!(
                "malformed flex with {n} arguments and {} coordinates",
                self.flex.len()
            );

            return Err(Error::BadFlex);
        }

        self.flags.remove(Flags::IN_FLEX);

        let fy = self.stack.pop()?;
        let fx = self.stack.pop()?;
        let depth = self.stack.pop()?;

        // The first collected point is the reference point, which is not part
        // of either curve.
        let collected = self.flex.as_slice();
        let mut points = [Point::default(); 6];

        for (point, xy) in points.iter_mut().zip(collected[2..].chunks_exact(2)) {
            *point = Point { x: xy[0], y: xy[1] };
        }

        points[5] = self.absolute(fx, fy);
        self.emit_flex(depth, &points);

        self.stack.push(fx)?;
        self.stack.push(fy)
    }

    /// Collects the top `n` operands as counter control data and, for the last
    /// chunk, reports the counter groups.
    fn counter_control(&mut self, n: usize, last: bool) -> Result<()> {
        let base = self.stack.len() - n;
        self.cntr
            .extend(self.stack.top(n)?)
            .ok_or(Error::BadCounterControl)?;
        self.stack.truncate(base);

        if !last {
            return Ok(());
        }

        let mut values = [0.0; super::CNTR_LEN];
        let len = self.cntr.len();
        values[..len].copy_from_slice(self.cntr.as_slice());
        self.cntr.clear();

        let mut i = len;
        let mut vertical = false;

        while i > 0 {
            let origin = self.stem_origin();
            let mut edge = if vertical { origin.x } else { origin.y };
            let mut flags = StemFlags::COUNTER;

            if vertical {
                flags |= StemFlags::VERTICAL;
            }

            self.flags.insert(Flags::NEW_GROUP);

            loop {
                if i < 2 {
                    debug!("counter group is cut off");

                    return Err(Error::BadCounterControl);
                }

                let delta = values[i - 1];
                let width = values[i - 2];
                i -= 2;

                let edge0 = edge + delta;
                let edge1 = edge0 + width.abs();
                self.emit_stem(flags, edge0, edge1);
                edge = edge1;

                if width < 0.0 {
                    break;
                }
            }

            vertical = !vertical;
        }

        Ok(())
    }

    /// Copies the weight vector into the BuildCharArray at the index on the
    /// stack.
    fn store_weight_vector(&mut self) -> Result<()> {
        let masters = self.config.masters;

        if masters > MAX_MASTERS {
            return Err(Error::InvalidWeightVector);
        }

        let i = self.stack.pop()?;
        let range = checked_range(i, masters as f32, BCA_LEN)?;
        self.bca[range].copy_from_slice(&self.wv[..masters]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::Decoder;
    use crate::error::Error;
    use crate::{Capabilities, GlyphSink, MemorySource, ParseConfig, StemFlags};

    #[derive(Default)]
    struct Stems(Vec<(StemFlags, f32, f32)>);

    impl GlyphSink for Stems {
        fn capabilities(&self) -> Capabilities {
            Capabilities::STEM
        }

        fn stem(&mut self, flags: StemFlags, edge0: f32, edge1: f32) {
            self.0.push((flags, edge0, edge1));
        }
    }

    fn n(v: i32) -> u8 {
        (v + 139) as u8
    }

    fn stems(data: &[u8]) -> Result<Vec<(StemFlags, f32, f32)>, Error> {
        let mut source = MemorySource::new(data);
        let config = ParseConfig::default();
        let mut sink = Stems::default();
        let mut decoder = Decoder::new(&mut source, &config, &mut sink);
        decoder.run(0)?;
        drop(decoder);

        Ok(sink.0)
    }

    #[test]
    fn counter_groups() {
        // Read from the end: horizontal group (delta 10, width 20),
        // (delta 5, width -30); vertical group (delta 40, width -50).
        let data = [
            n(-50),
            n(40),
            n(-30),
            n(5),
            n(20),
            n(10),
            n(6),
            n(13),
            12,
            16,
            11,
        ];

        let h = StemFlags::COUNTER;
        let v = StemFlags::COUNTER | StemFlags::VERTICAL;

        assert_eq!(
            stems(&data),
            Ok(vec![
                (h | StemFlags::NEW_GROUP, 10.0, 30.0),
                (h, 35.0, 65.0),
                (v | StemFlags::NEW_GROUP, 40.0, 90.0),
            ])
        );
    }

    #[test]
    fn counter_groups_in_chunks() {
        let data = [
            n(-50),
            n(40),
            n(2),
            n(12),
            12,
            16,
            n(-30),
            n(5),
            n(2),
            n(13),
            12,
            16,
            11,
        ];

        assert_eq!(
            stems(&data),
            Ok(vec![
                (StemFlags::COUNTER | StemFlags::NEW_GROUP, 5.0, 35.0),
                (
                    StemFlags::COUNTER | StemFlags::VERTICAL | StemFlags::NEW_GROUP,
                    40.0,
                    90.0
                ),
            ])
        );
    }

    #[test]
    fn malformed_counter_groups() {
        // Odd number of values.
        assert_eq!(
            stems(&[n(-30), n(5), n(1), n(3), n(13), 12, 16, 11]),
            Err(Error::BadCounterControl)
        );
        // Unterminated group.
        assert_eq!(
            stems(&[n(30), n(5), n(2), n(13), 12, 16, 11]),
            Err(Error::BadCounterControl)
        );
    }

    #[test]
    fn unknown_selector() {
        for selector in [4, 11, 26, 31, -1] {
            assert_eq!(
                stems(&[n(0), n(selector), 12, 16, 11]),
                Err(Error::InvalidOtherSubr),
                "{selector}"
            );
        }
    }

    #[test]
    fn hint_replacement_leaves_argument() {
        let data = [n(7), n(1), n(3), 12, 16, 12, 17, 11];
        let mut source = MemorySource::new(&data);
        let config = ParseConfig::default();
        let mut sink = Stems::default();
        let mut decoder = Decoder::new(&mut source, &config, &mut sink);
        decoder.run(0).unwrap();

        assert_eq!(decoder.stack.len(), 1);
        assert_eq!(decoder.stack.at(0), 7.0);
    }
}
