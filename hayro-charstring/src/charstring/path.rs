//! Path construction and hints.

use super::{Decoder, Flags, Point, SeacPhase};
use crate::error::{Error, Result};
use crate::{Capabilities, StemFlags};
use crate::util::round;

impl Decoder<'_> {
    /// Rounds a coordinate that becomes the current point.
    #[inline]
    pub(super) fn round_final(&self, v: f32) -> f32 {
        round(v)
    }

    /// Rounds a control point or hint edge once blending or a transform is in
    /// effect.
    #[inline]
    pub(super) fn round_control(&self, v: f32) -> f32 {
        if self.flags.intersects(Flags::SEEN_BLEND | Flags::USE_MATRIX) {
            round(v)
        } else {
            v
        }
    }

    /// Converts a point given in the coordinates of the current charstring
    /// into glyph coordinates.
    #[inline]
    pub(super) fn absolute(&self, x: f32, y: f32) -> Point {
        match self.seac.phase {
            SeacPhase::AccentPreMove | SeacPhase::AccentPostMove => Point {
                x: x + self.seac.shift.x,
                y: y + self.seac.shift.y,
            },
            SeacPhase::None | SeacPhase::Base => Point { x, y },
        }
    }

    /// Moves the accent into place before it draws anything.
    pub(super) fn take_accent_shift(&mut self) {
        if self.seac.phase == SeacPhase::AccentPreMove {
            self.x += self.seac.shift.x;
            self.y += self.seac.shift.y;
            self.seac.phase = SeacPhase::AccentPostMove;
        }
    }

    /// Emits the moveto that a line or curve implies after `closepath`.
    fn start_path(&mut self) {
        self.take_accent_shift();

        if self.flags.contains(Flags::PEND_MOVETO) {
            self.flags.remove(Flags::PEND_MOVETO);
            self.flags.insert(Flags::SEEN_MOVETO);
            self.emit_move(self.x, self.y);
        }
    }

    #[inline]
    fn device(&self, x: f32, y: f32) -> (f32, f32) {
        if self.flags.contains(Flags::USE_MATRIX) {
            self.config.matrix.transform(x, y)
        } else {
            (x, y)
        }
    }

    fn emit_move(&mut self, x: f32, y: f32) {
        if self.caps.contains(Capabilities::MOVE) {
            let (x, y) = self.device(x, y);
            self.sink.move_to(x, y);
        }
    }

    fn emit_curve(&mut self, p1: Point, p2: Point, p3: Point) {
        if self.caps.contains(Capabilities::CURVE) {
            let (x1, y1) = self.device(p1.x, p1.y);
            let (x2, y2) = self.device(p2.x, p2.y);
            let (x3, y3) = self.device(p3.x, p3.y);
            self.sink.curve_to(x1, y1, x2, y2, x3, y3);
        }
    }

    pub(super) fn move_to(&mut self, dx: f32, dy: f32) -> Result<()> {
        if self.flags.contains(Flags::IN_FLEX) {
            self.flex_point.x += dx;
            self.flex_point.y += dy;

            return self
                .flex
                .extend(&[self.flex_point.x, self.flex_point.y])
                .ok_or(Error::BadFlex);
        }

        self.take_accent_shift();
        self.x = self.round_final(self.x + dx);
        self.y = self.round_final(self.y + dy);
        self.flags.remove(Flags::PEND_MOVETO);
        self.flags.insert(Flags::SEEN_MOVETO);
        self.emit_move(self.x, self.y);

        Ok(())
    }

    pub(super) fn line_to(&mut self, dx: f32, dy: f32) {
        self.start_path();
        self.x = self.round_final(self.x + dx);
        self.y = self.round_final(self.y + dy);

        if self.caps.contains(Capabilities::LINE) {
            let (x, y) = self.device(self.x, self.y);
            self.sink.line_to(x, y);
        }
    }

    pub(super) fn curve_to(&mut self, dx1: f32, dy1: f32, dx2: f32, dy2: f32, dx3: f32, dy3: f32) {
        self.start_path();

        let p1 = Point {
            x: self.round_control(self.x + dx1),
            y: self.round_control(self.y + dy1),
        };
        let p2 = Point {
            x: self.round_control(p1.x + dx2),
            y: self.round_control(p1.y + dy2),
        };
        let p3 = Point {
            x: self.round_final(p2.x + dx3),
            y: self.round_final(p2.y + dy3),
        };

        self.x = p3.x;
        self.y = p3.y;
        self.emit_curve(p1, p2, p3);
    }

    /// Emits a finished Flex. `points` holds the six curve points, the last
    /// one being the final point.
    pub(super) fn emit_flex(&mut self, depth: f32, points: &[Point; 6]) {
        self.start_path();

        let mut points = points.map(|p| Point {
            x: self.round_control(p.x),
            y: self.round_control(p.y),
        });
        points[5] = Point {
            x: self.round_final(points[5].x),
            y: self.round_final(points[5].y),
        };

        if self.caps.contains(Capabilities::FLEX) {
            let mut coords = [0.0; 12];

            for (chunk, p) in coords.chunks_exact_mut(2).zip(points.iter()) {
                let (x, y) = self.device(p.x, p.y);
                chunk[0] = x;
                chunk[1] = y;
            }

            self.sink.flex(depth, &coords);
        } else {
            self.emit_curve(points[0], points[1], points[2]);
            self.emit_curve(points[3], points[4], points[5]);
        }

        self.x = points[5].x;
        self.y = points[5].y;
    }

    /// Returns the side bearing that stem positions are relative to.
    pub(super) fn stem_origin(&self) -> Point {
        match self.seac.phase {
            SeacPhase::None => self.lsb,
            SeacPhase::Base => self.seac.component_lsb,
            SeacPhase::AccentPreMove | SeacPhase::AccentPostMove => Point {
                x: self.seac.component_lsb.x + self.seac.shift.x,
                y: self.seac.component_lsb.y + self.seac.shift.y,
            },
        }
    }

    /// Handles `hstem` and `vstem`.
    pub(super) fn hint_stem(&mut self, vertical: bool, pos: f32, delta: f32) {
        let flags = if vertical {
            StemFlags::VERTICAL
        } else {
            StemFlags::empty()
        };

        self.hint_stem_with(flags, pos, delta);
    }

    fn hint_stem_with(&mut self, flags: StemFlags, pos: f32, delta: f32) {
        // A stem following the first moveto starts a new set of hints, even
        // without an explicit hint replacement.
        if self.flags.contains(Flags::SEEN_MOVETO) && !self.flags.contains(Flags::SEEN_HINTSUBS) {
            self.flags.insert(Flags::PEND_HINTSUBS | Flags::SEEN_HINTSUBS);
        }

        let origin = self.stem_origin();
        let edge0 = pos
            + if flags.contains(StemFlags::VERTICAL) {
                origin.x
            } else {
                origin.y
            };

        self.emit_stem(flags, edge0, edge0 + delta);
    }

    /// Handles `hstem3` and `vstem3`.
    pub(super) fn stem3(&mut self, vertical: bool) -> Result<()> {
        self.stack.require(6)?;

        let mut flags = StemFlags::STEM3;
        if vertical {
            flags |= StemFlags::VERTICAL;
        }

        for i in 0..3 {
            let (pos, delta) = (self.stack.at(i * 2), self.stack.at(i * 2 + 1));
            self.hint_stem_with(flags, pos, delta);
        }

        Ok(())
    }

    /// Reports a stem with edges in glyph coordinates.
    pub(super) fn emit_stem(&mut self, mut flags: StemFlags, edge0: f32, edge1: f32) {
        if self.flags.contains(Flags::PEND_HINTSUBS) {
            flags |= StemFlags::NEW_HINTS;
        }

        if self.flags.contains(Flags::NEW_GROUP) {
            flags |= StemFlags::NEW_GROUP;
        }

        self.flags.remove(Flags::PEND_HINTSUBS | Flags::NEW_GROUP);

        if !self.caps.contains(Capabilities::STEM) {
            return;
        }

        let (mut edge0, mut edge1) = (self.round_control(edge0), self.round_control(edge1));

        if self.flags.contains(Flags::USE_MATRIX) {
            let m = &self.config.matrix;
            let (scale, offset) = if flags.contains(StemFlags::VERTICAL) {
                (m.sx, m.tx)
            } else {
                (m.sy, m.ty)
            };

            edge0 = edge0 * scale + offset;
            edge1 = edge1 * scale + offset;
        }

        self.sink.stem(flags, edge0, edge1);
    }
}
