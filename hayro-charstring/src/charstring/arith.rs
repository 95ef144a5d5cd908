//! Arithmetic, stack and storage operators.

use super::{BCA_LEN, Decoder, MAX_MASTERS};
use crate::error::{Error, Result};
use crate::operator::tb_operator;
use crate::util::{TryNumFrom, checked_range, to_index};
use log::debug;

#[inline]
fn truth(b: bool) -> f32 {
    if b { 1.0 } else { 0.0 }
}

impl Decoder<'_> {
    /// Executes an escape operator that works on the operand stack only.
    ///
    /// Results are left on the stack.
    pub(super) fn arith(&mut self, op: u8) -> Result<()> {
        match op {
            tb_operator::AND => self.binary(|a, b| truth(a != 0.0 && b != 0.0)),
            tb_operator::OR => self.binary(|a, b| truth(a != 0.0 || b != 0.0)),
            tb_operator::EQ => self.binary(|a, b| truth(a == b)),
            tb_operator::ADD => self.binary(|a, b| a + b),
            tb_operator::SUB => self.binary(|a, b| a - b),
            tb_operator::MUL => self.binary(|a, b| a * b),
            tb_operator::DIV => self.binary(|a, b| a / b),
            tb_operator::NOT => self.unary(|a| truth(a == 0.0)),
            tb_operator::ABS => self.unary(f32::abs),
            tb_operator::NEG => self.unary(|a| -a),
            tb_operator::SQRT => {
                let a = self.stack.pop()?;

                if a < 0.0 {
                    return Err(Error::SqrtDomain);
                }

                self.stack.push(a.sqrt())
            }
            tb_operator::DUP => {
                let a = self.stack.pop()?;
                self.stack.push(a)?;
                self.stack.push(a)
            }
            tb_operator::EXCH => self.stack.exch(),
            tb_operator::DROP => self.stack.pop().map(|_| ()),
            tb_operator::INDEX => {
                self.stack.require(2)?;
                let i = self.stack.pop()?;
                let i = i32::try_num_from(i).ok_or(Error::BoundsCheck)?;
                self.stack.index(i)
            }
            tb_operator::ROLL => {
                self.stack.require(2)?;
                let j = self.stack.pop()?;
                let n = self.stack.pop()?;
                let j = i32::try_num_from(j).ok_or(Error::BoundsCheck)?;
                let n = i32::try_num_from(n).ok_or(Error::BoundsCheck)?;
                self.stack.roll(n, j)
            }
            tb_operator::PUT => {
                self.stack.require(2)?;
                let i = to_index(self.stack.pop()?)?;
                let v = self.stack.pop()?;
                *self.bca.get_mut(i).ok_or(Error::BoundsCheck)? = v;

                Ok(())
            }
            tb_operator::GET => {
                let i = to_index(self.stack.pop()?)?;
                let v = *self.bca.get(i).ok_or(Error::BoundsCheck)?;
                self.stack.push(v)
            }
            tb_operator::IFELSE => {
                self.stack.require(4)?;
                let v2 = self.stack.pop()?;
                let v1 = self.stack.pop()?;
                let s2 = self.stack.pop()?;
                let s1 = self.stack.pop()?;
                self.stack.push(if v1 <= v2 { s1 } else { s2 })
            }
            tb_operator::RANDOM => {
                let r = self.next_random();
                self.stack.push(r)
            }
            tb_operator::STORE => {
                self.stack.require(4)?;
                let n = self.stack.pop()?;
                let j = self.stack.pop()?;
                let i = self.stack.pop()?;
                let reg = self.stack.pop()?;

                let src = checked_range(j, n, BCA_LEN)?;
                let dst = checked_range(i, n, self.register(reg)?.len())?;
                let values = self.bca;
                self.register(reg)?[dst].copy_from_slice(&values[src]);

                Ok(())
            }
            tb_operator::LOAD => {
                self.stack.require(3)?;
                let n = self.stack.pop()?;
                let i = self.stack.pop()?;
                let reg = self.stack.pop()?;

                let dst = checked_range(i, n, BCA_LEN)?;
                let mut values = [0.0; MAX_MASTERS];
                let reg = self.register(reg)?;
                let src = checked_range(0.0, n, reg.len())?;
                values[..src.len()].copy_from_slice(&reg[src]);
                self.bca[dst.clone()].copy_from_slice(&values[..dst.len()]);

                Ok(())
            }
            _ => {
                debug!("unknown escape operator {op}");

                Err(Error::InvalidOperator)
            }
        }
    }

    #[inline]
    fn unary(&mut self, f: impl FnOnce(f32) -> f32) -> Result<()> {
        let a = self.stack.pop()?;
        self.stack.push(f(a))
    }

    #[inline]
    fn binary(&mut self, f: impl FnOnce(f32, f32) -> f32) -> Result<()> {
        self.stack.require(2)?;
        let b = self.stack.pop()?;
        let a = self.stack.pop()?;
        self.stack.push(f(a, b))
    }

    /// Returns a pseudo-random number in `(0, 1]`.
    ///
    /// The generator is seeded identically for every glyph, so decoding is
    /// reproducible.
    fn next_random(&mut self) -> f32 {
        self.seed = self.seed.wrapping_mul(1103515245).wrapping_add(12345);
        let r = (self.seed >> 16) & 0x7fff;

        (r + 1) as f32 / 32768.0
    }

    /// Resolves the register operand of `store` and `load`.
    fn register(&mut self, reg: f32) -> Result<&mut [f32]> {
        match i32::try_num_from(reg) {
            Some(0) => Ok(&mut self.wv),
            Some(1) => Ok(&mut self.ndv),
            Some(2) => Ok(&mut self.udv),
            _ => Err(Error::BoundsCheck),
        }
    }
}
