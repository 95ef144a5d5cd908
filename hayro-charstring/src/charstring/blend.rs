//! Multiple master blending.

use super::{Decoder, Flags, MAX_MASTERS};
use crate::error::{Error, Result};

impl Decoder<'_> {
    /// Replaces the top `n * masters` operands by `n` blended values.
    ///
    /// The operands are laid out as the `n` values of the first master,
    /// followed by the `masters - 1` deltas of each value.
    pub(super) fn blend(&mut self, n: usize) -> Result<()> {
        let masters = self.config.masters;

        if masters <= 1 || masters > MAX_MASTERS {
            return Err(Error::InvalidWeightVector);
        }

        let total = n.checked_mul(masters).ok_or(Error::StackUnderflow)?;
        self.stack.require(total)?;

        let base = self.stack.len() - total;
        let deltas = base + n;

        for i in 0..n {
            let mut value = self.stack.at(base + i);

            for m in 1..masters {
                value += self.wv[m] * self.stack.at(deltas + i * (masters - 1) + m - 1);
            }

            *self.stack.at_mut(base + i) = value;
        }

        self.stack.truncate(deltas);
        self.flags.insert(Flags::SEEN_BLEND);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::{GlyphSink, MemorySource, ParseConfig};

    struct Nothing;

    impl GlyphSink for Nothing {}

    fn blend(values: &[i8], n: i8, masters: usize, wv: &[f32]) -> Result<Vec<f32>, Error> {
        let mut data: Vec<u8> = values.iter().map(|v| (*v as i32 + 139) as u8).collect();
        data.extend([(n as i32 + 139) as u8, 16, 11]);

        let config = ParseConfig {
            masters,
            weight_vector: wv,
            ..ParseConfig::default()
        };
        let mut source = MemorySource::new(&data);
        let mut sink = Nothing;
        let mut decoder = super::Decoder::new(&mut source, &config, &mut sink);
        decoder.run(0)?;

        assert!(decoder.flags.contains(super::Flags::SEEN_BLEND));
        Ok((0..decoder.stack.len()).map(|i| decoder.stack.at(i)).collect())
    }

    #[test]
    fn two_masters() {
        assert_eq!(
            blend(&[100, 50, 10, 20], 2, 2, &[1.0, 0.5]),
            Ok(vec![105.0, 60.0])
        );
    }

    #[test]
    fn three_masters() {
        // Values 10 and 20, deltas (2, 4) and (6, 8).
        assert_eq!(
            blend(&[10, 20, 2, 4, 6, 8], 2, 3, &[0.0, 0.5, 0.25]),
            Ok(vec![12.0, 25.0])
        );
    }

    #[test]
    fn keeps_operands_below() {
        assert_eq!(
            blend(&[7, 100, 10], 1, 2, &[1.0, 0.5]),
            Ok(vec![7.0, 105.0])
        );
    }

    #[test]
    fn single_master_is_rejected() {
        for n in 0..4 {
            assert_eq!(
                blend(&[1, 2, 3, 4], n, 1, &[1.0]),
                Err(Error::InvalidWeightVector)
            );
        }

        assert_eq!(blend(&[1], 1, 0, &[]), Err(Error::InvalidWeightVector));
    }

    #[test]
    fn too_few_operands() {
        assert_eq!(blend(&[1, 2, 3], 2, 2, &[1.0, 0.5]), Err(Error::StackUnderflow));
    }
}
