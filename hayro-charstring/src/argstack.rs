use crate::error::{Error, Result};

/// The maximum number of operands on the charstring stack.
pub const MAX_ARGUMENTS_STACK_LEN: usize = 48;

pub(crate) struct ArgumentsStack {
    data: [f32; MAX_ARGUMENTS_STACK_LEN], // 192B
    len: usize,
}

impl ArgumentsStack {
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            data: [0.0; MAX_ARGUMENTS_STACK_LEN],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fails with a stack underflow unless at least `n` operands are present.
    #[inline]
    pub(crate) fn require(&self, n: usize) -> Result<()> {
        if self.len < n {
            Err(Error::StackUnderflow)
        } else {
            Ok(())
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, n: f32) -> Result<()> {
        if self.len == MAX_ARGUMENTS_STACK_LEN {
            Err(Error::StackOverflow)
        } else {
            self.data[self.len] = n;
            self.len += 1;
            Ok(())
        }
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Result<f32> {
        if self.is_empty() {
            return Err(Error::StackUnderflow);
        }

        self.len -= 1;
        Ok(self.data[self.len])
    }

    /// Returns the operand at `index`, counted from the bottom of the stack.
    #[inline]
    pub(crate) fn at(&self, index: usize) -> f32 {
        debug_assert!(index < self.len);
        self.data[index]
    }

    /// Returns a mutable reference to the operand at `index`, counted from the
    /// bottom of the stack.
    #[inline]
    pub(crate) fn at_mut(&mut self, index: usize) -> &mut f32 {
        debug_assert!(index < self.len);
        &mut self.data[index]
    }

    /// Returns the top `n` operands, bottom-most first.
    #[inline]
    pub(crate) fn top(&self, n: usize) -> Result<&[f32]> {
        self.require(n)?;
        Ok(&self.data[self.len - n..self.len])
    }

    #[inline]
    pub(crate) fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub(crate) fn exch(&mut self) -> Result<()> {
        self.require(2)?;
        let len = self.len;
        self.data.swap(len - 1, len - 2);

        Ok(())
    }

    /// Pushes a copy of the element `i` positions below the top.
    ///
    /// A negative `i` duplicates the top element.
    pub(crate) fn index(&mut self, i: i32) -> Result<()> {
        self.require(1)?;

        let i = usize::try_from(i).unwrap_or(0);

        if i >= self.len {
            return Err(Error::BoundsCheck);
        }

        self.push(self.data[self.len - 1 - i])
    }

    /// Rotates the top `n` elements by `j` positions towards the top.
    pub(crate) fn roll(&mut self, n: i32, j: i32) -> Result<()> {
        let n = usize::try_from(n)
            .ok()
            .filter(|n| *n > 0 && *n <= self.len)
            .ok_or(Error::BoundsCheck)?;
        let j = j.rem_euclid(n as i32) as usize;

        self.data[self.len - n..self.len].rotate_right(j);

        Ok(())
    }

    pub(crate) fn dump(&self) -> String {
        format!("{:?}", &self.data[0..self.len])
    }
}

impl core::fmt::Debug for ArgumentsStack {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(&self.data[..self.len]).finish()
    }
}

/// An append-only buffer of at most `N` values.
pub(crate) struct Accumulator<const N: usize> {
    data: [f32; N],
    len: usize,
}

impl<const N: usize> Accumulator<N> {
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            data: [0.0; N],
            len: 0,
        }
    }

    /// Appends values, failing without modification if they don't fit.
    #[inline]
    pub(crate) fn extend(&mut self, values: &[f32]) -> Option<()> {
        let end = self.len.checked_add(values.len()).filter(|end| *end <= N)?;
        self.data[self.len..end].copy_from_slice(values);
        self.len = end;

        Some(())
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[f32] {
        &self.data[..self.len]
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(values: &[f32]) -> ArgumentsStack {
        let mut stack = ArgumentsStack::new();

        for v in values {
            stack.push(*v).unwrap();
        }

        stack
    }

    fn contents(stack: &ArgumentsStack) -> Vec<f32> {
        (0..stack.len()).map(|i| stack.at(i)).collect()
    }

    #[test]
    fn overflow() {
        let mut stack = ArgumentsStack::new();

        for i in 0..MAX_ARGUMENTS_STACK_LEN {
            stack.push(i as f32).unwrap();
        }

        assert_eq!(stack.push(0.0), Err(Error::StackOverflow));
        assert_eq!(stack.len(), MAX_ARGUMENTS_STACK_LEN);
    }

    #[test]
    fn underflow() {
        let mut stack = stack(&[1.0]);

        assert_eq!(stack.pop(), Ok(1.0));
        assert_eq!(stack.pop(), Err(Error::StackUnderflow));
        assert_eq!(stack.exch(), Err(Error::StackUnderflow));
        assert_eq!(stack.top(1), Err(Error::StackUnderflow));
    }

    #[test]
    fn index() {
        let mut s = stack(&[1.0, 2.0, 3.0]);
        s.index(2).unwrap();
        assert_eq!(contents(&s), [1.0, 2.0, 3.0, 1.0]);

        s.index(-5).unwrap();
        assert_eq!(contents(&s), [1.0, 2.0, 3.0, 1.0, 1.0]);

        assert_eq!(s.index(5), Err(Error::BoundsCheck));
    }

    #[test]
    fn roll() {
        let mut s = stack(&[1.0, 2.0, 3.0, 4.0]);
        s.roll(3, 1).unwrap();
        assert_eq!(contents(&s), [1.0, 4.0, 2.0, 3.0]);

        s.roll(3, -1).unwrap();
        assert_eq!(contents(&s), [1.0, 2.0, 3.0, 4.0]);

        assert_eq!(s.roll(0, 1), Err(Error::BoundsCheck));
        assert_eq!(s.roll(-2, 1), Err(Error::BoundsCheck));
        assert_eq!(s.roll(5, 1), Err(Error::BoundsCheck));
    }

    #[test]
    fn accumulator_capacity() {
        let mut acc = Accumulator::<4>::new();

        assert_eq!(acc.extend(&[1.0, 2.0, 3.0]), Some(()));
        assert_eq!(acc.extend(&[4.0, 5.0]), None);
        assert_eq!(acc.as_slice(), [1.0, 2.0, 3.0]);
        assert_eq!(acc.extend(&[4.0]), Some(()));
        assert_eq!(acc.len(), 4);

        acc.clear();
        assert!(acc.as_slice().is_empty());
    }

    #[test]
    fn roll_is_periodic() {
        let base = [1.0, 2.0, 3.0, 4.0, 5.0];

        for n in 1..=5 {
            for j in -7..7 {
                let mut a = stack(&base);
                let mut b = stack(&base);
                a.roll(n, j).unwrap();
                b.roll(n, j + n).unwrap();

                assert_eq!(contents(&a), contents(&b), "n={n} j={j}");
            }
        }
    }
}
