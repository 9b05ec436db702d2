use crate::error::{Result, SimHashError};
use std::borrow::Cow;
use std::num::NonZeroUsize;

/// Iterator over the w-shingles of a token sequence: every run of `width`
/// consecutive tokens, joined by a single space.
///
/// A width larger than the number of tokens is clamped, producing one
/// shingle of the whole sequence.
#[derive(Clone, Debug)]
pub struct Shingles<'a, T> {
    tokens: &'a [T],
    width: usize,
    position: usize,
}

impl<'a, T: AsRef<[u8]>> Shingles<'a, T> {
    pub fn new(width: usize, tokens: &'a [T]) -> Result<Self> {
        match NonZeroUsize::new(width) {
            Some(width) => Ok(Self::with_width(width, tokens)),
            None => Err(SimHashError::InvalidShingleWidth { width }),
        }
    }

    pub fn with_width(width: NonZeroUsize, tokens: &'a [T]) -> Self {
        Shingles {
            tokens,
            width: width.get().min(tokens.len()),
            position: 0,
        }
    }

    fn remaining(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            (self.tokens.len() + 1).saturating_sub(self.width + self.position)
        }
    }
}

impl<'a, T: AsRef<[u8]>> Iterator for Shingles<'a, T> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining() == 0 {
            return None;
        }
        let window = &self.tokens[self.position..self.position + self.width];
        self.position += 1;

        let len = window.iter().map(|t| t.as_ref().len()).sum::<usize>() + window.len() - 1;
        let mut shingle = Vec::with_capacity(len);
        for (i, token) in window.iter().enumerate() {
            if i > 0 {
                shingle.push(b' ');
            }
            shingle.extend_from_slice(token.as_ref());
        }
        Some(shingle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<'a, T: AsRef<[u8]>> ExactSizeIterator for Shingles<'a, T> {}

/// Returns the w-shingling of the given tokens.
///
/// A width of 1 returns the tokens themselves, borrowed. A width of 0 is an
/// error.
/// ```
/// use simprint::text::shingle;
///
/// let shingles = shingle(2, &["this", "is", "a", "test"]).unwrap();
/// assert_eq!(shingles, vec![&b"this is"[..], &b"is a"[..], &b"a test"[..]]);
/// ```
pub fn shingle<T: AsRef<[u8]>>(width: usize, tokens: &[T]) -> Result<Vec<Cow<'_, [u8]>>> {
    let shingles = Shingles::new(width, tokens)?;
    if width == 1 {
        return Ok(tokens.iter().map(|token| Cow::Borrowed(token.as_ref())).collect());
    }
    Ok(shingles.map(Cow::Owned).collect())
}
