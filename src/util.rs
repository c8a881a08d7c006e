pub mod fmt;
#[cfg(test)]
pub(crate) mod test_utils;

/// Extension for iterators whose last interesting item can be recognized,
/// such as a token stream ending in an error.
pub trait UpToExt: Iterator + Sized {
    /// Yields items up to and including the first one matching `stop`.
    fn up_to<P>(self, stop: P) -> UpTo<Self, P>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        UpTo {
            iter: self,
            stop: Some(stop),
        }
    }
}

impl<I: Iterator> UpToExt for I {}

pub struct UpTo<I, P> {
    iter: I,
    /// Cleared once the stopping item has been yielded.
    stop: Option<P>,
}

impl<I, P> Iterator for UpTo<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let stop = self.stop.as_mut()?;
        let item = self.iter.next()?;
        if stop(&item) {
            self.stop = None;
        }
        Some(item)
    }
}
