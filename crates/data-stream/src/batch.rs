//! Query batches.

/// The items returned by one fetch, together with the cursor position that
/// was in effect when the fetch started.
///
/// The position is captured before the stream's advance policy runs, so it
/// always tells where the batch was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamQueryBatch<T, P> {
    items: Vec<T>,
    cursor: P,
}

impl<T, P> StreamQueryBatch<T, P> {
    pub fn new(items: Vec<T>, cursor: P) -> Self {
        Self { items, cursor }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Position of the cursor at fetch time.
    pub fn cursor(&self) -> &P {
        &self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn into_parts(self) -> (Vec<T>, P) {
        (self.items, self.cursor)
    }
}

impl<T, P> IntoIterator for StreamQueryBatch<T, P> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T, P> IntoIterator for &'a StreamQueryBatch<T, P> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
