//! Indicator output addressed by absolute candle index.

/// Values of one indicator together with the absolute index of the first
/// candle they are defined for. The last value always belongs to the last
/// candle of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries<T> {
    first_index: usize,
    values: Vec<T>,
}

impl<T: Copy> IndicatorSeries<T> {
    pub fn new(first_index: usize, values: Vec<T>) -> Self {
        Self {
            first_index,
            values,
        }
    }

    /// A series that never warmed up.
    pub fn empty() -> Self {
        Self::new(0, Vec::new())
    }

    pub fn first_index(&self) -> usize {
        self.first_index
    }

    /// One past the last absolute index covered.
    pub fn end_index(&self) -> usize {
        self.first_index + self.values.len()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Value at absolute candle `index`, `None` before warm-up or past the end.
    pub fn get(&self, index: usize) -> Option<T> {
        index
            .checked_sub(self.first_index)
            .and_then(|offset| self.values.get(offset))
            .copied()
    }

    pub fn last(&self) -> Option<T> {
        self.values.last().copied()
    }

    /// Shift every absolute index by `offset`. Used when a series was computed
    /// over a suffix of the candles.
    pub(crate) fn offset_by(mut self, offset: usize) -> Self {
        self.first_index += offset;
        self
    }
}
