use rand::Rng;

use crate::errors::GenerationError;
use crate::records::Record;

/// Ordered view over a parent table's generated rows.
///
/// Children draw foreign keys only through a pool, so every key they carry
/// belongs to a row that already exists.
#[derive(Debug, Clone, Copy)]
pub struct KeyPool<'a, T> {
    records: &'a [T],
}

impl<'a, T: Record> KeyPool<'a, T> {
    pub fn new(records: &'a [T]) -> Result<Self, GenerationError> {
        if records.is_empty() {
            return Err(GenerationError::EmptyPool(T::table().name));
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Uniformly pick one parent row.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &'a T {
        &self.records[rng.random_range(0..self.len())]
    }

    /// Pick up to `amount` distinct parent rows, in draw order.
    pub fn sample_distinct<R: Rng + ?Sized>(&self, rng: &mut R, amount: usize) -> Vec<&'a T> {
        let amount = amount.min(self.len());
        rand::seq::index::sample(rng, self.len(), amount)
            .into_iter()
            .map(|idx| &self.records[idx])
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.records.iter()
    }
}
