use std::collections::HashSet;

use fake::Fake;
use fake::faker::address::en::CityName;
use fake::faker::company::en::CatchPhrase;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;

/// Attempts before a unique draw falls back to a suffixed value.
const MAX_UNIQUE_ATTEMPTS: u32 = 50;

pub fn person_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    Name().fake_with_rng(rng)
}

pub fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    PhoneNumber().fake_with_rng(rng)
}

pub fn city<R: Rng + ?Sized>(rng: &mut R) -> String {
    CityName().fake_with_rng(rng)
}

/// Tracks values already handed out for a unique column.
#[derive(Debug, Default)]
pub struct UniqueValues {
    seen: HashSet<String>,
}

impl UniqueValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw until an unseen value comes up; after the attempt budget is
    /// spent, disambiguate the last draw with `fallback`.
    pub fn draw(
        &mut self,
        mut next: impl FnMut() -> String,
        fallback: impl FnOnce(String) -> String,
    ) -> String {
        let mut candidate = next();
        for _ in 1..MAX_UNIQUE_ATTEMPTS {
            if !self.seen.contains(&candidate) {
                self.seen.insert(candidate.clone());
                return candidate;
            }
            candidate = next();
        }

        let mut value = fallback(candidate);
        while self.seen.contains(&value) {
            value.push('_');
        }
        self.seen.insert(value.clone());
        value
    }
}

/// Unique email; collisions get the row id appended to the local part.
pub fn unique_email<R: Rng + ?Sized>(rng: &mut R, seen: &mut UniqueValues, id: i64) -> String {
    seen.draw(
        || SafeEmail().fake_with_rng(rng),
        |email| match email.split_once('@') {
            Some((local, domain)) => format!("{local}{id}@{domain}"),
            None => format!("{email}{id}"),
        },
    )
}

/// Unique product name drawn from catch phrases.
pub fn unique_product_name<R: Rng + ?Sized>(
    rng: &mut R,
    seen: &mut UniqueValues,
    id: i64,
) -> String {
    seen.draw(
        || CatchPhrase().fake_with_rng(rng),
        |phrase| format!("{phrase} #{id}"),
    )
}
