//! Itemized score breakdowns.
//!
//! A breakdown is built from factor values, never from strings: the display
//! label comes from the factor's lookup entry and the total is the sum of the
//! items, so the two cannot drift apart.

use serde::{Serialize, Serializer};

/// A scoring category with a fixed weight and a display label.
pub trait Factor: Copy + Eq + std::fmt::Debug {
    /// Stable identifier, used for storage and logs only.
    fn code(self) -> &'static str;
    fn label(self) -> &'static str;
    fn points(self) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreItem<F: Factor> {
    pub factor: F,
}

impl<F: Factor> ScoreItem<F> {
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.factor.label()
    }

    #[must_use]
    pub fn points(&self) -> i32 {
        self.factor.points()
    }
}

impl<F: Factor> Serialize for ScoreItem<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut item = serializer.serialize_struct("ScoreItem", 2)?;
        item.serialize_field("label", self.label())?;
        item.serialize_field("points", &self.points())?;
        item.end()
    }
}

/// Score total plus the items that produced it, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreCard<F: Factor> {
    items: Vec<ScoreItem<F>>,
}

impl<F: Factor> Default for ScoreCard<F> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<F: Factor> ScoreCard<F> {
    /// Record a factor. A factor already on the card is ignored.
    pub fn award(&mut self, factor: F) {
        if !self.contains(factor) {
            self.items.push(ScoreItem { factor });
        }
    }

    #[must_use]
    pub fn contains(&self, factor: F) -> bool {
        self.items.iter().any(|item| item.factor == factor)
    }

    #[must_use]
    pub fn total(&self) -> i32 {
        self.items.iter().map(ScoreItem::points).sum()
    }

    #[must_use]
    pub fn items(&self) -> &[ScoreItem<F>] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<ScoreItem<F>> {
        self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<F: Factor> FromIterator<F> for ScoreCard<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        let mut card = ScoreCard::default();
        for factor in iter {
            card.award(factor);
        }
        card
    }
}
