//! Weighted random choice over character ids.

use rand::Rng;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedPicker {
    items: Vec<(String, f64)>,
}

impl WeightedPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: impl Into<String>, weight: f64) {
        self.items.push((item.into(), weight));
    }

    /// Drop every entry for `item`.
    pub fn remove(&mut self, item: &str) {
        self.items.retain(|(id, _)| id != item);
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|(id, _)| id == item)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(id, _)| id.as_str())
    }

    /// Cumulative-weight draw. Entries with a non-positive or non-finite weight are never
    /// picked; returns None when no entry has positive weight.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        let usable = |w: f64| w.is_finite() && w > 0.0;
        let total: f64 = self.items.iter().map(|(_, w)| *w).filter(|w| usable(*w)).sum();
        if total <= 0.0 {
            return None;
        }

        let target = rng.gen::<f64>() * total;
        let mut cumulative = 0.0;
        let mut last = None;
        for (id, weight) in &self.items {
            if !usable(*weight) {
                continue;
            }
            cumulative += weight;
            last = Some(id.as_str());
            if target < cumulative {
                return last;
            }
        }
        // float rounding can leave target just past the final bucket
        last
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn empty_or_weightless_pool_picks_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(WeightedPicker::new().pick(&mut rng), None);

        let mut p = WeightedPicker::new();
        p.add("mute", 0.0);
        p.add("nan", f64::NAN);
        assert_eq!(p.pick(&mut rng), None);
    }

    #[test]
    fn zero_weight_entries_are_never_picked() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut p = WeightedPicker::new();
        p.add("never", 0.0);
        p.add("always", 2.0);
        for _ in 0..200 {
            assert_eq!(p.pick(&mut rng), Some("always"));
        }
    }

    #[test]
    fn picks_roughly_in_proportion_to_weight() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut p = WeightedPicker::new();
        p.add("rare", 1.0);
        p.add("common", 3.0);
        let draws = 4000;
        let common = (0..draws)
            .filter(|_| p.pick(&mut rng) == Some("common"))
            .count();
        let share = common as f64 / draws as f64;
        assert!((0.70..0.80).contains(&share), "common share was {share}");
    }

    #[test]
    fn remove_drops_all_entries_for_item() {
        let mut p = WeightedPicker::new();
        p.add("a", 1.0);
        p.add("b", 1.0);
        p.add("a", 2.0);
        p.remove("a");
        assert_eq!(p.items().collect::<Vec<_>>(), vec!["b"]);
        assert!(!p.contains("a"));
    }
}
