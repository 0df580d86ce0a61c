/// A named candidate with a running vote counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyOption {
    /// Display name, chosen at creation. Non-empty. Used as the display key;
    /// duplicates are a display ambiguity, not a data error.
    pub name: String,
    /// Optional descriptive text (empty string = no notes).
    pub notes: String,
    /// Current vote count. Never goes below zero.
    pub counter: u64,
}

impl TallyOption {
    pub fn new(name: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notes: notes.into(),
            counter: 0,
        }
    }
}

/// The tally board's single source of truth: an ordered option list plus the
/// aggregate vote total.
///
/// `total_votes` is tracked incrementally alongside each mutation and must
/// equal the sum of all counters after every completed operation. Removal
/// debits the removed option's counter so the equality survives list edits.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TallyStore {
    options: Vec<TallyOption>,
    total_votes: u64,
}

impl TallyStore {
    pub fn new(options: Vec<TallyOption>) -> Self {
        let total_votes = options.iter().map(|o| o.counter).sum();
        Self {
            options,
            total_votes,
        }
    }

    /// The built-in seed list shown at startup.
    pub fn seeded() -> Self {
        Self::new(vec![
            TallyOption::new("Diah Wihardini", "PhD in Education, Cal 2016"),
            TallyOption::new(
                "Freddy Samad",
                "B. Sc. in Civil and Environmental Engineering, Cal 2000",
            ),
        ])
    }

    pub fn options(&self) -> &[TallyOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn total_votes(&self) -> u64 {
        self.total_votes
    }

    /// Append a new option with a zero counter. A blank name (empty or
    /// whitespace-only) is a silent no-op, matching permissive form input.
    /// Returns whether an option was added.
    pub fn add_option(&mut self, name: &str, notes: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.options.push(TallyOption::new(name, notes.trim()));
        true
    }

    /// Remove the option at `index`, debiting its counter from the total.
    /// Panics if `index` is out of range.
    pub fn remove_option(&mut self, index: usize) -> TallyOption {
        assert!(
            index < self.options.len(),
            "remove_option index out of range: {index}"
        );
        let removed = self.options.remove(index);
        self.total_votes -= removed.counter;
        removed
    }

    /// Apply a +1 or -1 vote to the option at `index`. Counter and total move
    /// together in one call. Decrementing a zero counter is a no-op (the
    /// total is left untouched too). Panics if `index` is out of range or
    /// `delta` is not +1/-1.
    pub fn vote(&mut self, index: usize, delta: i64) {
        assert!(index < self.options.len(), "vote index out of range: {index}");
        assert!(delta == 1 || delta == -1, "vote delta must be +1 or -1");
        let option = &mut self.options[index];
        if delta < 0 {
            if option.counter == 0 {
                return;
            }
            option.counter -= 1;
            self.total_votes -= 1;
        } else {
            option.counter += 1;
            self.total_votes += 1;
        }
    }

    /// Share of the total held by the option at `index`, as a percentage
    /// rounded to one decimal place. Zero when no votes have been cast.
    /// Panics if `index` is out of range.
    pub fn percentage(&self, index: usize) -> f64 {
        assert!(
            index < self.options.len(),
            "percentage index out of range: {index}"
        );
        if self.total_votes == 0 {
            return 0.0;
        }
        let raw = self.options[index].counter as f64 * 100.0 / self.total_votes as f64;
        (raw * 10.0).round() / 10.0
    }

    /// Cross-check: incremental total vs. recomputed sum.
    pub fn invariant_holds(&self) -> bool {
        self.total_votes == self.options.iter().map(|o| o.counter).sum::<u64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_option_store() -> TallyStore {
        TallyStore::new(vec![
            TallyOption::new("A", "first"),
            TallyOption::new("B", "second"),
        ])
    }

    #[test]
    fn votes_keep_total_in_sync_with_counters() {
        let mut store = two_option_store();
        let sequence = [(0, 1), (0, 1), (1, 1), (0, -1), (1, 1), (1, -1)];
        for (index, delta) in sequence {
            store.vote(index, delta);
            assert!(
                store.invariant_holds(),
                "total must equal counter sum after vote({index}, {delta})"
            );
        }
    }

    #[test]
    fn decrement_at_zero_is_a_no_op() {
        let mut store = two_option_store();
        store.vote(1, 1);
        store.vote(0, -1);
        assert_eq!(store.options()[0].counter, 0);
        assert_eq!(store.total_votes(), 1, "no-op decrement must not touch the total");
        assert!(store.invariant_holds());
    }

    #[test]
    fn blank_name_add_leaves_store_unchanged() {
        let mut store = two_option_store();
        assert!(!store.add_option("", "notes"));
        assert!(!store.add_option("   ", "notes"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn add_appends_with_zero_counter() {
        let mut store = two_option_store();
        store.vote(0, 1);
        assert!(store.add_option("C", "third"));
        assert_eq!(store.len(), 3);
        let added = &store.options()[2];
        assert_eq!(added.name, "C");
        assert_eq!(added.counter, 0);
        assert_eq!(store.total_votes(), 1, "add must not touch the total");
    }

    #[test]
    fn add_trims_surrounding_whitespace() {
        let mut store = TallyStore::default();
        assert!(store.add_option("  C  ", " note "));
        assert_eq!(store.options()[0].name, "C");
        assert_eq!(store.options()[0].notes, "note");
    }

    #[test]
    fn removal_debits_the_removed_counter_from_the_total() {
        let mut store = two_option_store();
        store.vote(0, 1);
        store.vote(0, 1);
        store.vote(1, 1);
        let removed = store.remove_option(0);
        assert_eq!(removed.name, "A");
        assert_eq!(removed.counter, 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.total_votes(), 1);
        assert!(store.invariant_holds());
    }

    #[test]
    fn percentage_is_zero_when_no_votes_cast() {
        let store = two_option_store();
        assert_eq!(store.percentage(0), 0.0);
        assert_eq!(store.percentage(1), 0.0);
    }

    #[test]
    fn percentages_split_across_options() {
        let mut store = two_option_store();
        store.vote(0, 1);
        store.vote(0, 1);
        store.vote(0, 1);
        store.vote(1, 1);
        assert_eq!(store.options()[0].counter, 3);
        assert_eq!(store.options()[1].counter, 1);
        assert_eq!(store.total_votes(), 4);
        assert_eq!(store.percentage(0), 75.0);
        assert_eq!(store.percentage(1), 25.0);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        let mut store = TallyStore::new(vec![
            TallyOption::new("A", ""),
            TallyOption::new("B", ""),
            TallyOption::new("C", ""),
        ]);
        store.vote(0, 1);
        store.vote(1, 1);
        store.vote(2, 1);
        assert_eq!(store.percentage(0), 33.3);
    }

    #[test]
    fn new_recomputes_total_from_seed_counters() {
        let mut seed = two_option_store();
        seed.vote(0, 1);
        let rebuilt = TallyStore::new(seed.options().to_vec());
        assert_eq!(rebuilt.total_votes(), 1);
        assert!(rebuilt.invariant_holds());
    }

    #[test]
    fn seeded_store_starts_with_zero_votes() {
        let store = TallyStore::seeded();
        assert_eq!(store.len(), 2);
        assert_eq!(store.total_votes(), 0);
        assert!(store.options().iter().all(|o| o.counter == 0));
    }

    #[test]
    #[should_panic(expected = "vote index out of range")]
    fn vote_panics_on_out_of_range_index() {
        let mut store = two_option_store();
        store.vote(2, 1);
    }

    #[test]
    #[should_panic(expected = "remove_option index out of range")]
    fn remove_panics_on_out_of_range_index() {
        let mut store = two_option_store();
        store.remove_option(5);
    }

    #[test]
    #[should_panic(expected = "percentage index out of range")]
    fn percentage_panics_on_out_of_range_index() {
        let store = two_option_store();
        store.percentage(2);
    }
}
