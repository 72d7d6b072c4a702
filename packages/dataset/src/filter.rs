//! Filter engine: narrows a [`Dataset`] to the user's [`FilterSelection`].

use crime_dash_dataset_models::FilterSelection;

use crate::Dataset;

impl Dataset {
    /// Returns the records whose state, district and year are each in the
    /// corresponding inclusion set.
    ///
    /// [`Selection::All`](crate::Selection::All) resolves to the distinct
    /// values of this dataset at call time; an explicitly empty set yields
    /// an empty dataset.
    #[must_use]
    pub fn filter(&self, selection: &FilterSelection) -> Self {
        let states = selection.states.resolve(&self.distinct_states());
        let districts = selection.districts.resolve(&self.distinct_districts());
        let years = selection.years.resolve(&self.distinct_years());

        let records: Vec<_> = self
            .iter()
            .filter(|r| {
                states.contains(&r.state)
                    && districts.contains(&r.district)
                    && years.contains(&r.year)
            })
            .cloned()
            .collect();

        log::debug!(
            "Filter kept {} of {} records ({} states, {} districts, {} years selected)",
            records.len(),
            self.len(),
            states.len(),
            districts.len(),
            years.len(),
        );

        // Already unique: a subset of a deduplicated dataset.
        Self { records }
    }
}
