use crate::models::{LatestObservation, SeriesPayload};

/// Most recent year in `payload` with a value.
///
/// Years are walked in descending key order (for four-digit year keys that is
/// plain numeric order). A missing payload, a payload without `data`, or a series
/// where every value is absent yields `None`.
pub fn latest_observation(payload: Option<&SeriesPayload>) -> Option<LatestObservation> {
    let data = payload?.data.as_ref()?;
    data.iter()
        .rev()
        .find_map(|(year, value)| {
            value.map(|value| LatestObservation {
                year: year.clone(),
                value,
            })
        })
}
