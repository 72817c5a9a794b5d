use rayon::prelude::*;
use thiserror::Error;

use crate::models::{BoundingBox, GeoPoint, Located, Proximate, ProximityQuery};
use crate::core::distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box};

/// Candidate count at which the scan moves onto the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Caller contract violations rejected by the proximity filter
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProximityError {
    #[error("radius must be a non-negative number of kilometers, got {0}")]
    InvalidRadius(f64),

    #[error("center coordinates must be finite, got ({latitude}, {longitude})")]
    NonFiniteCenter { latitude: f64, longitude: f64 },
}

/// Radius filter over located records
///
/// Returns exactly the candidates whose great-circle distance from the query
/// center is at most the radius, in input order. The bounding box pre-filter
/// and the parallel scan are optimizations only: they never change the result.
#[derive(Debug, Clone, Copy)]
pub struct ProximityFilter {
    prefilter: bool,
    parallel_threshold: usize,
}

impl ProximityFilter {
    pub fn new(prefilter: bool, parallel_threshold: usize) -> Self {
        Self {
            prefilter,
            parallel_threshold: parallel_threshold.max(1),
        }
    }

    /// Plain sequential scan, every candidate gets a haversine computation
    pub fn linear() -> Self {
        Self {
            prefilter: false,
            parallel_threshold: usize::MAX,
        }
    }

    pub fn prefilter_enabled(&self) -> bool {
        self.prefilter
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Find every candidate within the query radius, with its distance
    ///
    /// # Errors
    /// `InvalidRadius` for a negative or NaN radius, `NonFiniteCenter` when
    /// the center has a NaN or infinite coordinate.
    pub fn find<'a, T>(
        &self,
        query: &ProximityQuery,
        candidates: &'a [T],
    ) -> Result<Vec<Proximate<'a, T>>, ProximityError>
    where
        T: Located + Sync,
    {
        validate(query)?;

        let center = query.center;
        let radius_km = query.radius_km;
        let bbox = self
            .prefilter
            .then(|| calculate_bounding_box(center.latitude, center.longitude, radius_km));

        let test = |record: &'a T| within(record, center, radius_km, bbox.as_ref());

        let matches: Vec<Proximate<'a, T>> = if candidates.len() >= self.parallel_threshold {
            // Indexed parallel iterators collect in input order
            candidates.par_iter().filter_map(test).collect()
        } else {
            candidates.iter().filter_map(test).collect()
        };

        tracing::debug!(
            "Proximity scan: {} of {} candidates within {} km of ({}, {})",
            matches.len(),
            candidates.len(),
            radius_km,
            center.latitude,
            center.longitude
        );

        Ok(matches)
    }

    /// Same as [`find`](Self::find) but returns only the matching records
    pub fn filter<'a, T>(
        &self,
        query: &ProximityQuery,
        candidates: &'a [T],
    ) -> Result<Vec<&'a T>, ProximityError>
    where
        T: Located + Sync,
    {
        Ok(self
            .find(query, candidates)?
            .into_iter()
            .map(|hit| hit.record)
            .collect())
    }
}

impl Default for ProximityFilter {
    fn default() -> Self {
        Self::new(true, DEFAULT_PARALLEL_THRESHOLD)
    }
}

fn validate(query: &ProximityQuery) -> Result<(), ProximityError> {
    // `!(r >= 0)` also catches NaN
    if !(query.radius_km >= 0.0) {
        return Err(ProximityError::InvalidRadius(query.radius_km));
    }

    if !query.center.is_finite() {
        return Err(ProximityError::NonFiniteCenter {
            latitude: query.center.latitude,
            longitude: query.center.longitude,
        });
    }

    Ok(())
}

#[inline]
fn within<'a, T: Located>(
    record: &'a T,
    center: GeoPoint,
    radius_km: f64,
    bbox: Option<&BoundingBox>,
) -> Option<Proximate<'a, T>> {
    let point = record.location();

    if let Some(bbox) = bbox {
        if !is_within_bounding_box(point.latitude, point.longitude, bbox) {
            return None;
        }
    }

    let distance_km = haversine_distance(
        center.latitude,
        center.longitude,
        point.latitude,
        point.longitude,
    );

    // NaN distances fail the comparison
    (distance_km <= radius_km).then_some(Proximate {
        record,
        distance_km,
    })
}
