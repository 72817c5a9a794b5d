use crate::models::Proximate;

/// Sort proximity hits by ascending distance from the query center
///
/// Stable: hits at equal distance keep their relative input order. The filter
/// itself never sorts; callers opt in to this step explicitly.
pub fn sort_by_distance<T>(hits: &mut [Proximate<'_, T>]) {
    hits.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
}
