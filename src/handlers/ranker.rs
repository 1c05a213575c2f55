//! Pure distance math over the store list. No side effects; the locator
//! actor decides what to do with the results.

use crate::models::error::RankError;
use crate::models::position::Coordinate;
use crate::models::store::Store;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two coordinates, by the
/// haversine formula with a mean Earth radius of 6371 km.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Every store within `radius_km` of `user`, paired with its distance.
/// Input order is preserved, but callers must not rely on it. Fails with
/// `InvalidCoordinate` if `user` or any store position is out of bounds;
/// an empty store list yields an empty result.
pub fn find_nearby<'a>(
    user: Coordinate,
    stores: &'a [Store],
    radius_km: f64,
) -> Result<Vec<(&'a Store, f64)>, RankError> {
    if !user.is_valid() {
        return Err(RankError::InvalidCoordinate(user));
    }
    if let Some(bad) = stores.iter().find(|s| !s.position.is_valid()) {
        return Err(RankError::InvalidCoordinate(bad.position));
    }

    Ok(stores
        .iter()
        .map(|store| (store, distance_km(user, store.position)))
        .filter(|(_, d)| *d <= radius_km)
        .collect())
}

/// The minimum-distance candidate, or `None` for an empty list. Ties
/// resolve to the first one encountered.
pub fn nearest<'a>(candidates: &[(&'a Store, f64)]) -> Option<(&'a Store, f64)> {
    candidates
        .iter()
        .copied()
        .reduce(|best, next| if next.1 < best.1 { next } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::store::SAMPLE_STORES;

    const MUMBAI: Coordinate = Coordinate { lat: 19.0760, lon: 72.8777 };
    const DELHI: Coordinate = Coordinate { lat: 28.6139, lon: 77.2090 };

    fn three_stores() -> Vec<Store> {
        vec![
            Store::new(1, "Mumbai", "Mumbai", MUMBAI),
            Store::new(2, "Delhi", "Delhi", DELHI),
            Store::new(3, "Bangalore", "Bangalore", Coordinate::new(12.9716, 77.5946)),
        ]
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(distance_km(MUMBAI, DELHI), distance_km(DELHI, MUMBAI));
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(distance_km(MUMBAI, MUMBAI), 0.0);
        assert_eq!(distance_km(DELHI, DELHI), 0.0);
    }

    #[test]
    fn mumbai_to_delhi() {
        let d = distance_km(MUMBAI, DELHI);
        assert!(d > 1150.0 && d < 1160.0, "got {d}");
    }

    #[test]
    fn nearby_only_returns_mumbai_store() {
        let stores = three_stores();
        let result = find_nearby(MUMBAI, &stores, 10.0).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].0.id, 1);
        assert!(result[0].1 < 0.001);

        let (store, d) = nearest(&result).unwrap();
        assert_eq!(store.id, 1);
        assert!(d < 0.001);
    }

    #[test]
    fn growing_radius_never_drops_a_store() {
        let stores = three_stores();
        let mut previous = 0;
        for radius in [10.0, 500.0, 900.0, 2000.0] {
            let result = find_nearby(MUMBAI, &stores, radius).unwrap();
            assert!(result.iter().all(|(_, d)| *d <= radius));
            assert!(result.len() >= previous);
            previous = result.len();
        }
        assert_eq!(previous, 3);
    }

    #[test]
    fn nearest_of_empty_is_none() {
        assert!(nearest(&[]).is_none());
    }

    #[test]
    fn nearest_picks_global_minimum() {
        let stores = three_stores();
        let result = find_nearby(MUMBAI, &stores, 5000.0).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(nearest(&result).unwrap().0.id, 1);
    }

    #[test]
    fn empty_store_list_is_not_an_error() {
        assert!(find_nearby(MUMBAI, &[], 10.0).unwrap().is_empty());
    }

    #[test]
    fn out_of_bounds_user_is_rejected() {
        let stores = three_stores();
        let bad = Coordinate::new(91.0, 0.0);
        assert_eq!(
            find_nearby(bad, &stores, 10.0),
            Err(RankError::InvalidCoordinate(bad))
        );
    }

    #[test]
    fn out_of_bounds_store_is_rejected() {
        let bad = Coordinate::new(0.0, 200.0);
        let stores = vec![Store::new(9, "Broken", "Nowhere", bad)];
        assert_eq!(
            find_nearby(MUMBAI, &stores, 10.0),
            Err(RankError::InvalidCoordinate(bad))
        );
    }

    #[test]
    fn sample_dataset_nearest_from_mumbai() {
        let result = find_nearby(MUMBAI, &SAMPLE_STORES, 10.0).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].0.id, 1);
    }
}
