use crate::order::Warehouse;

/// A city with the base coordinates every order jitters around.
#[derive(Debug, Clone)]
pub struct City {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

pub const WAREHOUSE_CITY: &str = "porto";
pub const WAREHOUSE_ID: &str = "wh-porto-001";
pub const WAREHOUSE_NAME: &str = "warehouse porto";

pub fn portugal_cities() -> Vec<City> {
    [
        ("porto", -8.6291, 41.1579),
        ("lisboa", -9.1393, 38.7223),
        ("braga", -8.4292, 41.5454),
        ("coimbra", -8.4292, 40.2033),
        ("aveiro", -8.6455, 40.6405),
        ("faro", -7.9351, 37.0194),
        ("viseu", -7.9137, 40.6610),
        ("évora", -7.9097, 38.5667),
        ("setúbal", -8.8932, 38.5244),
        ("leiria", -8.8050, 39.7436),
        ("viana do castelo", -8.8333, 41.6932),
        ("vilareal", -7.7461, 41.3006),
        ("bragança", -6.7567, 41.8067),
        ("guarda", -7.2620, 40.5373),
        ("santarém", -8.6820, 39.2362),
        ("castelo branco", -7.4909, 39.8222),
        ("portalegre", -7.4322, 39.2967),
        ("beja", -7.8632, 38.0151),
    ]
    .into_iter()
    .map(|(name, lon, lat)| City {
        name: name.to_string(),
        lon,
        lat,
    })
    .collect()
}

/// The active warehouse sits at the Porto base coordinates.
pub fn warehouse_for(cities: &[City]) -> Option<Warehouse> {
    cities
        .iter()
        .find(|city| city.name == WAREHOUSE_CITY)
        .map(|city| Warehouse {
            warehouse_id: WAREHOUSE_ID.to_string(),
            name: WAREHOUSE_NAME.to_string(),
            city: city.name.clone(),
            lon: city.lon,
            lat: city.lat,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warehouse_is_porto() {
        let cities = portugal_cities();
        let warehouse = warehouse_for(&cities).unwrap();

        assert_eq!(warehouse.warehouse_id, "wh-porto-001");
        assert_eq!(warehouse.city, "porto");
        assert_eq!(warehouse.lon, -8.6291);
        assert_eq!(warehouse.lat, 41.1579);
    }

    #[test]
    fn test_city_list_has_no_duplicates() {
        let cities = portugal_cities();
        let mut names: Vec<&str> = cities.iter().map(|city| city.name.as_str()).collect();
        names.sort();
        names.dedup();

        assert_eq!(names.len(), cities.len());
    }
}
