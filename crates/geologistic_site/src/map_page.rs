use geojson::{Geometry, Value};
use geologistic_core::sequence::{StopKind, StopRecord};
use serde::Serialize;

/// Totals shown in the page's overlay box.
#[derive(Debug, Clone, Copy)]
pub struct RouteTotals {
    pub distance_km: f64,
    pub duration_min: f64,
}

#[derive(Serialize)]
struct Marker {
    rank: usize,
    lat: f64,
    lon: f64,
    label: String,
}

/// Self-contained Leaflet page: the route polyline plus one numbered marker
/// per stop, the warehouse labeled apart from the orders.
pub fn render_route_map(stops: &[StopRecord], geometry: &Geometry, totals: &RouteTotals) -> String {
    let route_json = embed_json(&route_latlngs(geometry));
    let markers_json = embed_json(&markers(stops));
    let (center_lat, center_lon) = stops
        .first()
        .map(|stop| (stop.lat, stop.lon))
        .unwrap_or((0.0, 0.0));
    let distance_km = totals.distance_km;
    let duration_min = totals.duration_min;

    format!(
        r#"<!doctype html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1">
<title>geologistic – route</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
 html,body{{margin:0;height:100%}}
 #map{{height:100%}}
 .stop-label{{font-weight:bold;font-size:12px}}
 .totals{{position:absolute;top:10px;right:10px;z-index:1000;background:#fff;
  padding:.4rem .6rem;border-radius:4px;box-shadow:0 1px 4px rgba(0,0,0,.3);
  font-family:system-ui,sans-serif;font-size:14px}}
</style>
</head><body>
<div id="map"></div>
<div class="totals">{distance_km:.1} km | {duration_min:.1} min</div>
<script>
 const route = {route_json};
 const stops = {markers_json};
 const map = L.map('map').setView([{center_lat}, {center_lon}], 7);
 L.control.scale().addTo(map);
 L.tileLayer('https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png',
  {{attribution: '&copy; OpenStreetMap contributors'}}).addTo(map);
 if (route.length) {{
  const line = L.polyline(route).addTo(map);
  map.fitBounds(line.getBounds());
 }}
 for (const s of stops) {{
  L.marker([s.lat, s.lon], {{icon: L.divIcon({{html: `<div class="stop-label">${{s.rank}}</div>`}})}})
   .bindTooltip(s.label).bindPopup(s.label).addTo(map);
 }}
</script>
</body></html>
"#
    )
}

/// Leaflet wants `[lat, lon]`; the service hands back GeoJSON `[lon, lat]`.
/// Anything but a LineString renders as no route, matching what the original
/// page did when the geometry was absent.
fn route_latlngs(geometry: &Geometry) -> Vec<[f64; 2]> {
    match &geometry.value {
        Value::LineString(coords) => coords
            .iter()
            .filter(|position| position.len() >= 2)
            .map(|position| [position[1], position[0]])
            .collect(),
        _ => Vec::new(),
    }
}

fn markers(stops: &[StopRecord]) -> Vec<Marker> {
    stops
        .iter()
        .map(|stop| {
            let name = match stop.stop_type {
                StopKind::Warehouse => "warehouse".to_string(),
                StopKind::Order => format!("order {}", stop.order_id),
            };
            Marker {
                rank: stop.rank,
                lat: stop.lat,
                lon: stop.lon,
                label: format!("{}. {} - {}", stop.rank, name, stop.city),
            }
        })
        .collect()
}

fn embed_json<T: Serialize>(value: &T) -> String {
    // "</" inside a string would end the script tag early when the browser
    // parses the page, so it gets the JSON escape form.
    serde_json::to_string(value)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_stops() -> Vec<StopRecord> {
        vec![
            StopRecord {
                rank: 1,
                stop_type: StopKind::Warehouse,
                order_id: String::new(),
                city: "porto".to_string(),
                lon: -8.6291,
                lat: 41.1579,
            },
            StopRecord {
                rank: 2,
                stop_type: StopKind::Order,
                order_id: "ord-1".to_string(),
                city: "braga".to_string(),
                lon: -8.4292,
                lat: 41.5454,
            },
        ]
    }

    fn line_geometry() -> Geometry {
        Geometry::new(Value::LineString(vec![
            vec![-8.6291, 41.1579],
            vec![-8.4292, 41.5454],
            vec![-8.6291, 41.1579],
        ]))
    }

    #[test]
    fn test_page_labels_every_stop() {
        let html = render_route_map(
            &test_stops(),
            &line_geometry(),
            &RouteTotals {
                distance_km: 84.2,
                duration_min: 61.0,
            },
        );

        assert!(html.contains("1. warehouse - porto"));
        assert!(html.contains("2. order ord-1 - braga"));
        assert!(html.contains("84.2 km | 61.0 min"));
    }

    #[test]
    fn test_route_coordinates_flip_to_lat_lon() {
        let latlngs = route_latlngs(&line_geometry());

        assert_eq!(latlngs.len(), 3);
        assert_eq!(latlngs[0], [41.1579, -8.6291]);
    }

    #[test]
    fn test_non_linestring_geometry_renders_no_route() {
        let geometry = Geometry::new(Value::Point(vec![-8.6291, 41.1579]));
        let html = render_route_map(
            &test_stops(),
            &geometry,
            &RouteTotals {
                distance_km: 0.0,
                duration_min: 0.0,
            },
        );

        assert!(html.contains("const route = []"));
    }

    #[test]
    fn test_script_closers_in_labels_are_escaped() {
        let mut stops = test_stops();
        stops[1].city = "</script><script>alert(1)".to_string();

        let html = render_route_map(
            &stops,
            &line_geometry(),
            &RouteTotals {
                distance_km: 1.0,
                duration_min: 1.0,
            },
        );

        assert!(!html.contains("- </script>"));
        assert!(html.contains("<\\/script>"));
    }
}
