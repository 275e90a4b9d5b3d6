use std::f64::consts::PI;

/// WebMercator constants
const R_MAJOR: f64 = 6378137.0;
const MAX_LAT: f64 = 85.05112877980659; // Max bounds for Web Mercator

pub const EPSG_WGS84: i32 = 4326;
pub const EPSG_WEB_MERCATOR: i32 = 3857;

/// from longitude, latitude (degrees) → Web Mercator (x, y in meters)
pub fn lon_lat_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
    // clamp latitude into Mercator's valid range
    let clamped_lat = lat.clamp(-MAX_LAT, MAX_LAT);

    let x = lon * R_MAJOR * PI / 180.0;
    let lat_rad = clamped_lat * PI / 180.0;
    let y = R_MAJOR * ((PI / 4.0 + lat_rad / 2.0).tan().ln());
    (x, y)
}

/// from Web Mercator (x, y in meters) → longitude, latitude (degrees)
pub fn mercator_to_lon_lat(x: f64, y: f64) -> (f64, f64) {
    let lon = x / (R_MAJOR * PI / 180.0);
    let lat_rad = 2.0 * ((y / R_MAJOR).exp().atan()) - PI / 2.0;
    let lat = lat_rad * 180.0 / PI;
    (lon, lat)
}

/// Fast project between 4326 and 3857 with proj as a fallback for any
/// other EPSG pair.
pub fn reproject(x: f64, y: f64, from_epsg: i32, to_epsg: i32) -> anyhow::Result<(f64, f64)> {
    // no work if same
    if from_epsg == to_epsg {
        return Ok((x, y));
    }

    match (from_epsg, to_epsg) {
        (EPSG_WGS84, EPSG_WEB_MERCATOR) => Ok(lon_lat_to_mercator(x, y)),
        (EPSG_WEB_MERCATOR, EPSG_WGS84) => Ok(mercator_to_lon_lat(x, y)),
        // any other CRS: fall back to PROJ
        _ => {
            let proj = proj::Proj::new_known_crs(
                format!("EPSG:{}", from_epsg).as_str(),
                format!("EPSG:{}", to_epsg).as_str(),
                None,
            )?;
            proj.convert((x, y)).map_err(anyhow::Error::from)
        }
    }
}
