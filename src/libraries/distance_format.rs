/// Placeholder shown while a distance is still unknown.
pub const CALCULATING: &str = "Calculando...";

/// Render a distance in meters the way the app displays it: whole meters under
/// 1km, kilometers with two decimals from 1km up. `None` or a negative value
/// is the "still calculating" state, not an error.
pub fn format_distance(meters: Option<f64>) -> String {
    match meters {
        Some(m) if m >= 1000.0 => format!("{:.2} km", m / 1000.0),
        Some(m) if m >= 0.0 => format!("{} m", m.round() as i64),
        _ => CALCULATING.to_string(),
    }
}
