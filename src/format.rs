const UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

/// Render a byte count with the largest binary unit that keeps the value at
/// or above 1.0, always with two decimal places (`1536` -> `"1.50KiB"`).
///
/// Counts past the pebibyte range stay expressed in `PiB`.
#[must_use]
pub fn human_size(bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{value:.2}{}", UNITS[unit])
}
