//! Conversions from common length and speed units into metres and metres per second.

pub fn millimetres(v: f64) -> f64 {
    v / 1000.0
}

pub fn centimetres(v: f64) -> f64 {
    v / 100.0
}

pub fn kilometres(v: f64) -> f64 {
    v * 1000.0
}

pub fn inches(v: f64) -> f64 {
    v * 0.0254
}

pub fn feet(v: f64) -> f64 {
    v * 0.3048
}

pub fn yards(v: f64) -> f64 {
    v * 0.9144
}

pub fn miles(v: f64) -> f64 {
    v * 1609.344
}

pub fn kilometres_per_hour(v: f64) -> f64 {
    v / 3.6
}

pub fn miles_per_hour(v: f64) -> f64 {
    v * 0.44704
}

pub fn feet_per_second(v: f64) -> f64 {
    v * 0.3048
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths() {
        assert_eq!(centimetres(170.0), 1.7);
        assert_eq!(millimetres(20.0), 0.02);
        assert!((feet(1.0) - 12.0 * inches(1.0)).abs() < 1e-12);
        assert!((miles(1.0) - 1760.0 * yards(1.0)).abs() < 1e-9);
    }

    #[test]
    fn speeds() {
        assert!((kilometres_per_hour(36.0) - 10.0).abs() < 1e-12);
        assert!((miles_per_hour(1.0) - 0.44704).abs() < 1e-12);
    }
}
