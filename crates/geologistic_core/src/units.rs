/// Distance as reported by the routing service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meters(f64);

impl Meters {
    pub fn new(value: f64) -> Self {
        Meters(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn to_km(&self) -> f64 {
        self.0 / 1000.0
    }
}

/// Duration as reported by the routing service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seconds(f64);

impl Seconds {
    pub fn new(value: f64) -> Self {
        Seconds(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn to_minutes(&self) -> f64 {
        self.0 / 60.0
    }
}
