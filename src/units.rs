use std::fmt;

use crate::error::Error;

/// Display unit for memory readings, power-of-1024 scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    B,
    KB,
    MB,
    GB,
}

const ALL: [Unit; 4] = [Unit::B, Unit::KB, Unit::MB, Unit::GB];

impl Unit {
    pub fn name(self) -> &'static str {
        match self {
            Unit::B => "B",
            Unit::KB => "KB",
            Unit::MB => "MB",
            Unit::GB => "GB",
        }
    }

    pub fn exponent(self) -> i32 {
        match self {
            Unit::B => 0,
            Unit::KB => 1,
            Unit::MB => 2,
            Unit::GB => 3,
        }
    }

    pub fn divisor(self) -> f64 {
        1024f64.powi(self.exponent())
    }

    pub fn convert(self, bytes: u64) -> f64 {
        bytes as f64 / self.divisor()
    }

    ///case insensitive, a bare letter is expanded to its byte form when that exists ("m" -> MB)
    pub fn parse(input: &str) -> Result<Unit, Error> {
        let upper = input.trim().to_uppercase();
        if upper.is_empty() {
            return Err(Error::UnsupportedUnit(upper));
        }
        let with_b = format!("{upper}B");
        lookup(&with_b)
            .or_else(|| lookup(&upper))
            .ok_or(Error::UnsupportedUnit(upper))
    }
}

fn lookup(name: &str) -> Option<Unit> {
    ALL.into_iter().find(|u| u.name() == name)
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
