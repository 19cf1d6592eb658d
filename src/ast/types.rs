use rustpython_parser::ast::{Located, Location};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Range {
    pub location: Location,
    pub end_location: Location,
}

impl Range {
    pub fn from_located<T>(located: &Located<T>) -> Self {
        Range {
            location: located.location,
            end_location: located.end_location.unwrap(),
        }
    }

    /// Whether a `Location` falls within the range. Half-open: a location at
    /// `end_location` is outside.
    pub fn contains(&self, location: Location) -> bool {
        self.location <= location && location < self.end_location
    }
}
