use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;
use crate::geometry::{Point, RectBounds};

/// Unique identifier for a region annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(Uuid);

impl RegionId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id from its canonical string form.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| TypeError::InvalidRegionId(s.to_string()))
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A labeled rectangular annotation over the asset's coordinate space.
///
/// Serializes to the flat wire shape `{id, code, x1, y1, x2, y2}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    /// User-assigned grouping label.
    pub code: String,
    #[serde(flatten)]
    pub bounds: RectBounds,
}

impl Region {
    /// Create a region with a fresh id from two corner points, normalizing
    /// the bounds regardless of drag direction.
    pub fn from_corners(code: impl Into<String>, a: Point, b: Point) -> Self {
        Self {
            id: RegionId::generate(),
            code: code.into(),
            bounds: RectBounds::from_corners(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_id_parse_round_trip() {
        let id = RegionId::generate();
        let parsed = RegionId::parse(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn region_id_parse_rejects_garbage() {
        assert!(RegionId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn region_wire_shape_is_flat() {
        let region = Region::from_corners("A1", Point::new(30.0, 40.0), Point::new(10.0, 20.0));
        let value = serde_json::to_value(&region).unwrap();
        let obj = value.as_object().unwrap();
        // Flat {id, code, x1, y1, x2, y2} — no nested bounds object.
        assert_eq!(obj.len(), 6);
        assert_eq!(obj["code"], "A1");
        assert_eq!(obj["x1"], 10.0);
        assert_eq!(obj["y1"], 20.0);
        assert_eq!(obj["x2"], 30.0);
        assert_eq!(obj["y2"], 40.0);
    }

    #[test]
    fn from_corners_normalizes() {
        let region = Region::from_corners("B2", Point::new(80.0, 70.0), Point::new(10.0, 5.0));
        assert!(region.bounds.is_normalized());
        assert_eq!(region.bounds.x1, 10.0);
        assert_eq!(region.bounds.y2, 70.0);
    }
}
