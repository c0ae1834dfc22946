//! Fragment catalog records.
//!
//! A [`FragmentGroup`] describes one planned reconstruction: the bone model it
//! belongs to, the axis the cuts are measured along, and an ordered list of
//! [`Fragment`]s, each bounded by two [`FragmentSlice`] cutting planes.
//! Records are created when the catalog is loaded and never mutated.

use std::fmt;
use std::str::FromStr;

use guide_math::euler_to_quaternion;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};

/// Tolerance used when loading catalogs for the informational length check.
const LOAD_LENGTH_TOLERANCE: f64 = 1e-4;

/// Axis along which a group's slice offsets are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PrincipalAxis {
    /// Local X axis.
    #[default]
    X,
    /// Local Y axis.
    Y,
    /// Local Z axis.
    Z,
}

impl PrincipalAxis {
    /// Component index (0, 1 or 2).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Unit vector along the axis.
    #[must_use]
    pub fn unit_vector(self) -> Vector3<f64> {
        match self {
            Self::X => Vector3::x(),
            Self::Y => Vector3::y(),
            Self::Z => Vector3::z(),
        }
    }

    /// Lowercase axis name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

impl fmt::Display for PrincipalAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrincipalAxis {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            _ => Err(CatalogError::invalid_axis(s)),
        }
    }
}

impl TryFrom<String> for PrincipalAxis {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PrincipalAxis> for String {
    fn from(axis: PrincipalAxis) -> Self {
        axis.as_str().to_owned()
    }
}

/// One cutting plane: an offset along the principal axis plus its orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FragmentSlice {
    /// Offset in meters from the model's left anchor along the principal axis.
    pub distance_from_left_anchor: f64,
    /// Rotation about local X in degrees.
    pub x_rotation_degrees: f64,
    /// Rotation about local Y in degrees.
    pub y_rotation_degrees: f64,
    /// Rotation about local Z in degrees.
    pub z_rotation_degrees: f64,
}

impl FragmentSlice {
    /// Create a slice.
    #[must_use]
    pub const fn new(distance: f64, x_deg: f64, y_deg: f64, z_deg: f64) -> Self {
        Self {
            distance_from_left_anchor: distance,
            x_rotation_degrees: x_deg,
            y_rotation_degrees: y_deg,
            z_rotation_degrees: z_deg,
        }
    }

    /// Marker orientation in the model's local frame.
    #[must_use]
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        euler_to_quaternion(
            self.x_rotation_degrees,
            self.y_rotation_degrees,
            self.z_rotation_degrees,
        )
    }
}

/// A bone segment bounded by two cutting planes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// First cut.
    pub start_slice: FragmentSlice,
    /// Second cut.
    pub end_slice: FragmentSlice,
    /// Informational length in meters.
    pub length: f64,
}

impl Fragment {
    /// Create a fragment.
    #[must_use]
    pub const fn new(start_slice: FragmentSlice, end_slice: FragmentSlice, length: f64) -> Self {
        Self {
            start_slice,
            end_slice,
            length,
        }
    }

    /// Both slices, start first.
    #[must_use]
    pub const fn slices(&self) -> [&FragmentSlice; 2] {
        [&self.start_slice, &self.end_slice]
    }

    /// Distance between the slice offsets.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.end_slice.distance_from_left_anchor - self.start_slice.distance_from_left_anchor
    }

    /// True if `length` agrees with [`span`](Self::span) within `tolerance`.
    #[must_use]
    pub fn length_matches(&self, tolerance: f64) -> bool {
        (self.length - self.span()).abs() <= tolerance
    }
}

/// Immutable catalog entry describing one planned set of cuts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentGroup {
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Identifier of the 3D model and reference object.
    pub model_name: String,
    /// Axis the slice offsets are measured along.
    #[serde(default, alias = "orientation")]
    pub principal_axis: PrincipalAxis,
    /// Fragments in cutting order.
    pub fragments: Vec<Fragment>,
}

impl FragmentGroup {
    /// Number of marker slices (two per fragment).
    #[must_use]
    pub fn slice_count(&self) -> usize {
        self.fragments.len() * 2
    }

    /// Fragments whose stored length disagrees with their slice offsets.
    pub fn length_mismatches(&self, tolerance: f64) -> impl Iterator<Item = (usize, &Fragment)> {
        self.fragments
            .iter()
            .enumerate()
            .filter(move |(_, f)| !f.length_matches(tolerance))
    }

    /// Strict integrity check: reject the first fragment whose length does not
    /// match its slice span.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::LengthMismatch`] for the first offending fragment.
    pub fn check_integrity(&self, tolerance: f64) -> Result<()> {
        match self.length_mismatches(tolerance).next() {
            Some((index, fragment)) => Err(CatalogError::length_mismatch(
                &self.name,
                index,
                fragment.length,
                fragment.span(),
            )),
            None => Ok(()),
        }
    }
}

/// Loaded set of fragment groups, sorted by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    groups: Vec<FragmentGroup>,
}

impl Catalog {
    /// Build a catalog from groups.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no groups or a group has an empty model
    /// identifier. Length mismatches are logged and tolerated.
    pub fn new(mut groups: Vec<FragmentGroup>) -> Result<Self> {
        if groups.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        for group in &groups {
            if group.model_name.trim().is_empty() {
                return Err(CatalogError::missing_model(&group.name));
            }
            for (index, fragment) in group.length_mismatches(LOAD_LENGTH_TOLERANCE) {
                warn!(
                    group = %group.name,
                    index,
                    length = fragment.length,
                    span = fragment.span(),
                    "Fragment length does not match slice offsets"
                );
            }
        }

        groups.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(groups = groups.len(), "Loaded fragment catalog");
        Ok(Self { groups })
    }

    /// Parse a JSON array of fragment groups.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails [`Catalog::new`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let groups: Vec<FragmentGroup> = serde_json::from_str(json)?;
        Self::new(groups)
    }

    /// Groups in name order.
    #[must_use]
    pub fn groups(&self) -> &[FragmentGroup] {
        &self.groups
    }

    /// Find a group by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&FragmentGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True if the catalog has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Built-in fibula scan plan with three fragments along X.
    #[must_use]
    pub fn sample_group() -> FragmentGroup {
        FragmentGroup {
            name: "Real Fibula Scan".to_owned(),
            description: "Fragments mapped from offline measurements, scaled to meters."
                .to_owned(),
            model_name: "blue-1".to_owned(),
            principal_axis: PrincipalAxis::X,
            fragments: vec![
                Fragment::new(
                    FragmentSlice::new(0.05, -160.911, -83.0456, 144.811),
                    FragmentSlice::new(0.110_472_8, -1.974_43, 55.9448, 1.213_57),
                    0.060_472_8,
                ),
                Fragment::new(
                    FragmentSlice::new(0.128_634_3, -18.093, -58.4248, 5.211_48),
                    FragmentSlice::new(0.160_688_6, -4.2324, 59.2235, 1.289_83),
                    0.032_054_3,
                ),
                Fragment::new(
                    FragmentSlice::new(0.180_437_8, -40.5112, -50.6391, 35.8737),
                    FragmentSlice::new(0.227_387_8, -27.5019, 87.2228, -24.0868),
                    0.046_95,
                ),
            ],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn group_json(axis: &str) -> String {
        format!(
            r#"[{{
                "name": "Test Case A",
                "description": "single fragment",
                "model_name": "bone-white-1",
                "orientation": "{axis}",
                "fragments": [{{
                    "start_slice": {{
                        "distance_from_left_anchor": 0.05,
                        "x_rotation_degrees": 0.0,
                        "y_rotation_degrees": 0.0,
                        "z_rotation_degrees": 0.0
                    }},
                    "end_slice": {{
                        "distance_from_left_anchor": 0.11,
                        "x_rotation_degrees": 0.0,
                        "y_rotation_degrees": 90.0,
                        "z_rotation_degrees": 0.0
                    }},
                    "length": 0.06
                }}]
            }}]"#
        )
    }

    #[test]
    fn axis_parse() {
        assert_eq!("x".parse::<PrincipalAxis>().unwrap(), PrincipalAxis::X);
        assert_eq!(" Y ".parse::<PrincipalAxis>().unwrap(), PrincipalAxis::Y);
        assert_eq!("z".parse::<PrincipalAxis>().unwrap(), PrincipalAxis::Z);
        assert!(matches!(
            "w".parse::<PrincipalAxis>(),
            Err(CatalogError::InvalidAxis(_))
        ));
    }

    #[test]
    fn axis_vectors() {
        assert_eq!(PrincipalAxis::X.unit_vector(), Vector3::x());
        assert_eq!(PrincipalAxis::Y.index(), 1);
        assert_eq!(PrincipalAxis::Z.to_string(), "z");
    }

    #[test]
    fn load_from_json() {
        let catalog = Catalog::from_json_str(&group_json("y")).unwrap();
        assert_eq!(catalog.len(), 1);
        let group = catalog.find("Test Case A").unwrap();
        assert_eq!(group.principal_axis, PrincipalAxis::Y);
        assert_eq!(group.slice_count(), 2);
        assert_eq!(group.fragments[0].end_slice.y_rotation_degrees, 90.0);
    }

    #[test]
    fn load_rejects_bad_axis() {
        let err = Catalog::from_json_str(&group_json("q")).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
        assert!(err.to_string().contains("invalid principal axis"));
    }

    #[test]
    fn load_rejects_empty() {
        assert!(matches!(
            Catalog::from_json_str("[]"),
            Err(CatalogError::EmptyCatalog)
        ));
    }

    #[test]
    fn load_rejects_missing_model() {
        let mut group = Catalog::sample_group();
        group.model_name = "  ".to_owned();
        assert!(matches!(
            Catalog::new(vec![group]),
            Err(CatalogError::MissingModel { .. })
        ));
    }

    #[test]
    fn load_tolerates_length_mismatch() {
        let mut group = Catalog::sample_group();
        group.fragments[1].length = 1.0;
        let catalog = Catalog::new(vec![group]).unwrap();
        let group = &catalog.groups()[0];
        assert_eq!(group.length_mismatches(1e-4).count(), 1);
        assert!(matches!(
            group.check_integrity(1e-4),
            Err(CatalogError::LengthMismatch { index: 1, .. })
        ));
    }

    #[test]
    fn groups_sorted_by_name() {
        let mut b = Catalog::sample_group();
        b.name = "Bone White Fibula".to_owned();
        let catalog = Catalog::new(vec![Catalog::sample_group(), b]).unwrap();
        let names: Vec<_> = catalog.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Bone White Fibula", "Real Fibula Scan"]);
    }

    #[test]
    fn sample_lengths_match_spans() {
        let group = Catalog::sample_group();
        assert!(group.check_integrity(1e-6).is_ok());
        for fragment in &group.fragments {
            assert!(fragment.span() > 0.0);
        }
    }

    #[test]
    fn slice_rotation_uses_authored_order() {
        let slice = FragmentSlice::new(0.0, 0.0, 90.0, 0.0);
        let expected = UnitQuaternion::from_axis_angle(
            &Vector3::y_axis(),
            std::f64::consts::FRAC_PI_2,
        );
        assert_relative_eq!(slice.rotation(), expected, epsilon = 1e-12);
    }

    #[test]
    fn group_serializes_axis_lowercase() {
        let json = serde_json::to_string(&Catalog::sample_group()).unwrap();
        assert!(json.contains(r#""principal_axis":"x""#));
    }
}
