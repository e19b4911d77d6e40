//! Source paths and their wire representation.
//!
//! A source path is an ordered list of typed structural indices describing a
//! location in the original document. On the wire each point is
//! `{ "kind": int, "index": int, "fingerprint": string }`; the first point is
//! always a root marker and a `CharIndex` point may only appear last.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::tree::NodeKind;

/// One element of a source path.
///
/// `fingerprint` is an opaque identity string produced by the document
/// compiler. The matching algorithm is purely positional and never consults
/// it, but it is carried intact for external consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePathPoint {
    #[serde(with = "kind_code")]
    pub kind: NodeKind,
    pub index: usize,
    #[serde(default)]
    pub fingerprint: String,
}

impl SourcePathPoint {
    pub fn new(kind: NodeKind, index: usize) -> Self {
        Self {
            kind,
            index,
            fingerprint: String::new(),
        }
    }
}

mod kind_code {
    use serde::de::Error as _;

    use super::*;

    pub fn serialize<S: Serializer>(kind: &NodeKind, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_u8(kind.code())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NodeKind, D::Error> {
        let code = u8::deserialize(de)?;
        NodeKind::from_code(code)
            .ok_or_else(|| D::Error::custom(format!("unknown kind code {code}")))
    }
}

/// A malformed path received over the wire or built by a caller.
#[derive(Debug, thiserror::Error)]
pub enum PathFormatError {
    #[error("path is empty; the root marker is required")]
    Empty,

    #[error("CharIndex point at position {at} is not the path's last element")]
    CharIndexNotTerminal { at: usize },

    #[error("path decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// An ordered, validated sequence of [`SourcePathPoint`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SourcePath(Vec<SourcePathPoint>);

impl SourcePath {
    /// Validates the structural rules: non-empty, and `CharIndex` only as the
    /// terminal element. Positional validity against a tree is the resolver's
    /// business, not a construction concern.
    pub fn new(points: Vec<SourcePathPoint>) -> Result<Self, PathFormatError> {
        if points.is_empty() {
            return Err(PathFormatError::Empty);
        }
        for (at, point) in points.iter().enumerate() {
            if point.kind == NodeKind::CharIndex && at != points.len() - 1 {
                return Err(PathFormatError::CharIndexNotTerminal { at });
            }
        }
        Ok(Self(points))
    }

    pub fn points(&self) -> &[SourcePathPoint] {
        &self.0
    }

    pub fn from_json(raw: &str) -> Result<Self, PathFormatError> {
        let points: Vec<SourcePathPoint> = serde_json::from_str(raw)?;
        Self::new(points)
    }

    pub fn to_json(&self) -> String {
        // Vec<SourcePathPoint> serialization cannot fail
        serde_json::to_string(&self.0).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for SourcePath {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let points = Vec::<SourcePathPoint>::deserialize(de)?;
        Self::new(points).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(kind: NodeKind, index: usize) -> SourcePathPoint {
        SourcePathPoint::new(kind, index)
    }

    #[test]
    fn wire_round_trip() {
        let path = SourcePath::new(vec![
            point(NodeKind::Group, 0),
            point(NodeKind::Text, 2),
            point(NodeKind::CharIndex, 7),
        ])
        .unwrap();

        let json = path.to_json();
        assert!(json.contains("\"kind\":5"), "CharIndex goes out as code 5: {json}");
        let back = SourcePath::from_json(&json).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn fingerprint_is_carried_verbatim() {
        let raw = r#"[{"kind":1,"index":0,"fingerprint":"a1:b2"},{"kind":0,"index":3,"fingerprint":"c3"}]"#;
        let path = SourcePath::from_json(raw).unwrap();
        assert_eq!(path.points()[0].fingerprint, "a1:b2");
        assert_eq!(path.points()[1].fingerprint, "c3");
    }

    #[test]
    fn rejects_unknown_kind_code() {
        let raw = r#"[{"kind":9,"index":0,"fingerprint":""}]"#;
        assert!(matches!(
            SourcePath::from_json(raw),
            Err(PathFormatError::Decode(_))
        ));
    }

    #[test]
    fn rejects_non_terminal_char_index() {
        let err = SourcePath::new(vec![
            point(NodeKind::Group, 0),
            point(NodeKind::CharIndex, 4),
            point(NodeKind::Text, 1),
        ])
        .unwrap_err();
        assert!(matches!(err, PathFormatError::CharIndexNotTerminal { at: 1 }));
    }

    #[test]
    fn rejects_empty_path() {
        assert!(matches!(SourcePath::new(vec![]), Err(PathFormatError::Empty)));
    }
}
