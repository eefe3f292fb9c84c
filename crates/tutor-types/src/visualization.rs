//! Chart-ready payloads the tutor embeds in its replies.
//!
//! The wire form is the JSON object the tutor is instructed to emit:
//! `{"type": "bar", "title": "...", "data": [...]}`. The shape of `data`
//! depends on `type`, so decoding goes through [`RawPayload`] and is
//! validated in one place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::VisualizationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisKind {
    Bar,
    Pie,
    Line,
    Graph,
}

impl VisKind {
    pub fn all() -> &'static [VisKind] {
        &[VisKind::Bar, VisKind::Pie, VisKind::Line, VisKind::Graph]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VisKind::Bar => "bar",
            VisKind::Pie => "pie",
            VisKind::Line => "line",
            VisKind::Graph => "graph",
        }
    }

    /// Kinds whose series is a flat list of named values.
    pub fn uses_points(&self) -> bool {
        !matches!(self, VisKind::Graph)
    }
}

impl fmt::Display for VisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisKind {
    type Err = VisualizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        VisKind::all()
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| VisualizationError::UnknownKind(s.to_string()))
    }
}

/// One bar, slice or line vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub name: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self { name: name.into(), value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub links: Vec<GraphLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    Points(Vec<DataPoint>),
    Graph(GraphData),
}

impl Series {
    pub fn len(&self) -> usize {
        match self {
            Series::Points(points) => points.len(),
            Series::Graph(graph) => graph.nodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> Option<&[DataPoint]> {
        match self {
            Series::Points(points) => Some(points),
            Series::Graph(_) => None,
        }
    }

    pub fn graph(&self) -> Option<&GraphData> {
        match self {
            Series::Graph(graph) => Some(graph),
            Series::Points(_) => None,
        }
    }
}

/// A validated visualization. `series` always matches `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPayload", into = "RawPayload")]
pub struct VisualizationPayload {
    pub kind: VisKind,
    pub title: String,
    pub series: Series,
}

impl VisualizationPayload {
    /// Build a bar, pie or line payload.
    pub fn chart(
        kind: VisKind,
        title: impl Into<String>,
        points: Vec<DataPoint>,
    ) -> Result<Self, VisualizationError> {
        if !kind.uses_points() {
            return Err(VisualizationError::ShapeMismatch {
                kind,
                message: "graph payloads need nodes and links".to_string(),
            });
        }
        Ok(Self {
            kind,
            title: title.into(),
            series: Series::Points(points),
        })
    }

    pub fn graph(title: impl Into<String>, graph: GraphData) -> Self {
        Self {
            kind: VisKind::Graph,
            title: title.into(),
            series: Series::Graph(graph),
        }
    }

    /// Decode the interior of a marker block.
    pub fn parse(json: &str) -> Result<Self, VisualizationError> {
        let raw: RawPayload = serde_json::from_str(json)
            .map_err(|e| VisualizationError::InvalidJson(e.to_string()))?;
        Self::try_from(raw)
    }
}

/// Wire form of a payload before `data` is checked against `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawPayload {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    title: String,
    data: Value,
}

impl TryFrom<RawPayload> for VisualizationPayload {
    type Error = VisualizationError;

    fn try_from(raw: RawPayload) -> Result<Self, Self::Error> {
        let kind: VisKind = raw.kind.parse()?;
        let series = if kind.uses_points() {
            let points: Vec<DataPoint> = serde_json::from_value(raw.data).map_err(|e| {
                VisualizationError::ShapeMismatch {
                    kind,
                    message: e.to_string(),
                }
            })?;
            Series::Points(points)
        } else {
            Series::Graph(parse_graph(raw.data)?)
        };

        Ok(Self {
            kind,
            title: raw.title,
            series,
        })
    }
}

impl From<VisualizationPayload> for RawPayload {
    fn from(payload: VisualizationPayload) -> Self {
        let data = match payload.series {
            Series::Points(points) => serde_json::to_value(points),
            Series::Graph(graph) => serde_json::to_value(graph),
        }
        .unwrap_or(Value::Null);

        Self {
            kind: payload.kind.as_str().to_string(),
            title: payload.title,
            data,
        }
    }
}

fn parse_graph(data: Value) -> Result<GraphData, VisualizationError> {
    let mismatch = |message: String| VisualizationError::ShapeMismatch {
        kind: VisKind::Graph,
        message,
    };

    // Models often wrap the object in a one-element array
    let object = match data {
        Value::Object(_) => data,
        Value::Array(mut items) if items.len() == 1 && items[0].is_object() => items.remove(0),
        other => {
            return Err(mismatch(format!(
                "expected an object with nodes and links, got {}",
                json_type_name(&other)
            )))
        }
    };

    let mut graph: GraphData =
        serde_json::from_value(object).map_err(|e| mismatch(e.to_string()))?;
    for node in &mut graph.nodes {
        if node.label.is_empty() {
            node.label = node.id.clone();
        }
    }
    Ok(graph)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
