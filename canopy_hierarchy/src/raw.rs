// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serde mirror of the nested input object.

use indexmap::IndexMap;
use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

/// One node of the raw nested input, as supplied by the host page.
///
/// Every field is optional and `null` is treated as absent. Unknown fields are
/// ignored. Maps keep document order, which becomes child and metric order.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawNode {
    /// Feature this node splits on.
    #[serde(default)]
    pub feature: Option<String>,
    /// Class label of an outcome node.
    #[serde(default, deserialize_with = "scalar_string")]
    pub label: Option<String>,
    /// Type tag; `"leaf"` marks an outcome node.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Entropy at this node.
    #[serde(default)]
    pub entropy: Option<f64>,
    /// Most frequent class at this node.
    #[serde(default, deserialize_with = "scalar_string")]
    pub majority_class: Option<String>,
    /// Children keyed by the label of the edge leading to them. A `null`
    /// child is skipped.
    #[serde(default)]
    pub children: Option<IndexMap<String, Option<RawNode>>>,
    /// Gain of every candidate feature at this node.
    #[serde(default)]
    pub all_gains: Option<IndexMap<String, f64>>,
    /// Gain of the chosen split.
    #[serde(default)]
    pub gain: Option<f64>,
    /// Sample count per class.
    #[serde(default)]
    pub class_distribution: Option<IndexMap<String, f64>>,
}

impl RawNode {
    /// Creates an outcome node with the given majority class.
    pub fn leaf(majority_class: impl Into<String>) -> Self {
        Self {
            kind: Some("leaf".into()),
            majority_class: Some(majority_class.into()),
            ..Self::default()
        }
    }

    /// Creates a split node on `feature` with the given labelled children.
    pub fn split<I, K>(feature: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = (K, Self)>,
        K: Into<String>,
    {
        Self {
            feature: Some(feature.into()),
            kind: Some("node".into()),
            children: Some(
                children
                    .into_iter()
                    .map(|(k, v)| (k.into(), Some(v)))
                    .collect(),
            ),
            ..Self::default()
        }
    }
}

/// Class labels come from arbitrary dataframe columns, so accept any scalar.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format_args!(
            "expected a scalar label, found {other}"
        ))),
    }
}
