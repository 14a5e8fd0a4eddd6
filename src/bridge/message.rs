//! Typed messages crossing the rendering boundary
//!
//! Outbound updates are addressed by the opaque instance id of an already
//! rendered chart; the remote side applies them to the live instance.
//! Inbound interaction events arrive as [`ClickEvent`] records rather than
//! ad hoc maps.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chart::{ChartData, ColumnRoles};

/// An outbound update for a rendered chart instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum UpdateMessage {
    /// Replace the instance's data block wholesale. Carries the refreshed
    /// column-role mapping so the remote side can round-trip it; options
    /// are never part of a data update.
    UpdateData {
        id: String,
        data: ChartData,
        meta: ColumnRoles,
    },
    /// Apply an options delta to the live instance.
    UpdateOptions { id: String, options: Value },
    /// Append a caller-supplied dataset as-is.
    AddDataset { id: String, dataset: Value },
    /// Remove the dataset at `index`. An out-of-range index is ignored by
    /// the remote side rather than reported here.
    RemoveDataset { id: String, index: usize },
}

impl UpdateMessage {
    /// The chart instance this message addresses.
    pub fn instance_id(&self) -> &str {
        match self {
            Self::UpdateData { id, .. }
            | Self::UpdateOptions { id, .. }
            | Self::AddDataset { id, .. }
            | Self::RemoveDataset { id, .. } => id,
        }
    }
}

/// A click on a rendered chart, reported back by the remote side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    /// Which dataset the clicked element belongs to.
    pub dataset_index: usize,
    /// Element index within the dataset.
    pub index: usize,
    /// The clicked value: a number for category/segment charts, a point
    /// object for the point family.
    pub value: Value,
    /// The category label under the click, when the chart has labels.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Dataset, SeriesData};
    use serde_json::json;

    #[test]
    fn test_update_data_wire_shape() {
        let message = UpdateMessage::UpdateData {
            id: "abc123".to_string(),
            data: ChartData {
                labels: Some(vec!["a".to_string()]),
                datasets: vec![Dataset::new("v", SeriesData::Numbers(vec![1.0]))],
            },
            meta: ColumnRoles {
                label: Some("k".to_string()),
                values: vec!["v".to_string()],
                radius: None,
                group: None,
            },
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["kind"], "update-data");
        assert_eq!(value["id"], "abc123");
        assert_eq!(value["data"]["labels"], json!(["a"]));
        assert_eq!(value["meta"]["values"], json!(["v"]));
        assert!(value.get("options").is_none());
    }

    #[test]
    fn test_message_kind_tags() {
        let options = UpdateMessage::UpdateOptions {
            id: "x".to_string(),
            options: json!({}),
        };
        assert_eq!(serde_json::to_value(&options).unwrap()["kind"], "update-options");

        let add = UpdateMessage::AddDataset {
            id: "x".to_string(),
            dataset: json!({"label": "extra", "data": [1, 2]}),
        };
        assert_eq!(serde_json::to_value(&add).unwrap()["kind"], "add-dataset");

        let remove = UpdateMessage::RemoveDataset {
            id: "x".to_string(),
            index: 2,
        };
        let value = serde_json::to_value(&remove).unwrap();
        assert_eq!(value["kind"], "remove-dataset");
        assert_eq!(value["index"], 2);
    }

    #[test]
    fn test_click_event_from_remote_json() {
        let event: ClickEvent = serde_json::from_value(json!({
            "datasetIndex": 1,
            "index": 3,
            "value": 42.5,
            "label": "Q3"
        }))
        .unwrap();
        assert_eq!(event.dataset_index, 1);
        assert_eq!(event.index, 3);
        assert_eq!(event.value, json!(42.5));
        assert_eq!(event.label.as_deref(), Some("Q3"));
    }

    #[test]
    fn test_click_event_label_optional() {
        let event: ClickEvent = serde_json::from_value(json!({
            "datasetIndex": 0,
            "index": 0,
            "value": {"x": 1.0, "y": 2.0}
        }))
        .unwrap();
        assert!(event.label.is_none());
    }
}
