//! Deep merge of options trees
//!
//! Chart options are nested JSON objects: per-type defaults on one side,
//! caller overrides on the other. The merge recurses only where both sides
//! are objects; anything else - scalars and arrays alike - is replaced
//! wholesale by the override. Neither input is mutated.
//!
//! An override key holding explicit `null` is handled per [`NullPolicy`]:
//! the default keeps the key in the output with a `null` value so callers
//! can suppress a default the frontend would otherwise apply (e.g. a line
//! chart's fill color); the alternative drops the key from the output
//! entirely.

use serde_json::Value;

/// What an explicit `null` override does to the merged output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullPolicy {
    /// Keep the key, valued `null` - the remote side sees the suppression.
    #[default]
    Preserve,
    /// Remove the key from the output entirely.
    Remove,
}

/// Deep-merge `overrides` over `defaults` with the default null policy.
pub fn merge(defaults: &Value, overrides: &Value) -> Value {
    merge_with(defaults, overrides, NullPolicy::Preserve)
}

/// Deep-merge `overrides` over `defaults`.
///
/// Returns a new tree; both inputs are left untouched. Override values win
/// at every nesting level, and arrays are never merged element-wise.
pub fn merge_with(defaults: &Value, overrides: &Value, policy: NullPolicy) -> Value {
    match (defaults, overrides) {
        (Value::Object(base), Value::Object(over)) => {
            let mut out = base.clone();
            for (key, over_value) in over {
                if over_value.is_null() && policy == NullPolicy::Remove {
                    out.remove(key);
                    continue;
                }
                let merged = match out.get(key) {
                    Some(base_value) if base_value.is_object() && over_value.is_object() => {
                        merge_with(base_value, over_value, policy)
                    }
                    _ => over_value.clone(),
                };
                out.insert(key.clone(), merged);
            }
            Value::Object(out)
        }
        _ => overrides.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_override_is_identity() {
        let defaults = json!({"scales": {"y": {"beginAtZero": true}}, "responsive": true});
        assert_eq!(merge(&defaults, &json!({})), defaults);
    }

    #[test]
    fn test_override_wins_at_every_level() {
        let defaults = json!({
            "plugins": {"legend": {"display": true, "position": "top"}},
            "responsive": true,
        });
        let overrides = json!({"plugins": {"legend": {"position": "bottom"}}});

        let merged = merge(&defaults, &overrides);
        assert_eq!(merged["plugins"]["legend"]["position"], "bottom");
        // Sibling keys survive at both levels
        assert_eq!(merged["plugins"]["legend"]["display"], true);
        assert_eq!(merged["responsive"], true);
    }

    #[test]
    fn test_arrays_replace_wholesale() {
        let defaults = json!({"ticks": [0, 10, 20, 30]});
        let overrides = json!({"ticks": [0, 50]});
        assert_eq!(merge(&defaults, &overrides)["ticks"], json!([0, 50]));
    }

    #[test]
    fn test_scalar_replaces_object() {
        let defaults = json!({"legend": {"display": true}});
        let overrides = json!({"legend": false});
        assert_eq!(merge(&defaults, &overrides)["legend"], json!(false));
    }

    #[test]
    fn test_null_override_occupies_key_by_default() {
        let defaults = json!({"elements": {"line": {"backgroundColor": "#4e79a7"}}});
        let overrides = json!({"elements": {"line": {"backgroundColor": null}}});

        let merged = merge(&defaults, &overrides);
        let line = merged["elements"]["line"].as_object().unwrap();
        assert!(line.contains_key("backgroundColor"));
        assert!(line["backgroundColor"].is_null());
    }

    #[test]
    fn test_null_override_removes_key_when_asked() {
        let defaults = json!({"elements": {"line": {"backgroundColor": "#4e79a7", "tension": 0.25}}});
        let overrides = json!({"elements": {"line": {"backgroundColor": null}}});

        let merged = merge_with(&defaults, &overrides, NullPolicy::Remove);
        let line = merged["elements"]["line"].as_object().unwrap();
        assert!(!line.contains_key("backgroundColor"));
        assert_eq!(line["tension"], 0.25);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let defaults = json!({"a": {"b": 1}});
        let overrides = json!({"a": {"c": 2}});
        let before_defaults = defaults.clone();
        let before_overrides = overrides.clone();

        let _ = merge(&defaults, &overrides);
        assert_eq!(defaults, before_defaults);
        assert_eq!(overrides, before_overrides);
    }

    #[test]
    fn test_sequential_merges_innermost_wins() {
        // Not associative in general: when overrides touch the same key,
        // the later merge wins, and collapsing the overrides first must
        // agree with applying them in sequence.
        let defaults = json!({"scales": {"y": {"min": 0, "max": 100}}});
        let first = json!({"scales": {"y": {"max": 50}}});
        let second = json!({"scales": {"y": {"max": 75, "min": 10}}});

        let sequential = merge(&merge(&defaults, &first), &second);
        assert_eq!(sequential["scales"]["y"]["max"], 75);
        assert_eq!(sequential["scales"]["y"]["min"], 10);

        // Disjoint overrides commute with pre-merging
        let o1 = json!({"scales": {"x": {"display": false}}});
        let o2 = json!({"plugins": {"legend": {"display": false}}});
        let combined = merge(&o1, &o2);
        assert_eq!(
            merge(&merge(&defaults, &o1), &o2),
            merge(&defaults, &combined)
        );
    }
}
