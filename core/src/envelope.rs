//! Response envelope unwrapping.
//!
//! The backend has shipped list payloads in several shapes over time. Each
//! shape is one entry in [`LIST_ENVELOPES`]; they are tried in order and the
//! first match wins. A body matching none of them is an empty list.

use serde_json::Value;

/// One known list envelope: a name for logging and the extractor that pulls
/// the record array out of a response body.
pub struct Envelope {
    pub name: &'static str,
    pub extract: fn(&Value) -> Option<&Vec<Value>>,
}

pub static LIST_ENVELOPES: &[Envelope] = &[
    Envelope {
        name: "array",
        extract: Value::as_array,
    },
    Envelope {
        name: "data",
        extract: data_array,
    },
    Envelope {
        name: "posts",
        extract: posts_array,
    },
    Envelope {
        name: "items",
        extract: items_array,
    },
];

fn data_array(body: &Value) -> Option<&Vec<Value>> {
    body.get("data")?.as_array()
}

fn posts_array(body: &Value) -> Option<&Vec<Value>> {
    body.get("posts")?.as_array()
}

fn items_array(body: &Value) -> Option<&Vec<Value>> {
    body.get("items")?.as_array()
}

/// Records carried by a list response, with the name of the envelope that
/// matched (`None` when nothing did and the list is empty).
pub fn unwrap_records(body: &Value) -> (Option<&'static str>, &[Value]) {
    LIST_ENVELOPES
        .iter()
        .find_map(|envelope| {
            (envelope.extract)(body).map(|records| (Some(envelope.name), records.as_slice()))
        })
        .unwrap_or((None, &[][..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array() {
        let body = json!([{"id": 1}, {"id": 2}]);
        let (name, records) = unwrap_records(&body);
        assert_eq!(name, Some("array"));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn named_arrays_in_priority_order() {
        let body = json!({"posts": [{"id": 1}], "items": [{"id": 2}, {"id": 3}]});
        let (name, records) = unwrap_records(&body);
        assert_eq!(name, Some("posts"));
        assert_eq!(records, &[json!({"id": 1})]);

        let body = json!({"data": [], "posts": [{"id": 1}]});
        let (name, records) = unwrap_records(&body);
        assert_eq!(name, Some("data"));
        assert!(records.is_empty());
    }

    #[test]
    fn non_array_field_falls_through() {
        let body = json!({"data": {"total": 3}, "items": [{"id": 9}]});
        let (name, records) = unwrap_records(&body);
        assert_eq!(name, Some("items"));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn unknown_shape_is_empty() {
        for body in [json!({"results": [1]}), json!(null), json!("text"), json!(5)] {
            let (name, records) = unwrap_records(&body);
            assert_eq!(name, None);
            assert!(records.is_empty());
        }
    }

    #[test]
    fn items_and_bare_array_agree() {
        let records = json!([{"id": 1, "title": "A"}, {"id": 2, "title": "B"}]);
        let wrapped = json!({ "items": records.clone() });
        assert_eq!(unwrap_records(&records).1, unwrap_records(&wrapped).1);
    }
}
