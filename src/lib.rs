pub mod cli;
pub mod config;
pub mod dmmf;
pub mod error;
pub mod ir;
pub mod layout;
pub mod measure;
pub mod transform;

use wasm_bindgen::prelude::*;

use config::GraphConfig;
use dmmf::Datamodel;
use error::Error;
use layout::{LayoutHint, LayoutRequest};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Datamodel JSON (plus optional layout result JSON) to graph JSON.
pub fn datamodel_to_graph(
    datamodel: &str,
    layout: Option<&str>,
    config: &GraphConfig,
) -> Result<String, Error> {
    let datamodel = Datamodel::from_json(datamodel)?;
    let layout = layout.map(LayoutHint::from_json).transpose()?;
    let graph = transform::transform(&datamodel, layout.as_ref(), config)?;
    Ok(graph.to_json()?)
}

/// Datamodel JSON to the layout engine's input graph JSON.
pub fn datamodel_to_layout_request(datamodel: &str, config: &GraphConfig) -> Result<String, Error> {
    let datamodel = Datamodel::from_json(datamodel)?;
    let graph = transform::transform(&datamodel, None, config)?;
    Ok(LayoutRequest::from_graph(&graph, config).to_json()?)
}

#[wasm_bindgen(js_name = "dmmfToElements")]
pub fn dmmf_to_elements(datamodel: &str, layout: Option<String>) -> Result<String, String> {
    datamodel_to_graph(datamodel, layout.as_deref(), &GraphConfig::default())
        .map_err(|e| e.to_string())
}

#[wasm_bindgen(js_name = "layoutRequest")]
pub fn layout_request(datamodel: &str) -> Result<String, String> {
    datamodel_to_layout_request(datamodel, &GraphConfig::default()).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn order_datamodel() -> String {
        json!({
            "models": [{ "name": "Order", "fields": [
                { "name": "id", "kind": "scalar", "type": "Int", "isId": true, "isRequired": true },
                { "name": "status", "kind": "enum", "type": "Status", "isRequired": true }
            ]}],
            "enums": [{ "name": "Status", "values": [{ "name": "OPEN" }] }]
        })
        .to_string()
    }

    #[test]
    fn test_dmmf_to_elements() {
        let out = dmmf_to_elements(&order_datamodel(), None).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["nodes"][0]["id"], json!("Status"));
        assert_eq!(value["nodes"][1]["position"], json!({ "x": 250.0, "y": 25.0 }));
        assert_eq!(value["edges"][0]["id"], json!("eOrder-status-Status"));
        assert_eq!(value["edges"][0]["source"], json!("Status"));
        assert_eq!(value["edges"][0]["target"], json!("Order"));
    }

    #[test]
    fn test_dmmf_to_elements_with_layout() {
        let layout = json!({ "children": [{ "id": "Order", "x": 5, "y": 6 }] }).to_string();
        let out = dmmf_to_elements(&order_datamodel(), Some(layout)).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["nodes"][1]["position"], json!({ "x": 5.0, "y": 6.0 }));
    }

    #[test]
    fn test_invalid_json() {
        let err = dmmf_to_elements("{", None).unwrap_err();
        assert!(err.starts_with("JSON error"));
    }

    #[test]
    fn test_malformed_relation_message() {
        let input = json!({
            "models": [{ "name": "User", "fields": [
                { "name": "posts", "kind": "object", "type": "Post", "isList": true, "relationName": "UserPosts" }
            ]}]
        })
        .to_string();

        let err = dmmf_to_elements(&input, None).unwrap_err();
        assert_eq!(err, "Relation `UserPosts` has 1 field(s), expected exactly 2");
    }

    #[test]
    fn test_layout_request() {
        let out = layout_request(&order_datamodel()).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["id"], json!("root"));
        assert_eq!(value["children"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["edges"][0]["sources"], json!(["Status"]));
    }
}
