//! Sample widget service shared by the unit tests.

#![allow(clippy::expect_used)]

use httpgen_model::ServiceDocument;

const WIDGETS: &str = include_str!("../../../model/tests/fixtures/widgets.json");

pub fn widget_document() -> ServiceDocument {
    serde_json::from_str(WIDGETS).expect("widget fixture parses")
}
