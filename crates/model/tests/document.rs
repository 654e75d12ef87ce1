//! Loading and checking service documents.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use httpgen_model::{
    Direction, EnumType, HttpNormalField, HttpVerb, ModelError, ResponseShape, ServiceDocument,
    TypeRef,
};

const WIDGETS: &str = include_str!("fixtures/widgets.json");

fn load() -> ServiceDocument {
    serde_json::from_str(WIDGETS).expect("fixture parses")
}

fn enum_named<'a>(document: &'a ServiceDocument, name: &str) -> &'a EnumType {
    document.service.enums.iter().find(|e| e.name == name).unwrap()
}

#[test]
fn widget_document_loads_and_checks() {
    let document = load();
    assert_eq!(document.service.name, "ExampleApi");
    assert_eq!(document.http.url.as_deref(), Some("https://example.com/api"));
    assert_eq!(document.service.methods.len(), document.http.methods.len());
    document.check().unwrap();
}

#[test]
fn widget_document_bindings() {
    let document = load();

    let delete = document.http.find_method("deleteWidget").unwrap();
    assert_eq!(delete.verb, HttpVerb::Delete);
    assert_eq!(delete.valid_responses[0].shape(), ResponseShape::Empty);

    let get = document.http.find_method("getWidget").unwrap();
    assert_eq!(get.request_header_fields[0].name, "If-None-Match");
    let not_modified = get.valid_responses[1].shape();
    assert!(matches!(not_modified, ResponseShape::Body(f) if f.field == "notModified"));

    let batch = document.service.find_method("getWidgetBatch").unwrap();
    assert_eq!(
        batch.response_field("results").unwrap().ty,
        TypeRef::array(TypeRef::result(TypeRef::dto("Widget")))
    );
}

#[test]
fn widget_document_docs() {
    let document = load();
    let color = enum_named(&document, "Color");
    assert!(color.docs.obsolete);
    assert!(color.values.iter().all(|v| !v.docs.obsolete));

    let kind = enum_named(&document, "WidgetKind");
    assert_eq!(kind.values[2].docs.obsolete_message.as_deref(), Some("Use large."));

    assert!(document.service.find_method("notify").unwrap().docs.obsolete);
}

#[test]
fn check_reports_unknown_method() {
    let mut document = load();
    document.http.methods[0].name = "getGadgets".into();
    assert_eq!(
        document.check(),
        Err(ModelError::UnknownMethod("getGadgets".into()))
    );
}

#[test]
fn check_reports_unknown_request_field() {
    let mut document = load();
    let notify = document
        .http
        .methods
        .iter_mut()
        .find(|m| m.name == "notify")
        .unwrap();
    notify.request_normal_fields.push(HttpNormalField::new("priority"));
    assert_eq!(
        document.check(),
        Err(ModelError::UnknownField {
            method: "notify".into(),
            field: "priority".into(),
            direction: Direction::Request,
        })
    );
}

#[test]
fn document_without_http_section() {
    let json = r#"{ "service": { "name": "EmptyApi" } }"#;
    let document: ServiceDocument = serde_json::from_str(json).unwrap();
    assert!(document.http.methods.is_empty());
    document.check().unwrap();
}
