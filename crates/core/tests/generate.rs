//! End-to-end generation of the widget service.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use httpgen_core::{Dialect, GenerateError, GeneratedFile, GeneratorOptions, Slot, generate};
use httpgen_model::{
    Field, HttpMethodBinding, HttpPathField, HttpQueryField, HttpValidResponse, HttpVerb,
    ModelError, ServiceDocument, TypeRef,
};

fn document() -> ServiceDocument {
    serde_json::from_str(include_str!("../../model/tests/fixtures/widgets.json"))
        .expect("widget fixture parses")
}

fn run(document: &ServiceDocument, options: &GeneratorOptions) -> Vec<GeneratedFile> {
    generate(&document.service, &document.http, options).unwrap()
}

fn file<'a>(files: &'a [GeneratedFile], name: &str) -> &'a str {
    &files
        .iter()
        .find(|f| f.name == name)
        .expect("artifact exists")
        .content
}

#[test]
fn test_options_from_toml_drive_generation() {
    let options = GeneratorOptions::from_toml_str(
        r#"
        module-name = "widgetApi"
        dialect = "javascript"
        server = true
        disable-eslint = false
        "#,
    )
    .unwrap();
    let files = run(&document(), &options);
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["widgetApiClient.js", "widgetApiServer.js"]);
    for file in &files {
        assert!(file.content.starts_with("// DO NOT EDIT: generated by httpgen\n'use strict';\n"));
        assert!(!file.content.contains("eslint-disable"));
    }
}

#[test]
fn test_empty_response_round_trip() {
    let files = run(&document(), &GeneratorOptions::default());
    let client = file(&files, "exampleApiClient.ts");
    assert!(client.contains(
        "\tpublic deleteWidget(request: IDeleteWidgetRequest, context?: unknown): Promise<IServiceResult<IDeleteWidgetResponse>> {\n"
    ));
    assert!(client.contains("\t\t\tmethod: 'DELETE',\n"));
    assert!(client.contains("\t\t\t\tvalue = {};\n"));

    let options = GeneratorOptions {
        server: true,
        ..GeneratorOptions::default()
    };
    let files = run(&document(), &options);
    let server = file(&files, "exampleApiServer.ts");
    assert!(server.contains("\tapp.delete('/widgets/:id', function (req, res, next) {\n"));
    assert!(server.contains("\t\t\t\tres.sendStatus(204);\n"));
}

#[test]
fn test_body_and_flag_responses() {
    let files = run(&document(), &GeneratorOptions::default());
    let client = file(&files, "exampleApiClient.ts");
    assert!(client.contains("\t\t\t\tvalue = { widget: result.json } as IGetWidgetResponse;\n"));
    assert!(client.contains(
        "\t\t\t} else if (status === 304) {\n\t\t\t\tvalue = { notModified: true };\n"
    ));

    let types = file(&files, "exampleApiTypes.ts");
    assert!(types.contains(
        "export interface IGetWidgetResponse {\n\twidget?: IWidget;\n\n\teTag?: string;\n\n\tnotModified?: boolean;\n}\n"
    ));
}

#[test]
fn test_methods_without_bindings_are_skipped() {
    let mut document = document();
    document.http.methods.retain(|m| m.name != "notify");
    let files = run(&document, &GeneratorOptions::default());
    let client = file(&files, "exampleApiClient.ts");
    assert!(!client.contains("notify"));
    assert!(!client.contains("parseBoolean"));
    assert!(!file(&files, "exampleApiTypes.ts").contains("INotifyRequest"));
}

#[test]
fn test_binding_without_url_defaults_base_uri() {
    let mut document = document();
    document.http.url = None;
    let files = run(&document, &GeneratorOptions::default());
    assert!(file(&files, "exampleApiClient.ts").contains("\t\t\tbaseUri = '/';\n"));
}

#[test]
fn test_composite_kind_in_slot_is_rejected() {
    let mut document = document();
    document.http.methods[0].query_fields.push(HttpQueryField {
        field: "tags".into(),
        name: "tags".into(),
    });
    let getter = document.service.methods.first_mut().unwrap();
    getter
        .request_fields
        .push(Field::new("tags", TypeRef::array(TypeRef::String)));

    let err = generate(&document.service, &document.http, &GeneratorOptions::default())
        .unwrap_err();
    assert!(matches!(
        &err,
        GenerateError::Slot { method, field, slot: Slot::Query, .. }
            if method == "getWidgets" && field == "tags"
    ));
    assert_eq!(
        err.to_string(),
        "field 'tags' of method 'getWidgets' cannot be carried in the query string: array values cannot be carried in a URI or header slot"
    );
}

#[test]
fn test_unknown_method_binding_is_rejected() {
    let mut document = document();
    document.http.methods.push(HttpMethodBinding {
        name: "getGadget".into(),
        verb: HttpVerb::Get,
        path: "/gadgets/{id}".into(),
        path_fields: vec![HttpPathField { field: "id".into() }],
        query_fields: Vec::new(),
        request_header_fields: Vec::new(),
        request_body_field: None,
        request_normal_fields: Vec::new(),
        response_header_fields: Vec::new(),
        valid_responses: vec![HttpValidResponse {
            status_code: 200,
            body_field: None,
            normal_fields: None,
        }],
    });

    let err = generate(&document.service, &document.http, &GeneratorOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Model(ModelError::UnknownMethod(ref name)) if name == "getGadget"
    ));
}

#[test]
fn test_dialects_share_structure() {
    let typescript = run(&document(), &GeneratorOptions::default());
    let javascript = run(
        &document(),
        &GeneratorOptions {
            dialect: Dialect::JavaScript,
            ..GeneratorOptions::default()
        },
    );
    let ts_client = file(&typescript, "exampleApiClient.ts");
    let js_client = file(&javascript, "exampleApiClient.js");
    for needle in [
        "class ExampleApiHttpClient",
        "\t\tconst uriPartId = request.id != null && encodeURIComponent(request.id);\n",
        "\t\tconst uri = `widgets/${uriPartId}`;\n",
        "\t\treturn fetchResponse(",
    ] {
        assert!(ts_client.contains(needle), "typescript client lacks {needle:?}");
        assert!(js_client.contains(needle), "javascript client lacks {needle:?}");
    }
}
