//! Generation entry point and artifact assembly.

use std::collections::BTreeSet;

use httpgen_model::{HttpServiceBinding, ServiceDefinition};
use tracing::debug;

use super::client::emit_client;
use super::codec::Helper;
use super::emit::Emit;
use super::interfaces::emit_interfaces;
use super::normalize::normalize_service;
use super::section::{Section, TypeName, TypeNameKind};
use super::server::emit_server;
use super::types::TsImport;
use super::utils::{string_literal, uncapitalize_first};
use super::writer::CodeWriter;
use crate::error::GenerateError;
use crate::options::GeneratorOptions;

/// A named text artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name relative to the output directory.
    pub name: String,
    /// Complete file content.
    pub content: String,
}

/// Generate every artifact for a service.
///
/// Produces, in order: the types artifact (typed dialect only), the client,
/// and the server scaffold when enabled; or one merged artifact in
/// single-file mode. Binding-contract violations abort generation.
pub fn generate(
    service: &ServiceDefinition,
    http: &HttpServiceBinding,
    options: &GeneratorOptions,
) -> Result<Vec<GeneratedFile>, GenerateError> {
    debug!(
        service = %service.name,
        dialect = ?options.dialect,
        server = options.server,
        "generating"
    );
    let ir = normalize_service(service, http)?;

    let module = options
        .module_name
        .clone()
        .unwrap_or_else(|| uncapitalize_first(&service.name));
    let extension = options.dialect.extension();

    let types = options.dialect.is_typed().then(|| emit_interfaces(&ir, options));
    let client = emit_client(&ir, options);
    let server = options.server.then(|| emit_server(&ir, options));

    let files = if options.single_file {
        let sections: Vec<_> = types.into_iter().chain([client]).chain(server).collect();
        vec![GeneratedFile {
            name: format!("{module}.{extension}"),
            content: assemble(options, sections, None),
        }]
    } else {
        let types_module = format!("./{module}Types");
        let mut files = Vec::new();
        let exports = match types {
            Some(types) => {
                let exports = types.exports.clone();
                files.push(GeneratedFile {
                    name: format!("{module}Types.ts"),
                    content: assemble(options, vec![types], None),
                });
                exports
            }
            None => Vec::new(),
        };
        files.push(GeneratedFile {
            name: format!("{module}Client.{extension}"),
            content: assemble(
                options,
                vec![client],
                Some(LocalTypes {
                    module: &types_module,
                    reexports: &exports,
                }),
            ),
        });
        if let Some(server) = server {
            files.push(GeneratedFile {
                name: format!("{module}Server.{extension}"),
                content: assemble(
                    options,
                    vec![server],
                    Some(LocalTypes {
                        module: &types_module,
                        reexports: &[],
                    }),
                ),
            });
        }
        files
    };

    for file in &files {
        debug!(name = %file.name, bytes = file.content.len(), "generated artifact");
    }
    debug!(service = %service.name, artifacts = files.len(), "generation complete");
    Ok(files)
}

/// Where the sections of an artifact find the declarations of the types
/// artifact, and which of them the artifact re-exports.
struct LocalTypes<'a> {
    module: &'a str,
    reexports: &'a [TypeName],
}

fn assemble(
    options: &GeneratorOptions,
    sections: Vec<Section>,
    local: Option<LocalTypes<'_>>,
) -> String {
    let typed = options.dialect.is_typed();
    let mut w = CodeWriter::new();
    w.line(format!("// DO NOT EDIT: generated by {}", options.generator_name));
    if options.disable_eslint {
        w.line("/* eslint-disable */");
    }
    if !typed {
        w.line("'use strict';");
    }

    let imports = TsImport::merge(sections.iter().flat_map(|s| s.imports.iter().cloned()));
    let local_types: BTreeSet<&str> = sections
        .iter()
        .flat_map(|s| s.local_types.iter().map(String::as_str))
        .collect();
    let helpers: BTreeSet<Helper> = sections
        .iter()
        .flat_map(|s| s.helpers.iter().copied())
        .collect();

    let mut declarations = Vec::new();
    declarations.extend(imports.iter().map(Emit::emit));
    if let (true, Some(local)) = (typed, &local) {
        if !local_types.is_empty() {
            let names: Vec<_> = local_types.iter().copied().collect();
            declarations.push(TsImport::types(local.module, &names).emit());
        }
        let reexport = |kind: TypeNameKind| {
            local
                .reexports
                .iter()
                .filter(|t| t.kind == kind)
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>()
        };
        let module = string_literal(local.module);
        let interfaces = reexport(TypeNameKind::Interface);
        if !interfaces.is_empty() {
            declarations.push(format!(
                "export type {{ {} }} from {module};",
                interfaces.join(", ")
            ));
        }
        let enums = reexport(TypeNameKind::Enum);
        if !enums.is_empty() {
            declarations.push(format!("export {{ {} }} from {module};", enums.join(", ")));
        }
    }
    if !declarations.is_empty() {
        w.blank();
        for declaration in declarations {
            w.line(declaration);
        }
    }

    for section in sections {
        w.blank();
        w.append(section.code);
    }

    for helper in helpers {
        w.blank();
        w.lines(helper.source(options.dialect));
    }

    w.finish(options.newline)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::codegen::fixtures::widget_document;
    use crate::options::{Dialect, Newline};

    fn generated(options: &GeneratorOptions) -> Vec<GeneratedFile> {
        let document = widget_document();
        generate(&document.service, &document.http, options).unwrap()
    }

    fn names(files: &[GeneratedFile]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_typescript_artifacts() {
        let files = generated(&GeneratorOptions::default());
        assert_eq!(names(&files), ["exampleApiTypes.ts", "exampleApiClient.ts"]);
        assert!(files[0].content.starts_with(
            "// DO NOT EDIT: generated by httpgen\n/* eslint-disable */\n\nimport type { IServiceResult, IServiceError } from 'facility-core';\n\n/** Example widget service. */\nexport interface IExampleApi {\n"
        ));
    }

    #[test]
    fn test_client_imports_and_reexports() {
        let files = generated(&GeneratorOptions::default());
        let client = &files[1].content;
        assert!(client.starts_with(
            "// DO NOT EDIT: generated by httpgen\n/* eslint-disable */\n\nimport { HttpClientUtility } from 'facility-core';\nimport type { IHttpClientOptions, IServiceResult } from 'facility-core';\nimport type { ICreateWidgetRequest, ICreateWidgetResponse, "
        ));
        assert!(client.contains(", INotifyResponse } from './exampleApiTypes';\nexport type { "));
        assert!(client.contains(
            "export type { IExampleApi, IGetWidgetsRequest, IGetWidgetsResponse, "
        ));
        assert!(client.contains(
            ", IWidget } from './exampleApiTypes';\nexport { WidgetKind, Color } from './exampleApiTypes';\n\n/** Example widget service. */\n"
        ));
        assert!(client.ends_with("\treturn undefined;\n}\n"));
    }

    #[test]
    fn test_server_artifact() {
        let options = GeneratorOptions {
            server: true,
            ..GeneratorOptions::default()
        };
        let files = generated(&options);
        assert_eq!(
            names(&files),
            ["exampleApiTypes.ts", "exampleApiClient.ts", "exampleApiServer.ts"]
        );
        let server = &files[2].content;
        assert!(server.contains(
            "\nimport express from 'express';\nimport type { ICreateWidgetRequest, IDeleteWidgetRequest, "
        ));
        assert!(server.contains(
            ", WidgetKind } from './exampleApiTypes';\n\nconst standardErrorCodes"
        ));
        assert!(!server.contains("export type {"));
        assert!(server.contains(
            "function parseBoolean(value: string | undefined): boolean | undefined {"
        ));
    }

    #[test]
    fn test_javascript_artifacts() {
        let options = GeneratorOptions {
            dialect: Dialect::JavaScript,
            server: true,
            disable_eslint: false,
            ..GeneratorOptions::default()
        };
        let files = generated(&options);
        assert_eq!(names(&files), ["exampleApiClient.js", "exampleApiServer.js"]);
        assert!(files[0].content.starts_with(
            "// DO NOT EDIT: generated by httpgen\n'use strict';\n\nimport { HttpClientUtility } from 'facility-core';\n\n"
        ));
        assert!(!files[0].content.contains("exampleApiTypes"));
        assert!(files[1].content.contains("function parseBoolean(value) {"));
    }

    #[test]
    fn test_single_file() {
        let options = GeneratorOptions {
            single_file: true,
            server: true,
            module_name: Some("widgets".into()),
            ..GeneratorOptions::default()
        };
        let files = generated(&options);
        assert_eq!(names(&files), ["widgets.ts"]);
        let content = &files[0].content;
        assert!(!content.contains("./widgetsTypes"));
        assert!(content.contains(
            "import type { IServiceResult, IServiceError, IHttpClientOptions } from 'facility-core';"
        ));
        assert_eq!(content.matches("function parseBoolean(").count(), 1);
        let types = content.find("export interface IExampleApi {").unwrap();
        let client = content.find("export function createHttpClient(").unwrap();
        let server = content.find("export function createApp(").unwrap();
        assert!(types < client && client < server);
    }

    #[test]
    fn test_crlf() {
        let options = GeneratorOptions {
            newline: Newline::CrLf,
            ..GeneratorOptions::default()
        };
        for file in generated(&options) {
            assert!(file.content.ends_with("}\r\n"));
            assert!(!file.content.replace("\r\n", "").contains('\n'));
        }
    }

    #[test]
    fn test_errors_abort_generation() {
        let mut document = widget_document();
        document.http.methods[1].path = "/widgets/{widgetId}".into();
        let err = generate(&document.service, &document.http, &GeneratorOptions::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "path '/widgets/{widgetId}' of method 'getWidget' has placeholder '{widgetId}' with no path field"
        );
    }
}
