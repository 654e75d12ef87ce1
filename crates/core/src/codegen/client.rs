//! HTTP client emission.
//!
//! One client class per service, constructed by `createHttpClient` from an
//! injected fetch function. Each method validates its path fields, builds
//! the URI, query, body and headers, dispatches once, and decodes the
//! response by walking the valid responses in declaration order.

use tracing::trace;

use super::api::{MethodIR, RequestBodyIR, ResponseBodyIR, ServiceIR, UrlPart};
use super::docs::DocComment;
use super::section::Section;
use super::types::{SERVICE_RESULT, TsImport};
use super::utils::{
    escape_template, format_param_access, pascal_identifier, quote_if_needed, string_literal,
};
use super::writer::CodeWriter;
use crate::options::GeneratorOptions;

const CLIENT_UTILITY: &str = "HttpClientUtility";
const CLIENT_OPTIONS: &str = "IHttpClientOptions";

/// Emit the client factory and class.
pub fn emit_client(ir: &ServiceIR<'_>, options: &GeneratorOptions) -> Section {
    let mut emitter = ClientEmitter {
        options,
        typed: options.dialect.is_typed(),
        section: Section::default(),
    };
    let mut w = CodeWriter::new();
    emitter.write_factory(&mut w, ir);
    w.blank();
    emitter.write_utility_bindings(&mut w, ir);
    w.blank();
    emitter.write_class(&mut w, ir);

    let mut section = emitter.section;
    section
        .imports
        .insert(0, TsImport::values(options.runtime_package.as_str(), &[CLIENT_UTILITY]));
    if emitter.typed {
        section.imports.push(TsImport::types(
            options.runtime_package.as_str(),
            &[CLIENT_OPTIONS, SERVICE_RESULT],
        ));
    }
    section.code = w;
    section
}

struct ClientEmitter<'o> {
    options: &'o GeneratorOptions,
    typed: bool,
    section: Section,
}

impl ClientEmitter<'_> {
    /// `ts` in typed mode, `js` otherwise.
    fn pick<'s>(&self, ts: &'s str, js: &'s str) -> &'s str {
        if self.typed { ts } else { js }
    }

    fn write_factory(&mut self, w: &mut CodeWriter, ir: &ServiceIR<'_>) {
        let interface_name = ir.interface_name();
        let class_name = ir.client_class_name();
        let fallback = format!("Provides access to {} over HTTP via fetch.", ir.name());
        DocComment::from_docs_or(&ir.service.docs, &fallback).write(w);
        let open = if self.typed {
            self.section.use_type(interface_name.as_str());
            format!(
                "export function createHttpClient({{ fetch, baseUri }}: {CLIENT_OPTIONS}): {interface_name} {{"
            )
        } else {
            "export function createHttpClient({ fetch, baseUri }) {".to_string()
        };
        w.block(open, "}", |w| {
            w.line(format!("return new {class_name}(fetch, baseUri);"));
        });
    }

    fn write_utility_bindings(&self, w: &mut CodeWriter, ir: &ServiceIR<'_>) {
        let mut functions = vec!["fetchResponse", "createResponseError"];
        let validates = ir.methods.iter().any(|m| {
            !m.path_fields.is_empty()
                || matches!(m.request_body, RequestBodyIR::Field(f) if f.required)
        });
        if validates {
            functions.push("createRequiredRequestFieldError");
        }
        w.line(format!(
            "const {{ {} }} = {CLIENT_UTILITY};",
            functions.join(", ")
        ));
        if self.typed {
            w.line(format!("type IFetch = {CLIENT_UTILITY}.IFetch;"));
            w.line(format!("type IFetchRequest = {CLIENT_UTILITY}.IFetchRequest;"));
        }
    }

    fn write_class(&mut self, w: &mut CodeWriter, ir: &ServiceIR<'_>) {
        let class_name = ir.client_class_name();
        let open = if self.typed {
            format!("class {class_name} implements {} {{", ir.interface_name())
        } else {
            format!("class {class_name} {{")
        };
        let default_base_uri = string_literal(ir.base_uri.unwrap_or("/"));
        w.block(open, "}", |w| {
            let constructor = self.pick(
                "constructor(fetch: IFetch, baseUri?: string) {",
                "constructor(fetch, baseUri) {",
            );
            w.block(constructor, "}", |w| {
                w.block("if (typeof fetch !== 'function') {", "}", |w| {
                    w.line("throw new TypeError('fetch must be a function.');");
                });
                w.block("if (typeof baseUri === 'undefined') {", "}", |w| {
                    w.line(format!("baseUri = {default_base_uri};"));
                });
                w.block("if (/[^\\/]$/.test(baseUri)) {", "}", |w| {
                    w.line("baseUri += '/';");
                });
                w.line("this._fetch = fetch;");
                w.line("this._baseUri = baseUri;");
            });

            for method in &ir.methods {
                trace!(method = %method.name, "emitting client method");
                w.blank();
                self.write_method(w, method);
            }

            if self.typed {
                w.blank();
                w.line("private _fetch: IFetch;");
                w.line("private _baseUri: string;");
            }
        });
    }

    fn write_method(&mut self, w: &mut CodeWriter, method: &MethodIR<'_>) {
        DocComment::from_docs(&method.method.docs).write(w);
        let open = if self.typed {
            self.section.use_type(method.request_type.as_str());
            self.section.use_type(method.response_type.as_str());
            format!(
                "public {}(request: {}, context?: unknown): Promise<{SERVICE_RESULT}<{}>> {{",
                method.name, method.request_type, method.response_type
            )
        } else {
            format!("{}(request, context) {{", method.name)
        };
        w.block(open, "}", |w| {
            self.write_validation(w, method);
            self.write_uri(w, method);
            self.write_fetch_request(w, method);
            self.write_dispatch(w, method);
        });
    }

    fn write_validation(&self, w: &mut CodeWriter, method: &MethodIR<'_>) {
        let required_error = |w: &mut CodeWriter, name: &str| {
            w.line(format!(
                "return Promise.resolve(createRequiredRequestFieldError({}));",
                string_literal(name)
            ));
        };

        for field in &method.path_fields {
            let access = format_param_access("request", field.name());
            let var = uri_part_var(field.name());
            w.line(format!(
                "const {var} = {access} != null && {};",
                field.kind.to_uri_component(&access)
            ));
            w.block(format!("if (!{var}) {{"), "}", |w| required_error(w, field.name()));
        }

        let required_body = match &method.request_body {
            RequestBodyIR::Field(field) if field.required => Some(*field),
            _ => None,
        };
        if let Some(field) = required_body {
            let access = format_param_access("request", &field.name);
            w.block(format!("if ({access} == null) {{"), "}", |w| {
                required_error(w, &field.name);
            });
        }
    }

    fn write_uri(&self, w: &mut CodeWriter, method: &MethodIR<'_>) {
        let keyword = if method.query_fields.is_empty() { "const" } else { "let" };
        w.line(format!("{keyword} uri = {};", uri_expression(&method.path)));

        if method.query_fields.is_empty() {
            return;
        }
        w.line(self.pick("const query: string[] = [];", "const query = [];"));
        for field in &method.query_fields {
            let access = format_param_access("request", field.name());
            w.line(format!(
                "{access} == null || query.push({} + {});",
                string_literal(&format!("{}=", field.wire_name)),
                field.kind.to_uri_component(&access)
            ));
        }
        w.block("if (query.length) {", "}", |w| {
            w.line("uri = uri + '?' + query.join('&');");
        });
    }

    fn write_fetch_request(&self, w: &mut CodeWriter, method: &MethodIR<'_>) {
        let body = match &method.request_body {
            RequestBodyIR::None => None,
            RequestBodyIR::Field(field) => Some(format_param_access("request", &field.name)),
            RequestBodyIR::WholeRequest => Some("request".to_string()),
            RequestBodyIR::Normal(fields) => {
                let props: Vec<_> = fields
                    .iter()
                    .map(|f| {
                        format!(
                            "{}: {}",
                            quote_if_needed(&f.name),
                            format_param_access("request", &f.name)
                        )
                    })
                    .collect();
                Some(format!("{{ {} }}", props.join(", ")))
            }
        };

        let open = self.pick(
            "const fetchRequest: IFetchRequest = {",
            "const fetchRequest = {",
        );
        w.block(open, "};", |w| {
            w.line(format!("method: {},", string_literal(method.verb.as_str())));
            if let Some(body) = &body {
                w.line("headers: { 'Content-Type': 'application/json' },");
                w.line(format!("body: JSON.stringify({body}),"));
            } else if !method.request_header_fields.is_empty() {
                w.line("headers: {},");
            }
        });

        let headers = self.pick("fetchRequest.headers!", "fetchRequest.headers");
        for field in &method.request_header_fields {
            let access = format_param_access("request", field.name());
            w.block(format!("if ({access} != null) {{"), "}", |w| {
                w.line(format!(
                    "{headers}[{}] = {};",
                    string_literal(field.wire_name),
                    field.kind.to_header_text(&access)
                ));
            });
        }
    }

    fn write_dispatch(&mut self, w: &mut CodeWriter, method: &MethodIR<'_>) {
        let response_type = method.response_type.as_str();
        w.block(
            "return fetchResponse(this._fetch, this._baseUri + uri, fetchRequest, context).then(result => {",
            "});",
            |w| {
                w.line("const status = result.response.status;");
                if self.typed {
                    w.line(format!("let value: {response_type} | null = null;"));
                } else {
                    w.line("let value = null;");
                }

                for (index, response) in method.responses.iter().enumerate() {
                    let condition = format!("if (status === {}) {{", response.status_code);
                    let body = |w: &mut CodeWriter| {
                        self.write_response_case(w, &response.body, response_type);
                    };
                    if index == 0 {
                        w.block(condition, "}", body);
                    } else {
                        w.chain_block(&format!("else {condition}"), "}", body);
                    }
                }

                w.blank();
                w.block("if (!value) {", "}", |w| {
                    if self.typed {
                        w.line(format!(
                            "return createResponseError(status, result.json) as {SERVICE_RESULT}<{response_type}>;"
                        ));
                    } else {
                        w.line("return createResponseError(status, result.json);");
                    }
                });

                // with no valid response the value is never set, so there is nothing to overlay
                if !method.responses.is_empty() && !method.response_header_fields.is_empty() {
                    w.blank();
                    w.line(self.pick("let headerValue: string | null;", "let headerValue;"));
                    for field in &method.response_header_fields {
                        self.section.use_parse(field.kind);
                        w.line(format!(
                            "headerValue = result.response.headers.get({});",
                            string_literal(field.wire_name)
                        ));
                        w.block("if (headerValue != null) {", "}", |w| {
                            w.line(format!(
                                "{} = {};",
                                format_param_access("value", field.name()),
                                field.kind.parse_from_text("headerValue", self.options.dialect)
                            ));
                        });
                    }
                }

                w.blank();
                w.line("return { value: value };");
            },
        );
    }

    fn write_response_case(
        &self,
        w: &mut CodeWriter,
        body: &ResponseBodyIR<'_>,
        response_type: &str,
    ) {
        match body {
            ResponseBodyIR::Empty => w.line("value = {};"),
            ResponseBodyIR::Flag(field) => {
                w.line(format!("value = {{ {}: true }};", quote_if_needed(&field.name)));
            }
            ResponseBodyIR::Field(field) => {
                let cast = if self.typed {
                    format!(" as {response_type}")
                } else {
                    String::new()
                };
                w.block("if (result.json) {", "}", |w| {
                    w.line(format!(
                        "value = {{ {}: result.json }}{cast};",
                        quote_if_needed(&field.name)
                    ));
                });
            }
            ResponseBodyIR::Normal(_) => {
                let cast = if self.typed {
                    format!(" as {response_type} | null")
                } else {
                    String::new()
                };
                w.block("if (result.json) {", "}", |w| {
                    w.line(format!("value = result.json{cast};"));
                });
            }
        }
    }
}

fn uri_part_var(name: &str) -> String {
    format!("uriPart{}", pascal_identifier(name))
}

/// The request URI relative to the base URI: a string literal, or a template
/// literal when the path has captures.
fn uri_expression(path: &[UrlPart<'_>]) -> String {
    let mut has_params = false;
    let mut template = String::new();
    let mut plain = String::new();
    for (index, part) in path.iter().enumerate() {
        match part {
            UrlPart::Static(text) => {
                let text = if index == 0 {
                    text.trim_start_matches('/')
                } else {
                    text
                };
                template.push_str(&escape_template(text));
                plain.push_str(text);
            }
            UrlPart::Param(field) => {
                has_params = true;
                template.push_str(&format!("${{{}}}", uri_part_var(field.name())));
            }
        }
    }
    if has_params {
        format!("`{template}`")
    } else {
        string_literal(&plain)
    }
}
