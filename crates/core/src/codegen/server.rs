//! Express server scaffold emission.
//!
//! `createApp` builds a router with one route per method. Each handler
//! decodes the request from captures, query, body and headers, calls the
//! service implementation, and encodes the first declared response the
//! result satisfies. Errors map to statuses through a fixed code table.

use tracing::trace;

use super::api::{MethodIR, RequestBodyIR, ResponseBodyIR, ServiceIR, UrlPart};
use super::docs::DocComment;
use super::section::Section;
use super::types::TsImport;
use super::utils::{format_param_access, quote_if_needed, string_literal};
use super::writer::CodeWriter;
use crate::options::GeneratorOptions;

/// Error codes with a dedicated HTTP status; any other code maps to 500.
pub const STANDARD_ERROR_CODES: [(&str, u16); 10] = [
    ("NotModified", 304),
    ("InvalidRequest", 400),
    ("NotAuthenticated", 401),
    ("NotAuthorized", 403),
    ("NotFound", 404),
    ("Conflict", 409),
    ("RequestTooLarge", 413),
    ("TooManyRequests", 429),
    ("InternalError", 500),
    ("ServiceUnavailable", 503),
];

/// Emit the route table.
pub fn emit_server(ir: &ServiceIR<'_>, options: &GeneratorOptions) -> Section {
    let mut emitter = ServerEmitter {
        options,
        typed: options.dialect.is_typed(),
        section: Section::default(),
    };
    let mut w = CodeWriter::new();
    emitter.write_error_codes(&mut w);
    w.blank();
    emitter.write_app(&mut w, ir);

    let mut section = emitter.section;
    section
        .imports
        .push(TsImport::default_value("express", "express"));
    section.code = w;
    section
}

struct ServerEmitter<'o> {
    options: &'o GeneratorOptions,
    typed: bool,
    section: Section,
}

impl ServerEmitter<'_> {
    fn write_error_codes(&self, w: &mut CodeWriter) {
        let open = if self.typed {
            "const standardErrorCodes: { [code: string]: number } = {"
        } else {
            "const standardErrorCodes = {"
        };
        w.block(open, "};", |w| {
            for (code, status) in STANDARD_ERROR_CODES {
                w.line(format!("{code}: {status},"));
            }
        });
    }

    fn write_app(&mut self, w: &mut CodeWriter, ir: &ServiceIR<'_>) {
        DocComment::text(&format!(
            "Creates an Express router that serves {} using the specified service implementation.",
            ir.name()
        ))
        .write(w);
        let open = if self.typed {
            let interface_name = ir.interface_name();
            let open =
                format!("export function createApp(service: {interface_name}): express.Router {{");
            self.section.use_type(interface_name);
            open
        } else {
            "export function createApp(service) {".to_string()
        };
        w.block(open, "}", |w| {
            w.line("const app = express.Router();");
            w.line("app.use(express.json());");
            for method in &ir.methods {
                trace!(method = %method.name, "emitting server route");
                w.blank();
                self.write_route(w, method);
            }
            w.blank();
            w.line("return app;");
        });
    }

    fn write_route(&mut self, w: &mut CodeWriter, method: &MethodIR<'_>) {
        DocComment::from_docs(&method.method.docs).write(w);
        let open = format!(
            "app.{}({}, function (req, res, next) {{",
            method.verb.as_lower_str(),
            string_literal(&route_path(&method.path))
        );
        w.block(open, "});", |w| {
            self.write_request(w, method);
            w.blank();
            self.write_invoke(w, method);
        });
    }

    fn write_request(&mut self, w: &mut CodeWriter, method: &MethodIR<'_>) {
        let dialect = self.options.dialect;
        if self.typed {
            self.section.use_type(method.request_type.as_str());
            w.line(format!("const request: {} = {{}};", method.request_type));
        } else {
            w.line("const request = {};");
        }

        for field in &method.path_fields {
            self.section.use_parse(field.kind);
            let capture = format_param_access("req.params", field.wire_name);
            w.line(format!(
                "{} = {};",
                format_param_access("request", field.name()),
                field.kind.parse_from_text(&capture, dialect)
            ));
        }

        for field in &method.query_fields {
            self.section.use_parse(field.kind);
            let value = format!("req.query[{}]", string_literal(field.wire_name));
            w.block(format!("if (typeof {value} === 'string') {{"), "}", |w| {
                w.line(format!(
                    "{} = {};",
                    format_param_access("request", field.name()),
                    field.kind.parse_from_text(&value, dialect)
                ));
            });
        }

        let normal_fields: Vec<&str> = match &method.request_body {
            RequestBodyIR::None => Vec::new(),
            RequestBodyIR::Field(field) => {
                w.line(format!("{} = req.body;", format_param_access("request", &field.name)));
                Vec::new()
            }
            RequestBodyIR::WholeRequest => method
                .method
                .request_fields
                .iter()
                .map(|f| f.name.as_str())
                .collect(),
            RequestBodyIR::Normal(fields) => fields.iter().map(|f| f.name.as_str()).collect(),
        };
        if !normal_fields.is_empty() {
            w.block("if (req.body) {", "}", |w| {
                for name in normal_fields {
                    w.line(format!(
                        "{} = {};",
                        format_param_access("request", name),
                        format_param_access("req.body", name)
                    ));
                }
            });
        }

        if !method.request_header_fields.is_empty() {
            w.line(if self.typed {
                "let headerValue: string | undefined;"
            } else {
                "let headerValue;"
            });
            for field in &method.request_header_fields {
                self.section.use_parse(field.kind);
                w.line(format!(
                    "headerValue = req.header({});",
                    string_literal(field.wire_name)
                ));
                w.block("if (headerValue != null) {", "}", |w| {
                    w.line(format!(
                        "{} = {};",
                        format_param_access("request", field.name()),
                        field.kind.parse_from_text("headerValue", dialect)
                    ));
                });
            }
        }
    }

    fn write_invoke(&self, w: &mut CodeWriter, method: &MethodIR<'_>) {
        w.block(
            format!("return service.{}(request).then(result => {{", method.name),
            "}).catch(next);",
            |w| {
                w.block("if (result.error) {", "}", |w| {
                    // only own keys of the table count; inherited names fall back to 500
                    w.line("const code = result.error.code;");
                    w.line(
                        "const status = code && Object.prototype.hasOwnProperty.call(standardErrorCodes, code) ? standardErrorCodes[code] : 500;",
                    );
                    w.line("res.status(status).send(result.error);");
                    w.line("return;");
                });
                w.block("if (result.value) {", "}", |w| {
                    for field in &method.response_header_fields {
                        let value = format_param_access("result.value", field.name());
                        w.block(format!("if ({value} != null) {{"), "}", |w| {
                            w.line(format!(
                                "res.setHeader({}, {});",
                                string_literal(field.wire_name),
                                field.kind.to_header_text(&value)
                            ));
                        });
                    }
                    for response in &method.responses {
                        write_response_case(w, response.status_code, &response.body);
                        if response.body.is_unconditional() {
                            break;
                        }
                    }
                });
                w.line("throw new Error('Result must have an error or value.');");
            },
        );
    }
}

fn write_response_case(w: &mut CodeWriter, status_code: u16, body: &ResponseBodyIR<'_>) {
    match body {
        ResponseBodyIR::Empty => {
            w.line(format!("res.sendStatus({status_code});"));
            w.line("return;");
        }
        ResponseBodyIR::Flag(field) => {
            let value = format_param_access("result.value", &field.name);
            w.block(format!("if ({value}) {{"), "}", |w| {
                w.line(format!("res.sendStatus({status_code});"));
                w.line("return;");
            });
        }
        ResponseBodyIR::Field(field) => {
            let value = format_param_access("result.value", &field.name);
            w.block(format!("if ({value} != null) {{"), "}", |w| {
                w.line(format!("res.status({status_code}).send({value});"));
                w.line("return;");
            });
        }
        ResponseBodyIR::Normal(fields) => {
            let props: Vec<_> = fields
                .iter()
                .map(|f| {
                    format!(
                        "{}: {}",
                        quote_if_needed(&f.name),
                        format_param_access("result.value", &f.name)
                    )
                })
                .collect();
            w.line(format!(
                "res.status({status_code}).send({{ {} }});",
                props.join(", ")
            ));
            w.line("return;");
        }
    }
}

/// Route path with `:name` captures in place of `{name}` placeholders.
fn route_path(path: &[UrlPart<'_>]) -> String {
    let route: String = path
        .iter()
        .map(|part| match part {
            UrlPart::Static(text) => (*text).to_string(),
            UrlPart::Param(field) => format!(":{}", field.wire_name),
        })
        .collect();
    if route.starts_with('/') {
        route
    } else {
        format!("/{route}")
    }
}
