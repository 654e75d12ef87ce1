//! Type declarations: the service interface, request and response records,
//! DTO records and enums.

use std::collections::BTreeSet;

use httpgen_model::{EnumType, Field};
use tracing::trace;

use super::api::ServiceIR;
use super::docs::DocComment;
use super::emit::Emit;
use super::section::{Section, TypeNameKind};
use super::types::{SERVICE_ERROR, SERVICE_RESULT, TsImport, dto_interface_name, render_type};
use super::utils::{quote_if_needed, string_literal};
use super::writer::CodeWriter;
use crate::options::GeneratorOptions;

/// Emit every type declaration of the service.
pub fn emit_interfaces(ir: &ServiceIR<'_>, options: &GeneratorOptions) -> Section {
    let mut section = Section::default();
    let mut w = CodeWriter::new();
    let mut refs = BTreeSet::new();

    let interface_name = ir.interface_name();
    DocComment::from_docs(&ir.service.docs).write(&mut w);
    w.block(format!("export interface {interface_name} {{"), "}", |w| {
        for method in &ir.methods {
            w.blank();
            DocComment::from_docs(&method.method.docs).write(w);
            w.line(format!(
                "{}(request: {}, context?: unknown): Promise<{SERVICE_RESULT}<{}>>;",
                method.name, method.request_type, method.response_type
            ));
        }
    });
    section.export(interface_name, TypeNameKind::Interface);
    if !ir.methods.is_empty() {
        refs.insert(SERVICE_RESULT.to_string());
    }

    for method in &ir.methods {
        trace!(method = %method.name, "emitting request and response types");
        w.blank();
        write_record(
            &mut w,
            &method.request_type,
            &DocComment::text(&format!("Request for {}.", method.name)),
            &method.method.request_fields,
            &mut refs,
        );
        section.export(method.request_type.clone(), TypeNameKind::Interface);

        w.blank();
        write_record(
            &mut w,
            &method.response_type,
            &DocComment::text(&format!("Response for {}.", method.name)),
            &method.method.response_fields,
            &mut refs,
        );
        section.export(method.response_type.clone(), TypeNameKind::Interface);
    }

    for dto in &ir.service.dtos {
        let name = dto_interface_name(&dto.name);
        w.blank();
        write_record(
            &mut w,
            &name,
            &DocComment::from_docs(&dto.docs),
            &dto.fields,
            &mut refs,
        );
        section.export(name, TypeNameKind::Interface);
    }

    for enumeration in &ir.service.enums {
        w.blank();
        write_enum(&mut w, enumeration);
        section.export(enumeration.name.clone(), TypeNameKind::Enum);
    }

    let runtime_types: Vec<&str> = [SERVICE_RESULT, SERVICE_ERROR]
        .into_iter()
        .filter(|name| refs.contains(*name))
        .collect();
    if !runtime_types.is_empty() {
        section
            .imports
            .push(TsImport::types(options.runtime_package.as_str(), &runtime_types));
    }

    section.code = w;
    section
}

fn write_record(
    w: &mut CodeWriter,
    name: &str,
    doc: &DocComment,
    fields: &[Field],
    refs: &mut BTreeSet<String>,
) {
    doc.write(w);
    w.block(format!("export interface {name} {{"), "}", |w| {
        for field in fields {
            let ty = render_type(&field.ty);
            ty.collect_refs(refs);
            w.blank();
            DocComment::from_docs(&field.docs).write(w);
            w.line(format!("{}?: {};", quote_if_needed(&field.name), ty.emit()));
        }
    });
}

fn write_enum(w: &mut CodeWriter, enumeration: &EnumType) {
    DocComment::from_docs(&enumeration.docs).write(w);
    w.block(format!("export enum {} {{", enumeration.name), "}", |w| {
        for value in &enumeration.values {
            w.blank();
            DocComment::from_docs(&value.docs).write(w);
            w.line(format!(
                "{} = {},",
                quote_if_needed(&value.name),
                string_literal(&value.name)
            ));
        }
    });
}
