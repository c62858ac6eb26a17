//! Config derive macro - generates FIELDS and template().

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Lit, Meta, Type};

/// Parsed field information.
#[derive(Debug)]
struct FieldInfo {
    name: syn::Ident,
    toml_name: String,
    doc: Option<String>,
    inline_doc: bool,
    hidden: bool,
    default: Option<String>,
    skip: bool,
    sub: bool,
    ty: String,
}

/// Generate Config implementation (FIELDS + template).
pub fn derive(input: &DeriveInput) -> TokenStream {
    let name = &input.ident;
    let fields_struct_name = syn::Ident::new(&format!("{}Fields", name), name.span());

    let section = get_string_attr(&input.attrs, "section")
        .unwrap_or_else(|| infer_section(&name.to_string()));

    let section_doc = extract_doc_comment(&input.attrs).unwrap_or_default();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return quote! { compile_error!("Config only works on structs with named fields"); };
            }
        },
        _ => return quote! { compile_error!("Config only works on structs"); },
    };

    let field_infos: Vec<FieldInfo> = fields
        .iter()
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            let attrs = &field.attrs;

            Some(FieldInfo {
                name: ident.clone(),
                toml_name: get_string_attr(attrs, "name").unwrap_or_else(|| ident.to_string()),
                doc: extract_doc_comment(attrs),
                inline_doc: has_attr(attrs, "inline_doc"),
                hidden: has_attr(attrs, "hidden"),
                default: get_string_attr(attrs, "default"),
                skip: has_attr(attrs, "skip"),
                sub: has_attr(attrs, "sub"),
                ty: type_to_string(&field.ty),
            })
        })
        .collect();

    let fields_for_path: Vec<_> = field_infos.iter().filter(|f| !f.skip).collect();

    let field_defs = fields_for_path.iter().map(|f| {
        let name = &f.name;
        quote! { pub #name: crate::config::FieldPath, }
    });

    let field_inits = fields_for_path.iter().map(|f| {
        let name = &f.name;
        let full_path = join_path(&section, &f.toml_name);
        quote! { #name: crate::config::FieldPath::new(#full_path), }
    });

    let template_fields: Vec<_> = field_infos
        .iter()
        .filter(|f| !f.skip && !f.hidden)
        .collect();

    let template_str = generate_template(&section, &template_fields);

    quote! {
        /// Generated field path accessors.
        #[allow(non_camel_case_types)]
        pub struct #fields_struct_name {
            #(#field_defs)*
        }

        impl #name {
            /// Field paths for diagnostic messages.
            pub const FIELDS: #fields_struct_name = #fields_struct_name {
                #(#field_inits)*
            };

            /// Section name for TOML output.
            pub const TEMPLATE_SECTION: &'static str = #section;

            /// Section documentation.
            pub const TEMPLATE_DOC: &'static str = #section_doc;

            /// TOML template for this config section.
            pub fn template() -> &'static str {
                #template_str
            }

            /// TOML template with section header.
            pub fn template_with_header() -> String {
                let mut out = String::new();
                let doc = Self::TEMPLATE_DOC;
                if !doc.is_empty() {
                    for line in doc.lines() {
                        out.push_str("# ");
                        out.push_str(line.trim());
                        out.push('\n');
                    }
                }
                let section = Self::TEMPLATE_SECTION;
                if !section.is_empty() {
                    out.push('[');
                    out.push_str(section);
                    out.push_str("]\n");
                }
                out.push_str(Self::template());
                out
            }
        }
    }
}

fn join_path(section: &str, key: &str) -> String {
    if section.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", section, key)
    }
}

/// Generate template string for fields.
fn generate_template(section: &str, fields: &[&FieldInfo]) -> String {
    let mut out = fields
        .iter()
        .map(|f| generate_field_template(section, f))
        .collect::<Vec<_>>()
        .join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Generate TOML template for a single field.
fn generate_field_template(section: &str, info: &FieldInfo) -> String {
    let mut lines = Vec::new();

    let single_line_doc = info.doc.as_deref().filter(|d| !d.contains('\n'));
    let inline = if info.inline_doc { single_line_doc } else { None };

    if inline.is_none() {
        if let Some(ref doc) = info.doc {
            for line in doc.lines() {
                lines.push(format!("# {}", line.trim()));
            }
        }
    }

    let with_inline = |line: String| match inline {
        Some(doc) => format!("{}  # {}", line, doc.trim()),
        None => line,
    };

    if info.sub {
        lines.push(format!("# see [{}] section", join_path(section, &info.toml_name)));
    } else if info.ty.starts_with("Option<") && info.default.is_none() {
        // Optional fields without explicit default are commented out
        lines.push(with_inline(format!("# {} = \"\"", info.toml_name)));
    } else {
        let value = match &info.default {
            Some(v) => format_default_for_type(v, &info.ty),
            None => infer_default(&info.ty),
        };
        lines.push(with_inline(format!("{} = {}", info.toml_name, value)));
    }

    lines.join("\n")
}

// ============================================================================
// Attribute parsing helpers
// ============================================================================

fn get_string_attr(attrs: &[Attribute], key: &str) -> Option<String> {
    for attr in attrs {
        if !attr.path().is_ident("config") {
            continue;
        }
        let mut value = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(key) {
                let lit: syn::LitStr = meta.value()?.parse()?;
                value = Some(lit.value());
            } else if meta.input.peek(syn::Token![=]) {
                let _ = meta.value()?;
                let _: syn::Lit = meta.input.parse()?;
            }
            Ok(())
        });
        if value.is_some() {
            return value;
        }
    }
    None
}

fn has_attr(attrs: &[Attribute], key: &str) -> bool {
    for attr in attrs {
        if !attr.path().is_ident("config") {
            continue;
        }
        let mut found = false;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(key) {
                found = true;
            }
            // Skip value if present (e.g., `default = "true"`)
            if meta.input.peek(syn::Token![=]) {
                let _ = meta.value();
                let _: Option<syn::Lit> = meta.input.parse().ok();
            }
            Ok(())
        });
        if found {
            return true;
        }
    }
    false
}

fn extract_doc_comment(attrs: &[Attribute]) -> Option<String> {
    let docs: Vec<String> = attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            if let Meta::NameValue(nv) = &attr.meta
                && let syn::Expr::Lit(expr_lit) = &nv.value
                && let Lit::Str(s) = &expr_lit.lit
            {
                return Some(s.value());
            }
            None
        })
        .collect();

    if docs.is_empty() {
        None
    } else {
        Some(docs.join("\n").trim().to_string())
    }
}

// ============================================================================
// Type helpers
// ============================================================================

fn type_to_string(ty: &Type) -> String {
    quote!(#ty).to_string().replace(' ', "")
}

fn infer_section(name: &str) -> String {
    let name = name
        .strip_suffix("SectionConfig")
        .or_else(|| name.strip_suffix("Config"))
        .unwrap_or(name);
    to_snake_case(name)
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Format default value based on field type.
/// String types get quoted, everything else is used as-is.
fn format_default_for_type(value: &str, ty: &str) -> String {
    match ty {
        "String" | "Option<String>" => format!("\"{}\"", value),
        _ => value.to_string(),
    }
}

fn infer_default(ty: &str) -> String {
    match ty {
        "bool" => "false".to_string(),
        "u8" | "u16" | "u32" | "u64" | "usize" => "0".to_string(),
        "i8" | "i16" | "i32" | "i64" | "isize" => "0".to_string(),
        _ if ty.starts_with("Vec<") => "[]".to_string(),
        _ => "\"\"".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_section() {
        assert_eq!(infer_section("AsideConfig"), "aside");
        assert_eq!(infer_section("DocusSectionConfig"), "docus");
        assert_eq!(infer_section("MainLayout"), "main_layout");
    }

    #[test]
    fn test_format_default_for_type() {
        assert_eq!(format_default_for_type("main", "String"), "\"main\"");
        assert_eq!(format_default_for_type("true", "bool"), "true");
        assert_eq!(format_default_for_type("[\"/docs\"]", "Vec<String>"), "[\"/docs\"]");
    }

    #[test]
    fn test_infer_default() {
        assert_eq!(infer_default("bool"), "false");
        assert_eq!(infer_default("u32"), "0");
        assert_eq!(infer_default("Vec<String>"), "[]");
        assert_eq!(infer_default("String"), "\"\"");
    }
}
