//! vcl-derive
//!
//! `#[derive(Decode)]` for structs with named fields. Each field carries at
//! most one `#[vcl("name,kind")]` attribute; fields without one are left
//! alone. Tags are checked here, so an unknown kind or a nameless
//! attribute/block tag is a compile error rather than a runtime panic.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, LitStr, Type};
use vcl_schema::{FieldTag, TagKind};

#[proc_macro_derive(Decode, attributes(vcl))]
pub fn derive_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct TaggedField<'a> {
    ident:   &'a Ident,
    ty:      &'a Type,
    tag:     FieldTag,
    literal: LitStr,
}

fn tagged_fields(input: &DeriveInput) -> syn::Result<Vec<TaggedField<'_>>> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Decode can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Decode can only be derived for structs",
            ))
        }
    };

    let mut tagged = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };

        let mut found: Option<(FieldTag, LitStr)> = None;
        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("vcl")) {
            if found.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate #[vcl] attribute"));
            }
            let literal: LitStr = attr.parse_args()?;
            let tag = literal
                .value()
                .parse::<FieldTag>()
                .map_err(|err| syn::Error::new_spanned(&literal, err))?;
            found = Some((tag, literal));
        }

        if let Some((tag, literal)) = found {
            tagged.push(TaggedField {
                ident,
                ty: &field.ty,
                tag,
                literal,
            });
        }
    }
    Ok(tagged)
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let fields = tagged_fields(input)?;

    let mut descriptors = Vec::new();
    let mut label_names = Vec::new();
    let mut statements  = Vec::new();

    for field in &fields {
        let ident      = field.ident;
        let ty         = field.ty;
        let literal    = &field.literal;
        let key        = &field.tag.name;
        let field_name = ident.to_string();
        let descriptor = quote! {
            ::vcl::FieldDescriptor::new(#field_name, ::vcl::FieldTag::parse(#literal))
        };

        match field.tag.kind {
            TagKind::Attr => {
                descriptors.push(quote! {
                    #descriptor.optional(<#ty as ::vcl::decode::AttrField>::OPTIONAL)
                });
                statements.push(quote! {
                    ::vcl::decode::decode_attribute(&mut self.#ident, content, #key);
                });
            }
            TagKind::Block => {
                descriptors.push(quote! {
                    #descriptor.label_names(<#ty as ::vcl::decode::BlockField>::block_labels())
                });
                statements.push(quote! {
                    ::vcl::decode::decode_blocks(&mut self.#ident, content, #key, errors);
                });
            }
            TagKind::Label => {
                let index = label_names.len();
                label_names.push(if key.is_empty() { field_name.clone() } else { key.clone() });
                descriptors.push(descriptor);
                statements.push(quote! {
                    ::vcl::decode::decode_label(&mut self.#ident, labels, #index);
                });
            }
            TagKind::Flat => {
                descriptors.push(descriptor);
                statements.push(quote! {
                    ::vcl::decode::decode_flats(&mut self.#ident, content, errors);
                });
            }
            TagKind::Comment => {
                descriptors.push(descriptor);
                statements.push(quote! {
                    ::vcl::decode::decode_comments(&mut self.#ident, content);
                });
            }
        }
    }

    Ok(quote! {
        impl #impl_generics ::vcl::Decode for #name #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<::vcl::FieldDescriptor> {
                ::std::vec![#(#descriptors),*]
            }

            fn label_names() -> ::std::vec::Vec<::std::string::String> {
                ::std::vec![#(::std::string::String::from(#label_names)),*]
            }

            #[allow(unused_variables)]
            fn decode_body(
                &mut self,
                content: &::vcl::BodyContent,
                labels: &[::std::string::String],
                errors: &mut ::std::vec::Vec<::vcl::DecodeError>,
            ) {
                #(#statements)*
            }
        }

        impl #impl_generics ::vcl::decode::BlockElem for #name #ty_generics #where_clause {
            fn decode_block(
                block: &::vcl::Block,
                errors: &mut ::std::vec::Vec<::vcl::DecodeError>,
            ) -> Self {
                ::vcl::decode::decode_record(&block.body, &block.labels, errors)
            }

            fn block_labels() -> ::std::vec::Vec<::std::string::String> {
                <Self as ::vcl::Decode>::label_names()
            }
        }

        impl #impl_generics ::vcl::decode::BlockField for #name #ty_generics #where_clause {
            fn decode_blocks(
                &mut self,
                block_type: &str,
                blocks: &[&::vcl::Block],
                errors: &mut ::std::vec::Vec<::vcl::DecodeError>,
            ) {
                ::vcl::decode::decode_required_block(self, block_type, blocks, errors);
            }

            fn block_labels() -> ::std::vec::Vec<::std::string::String> {
                <Self as ::vcl::Decode>::label_names()
            }
        }

        impl #impl_generics ::vcl::decode::FlatElem for #name #ty_generics #where_clause {
            fn from_flat(
                flat: &::vcl::Flat,
                errors: &mut ::std::vec::Vec<::vcl::DecodeError>,
            ) -> ::std::option::Option<Self> {
                flat.as_object()
                    .map(|body| ::vcl::decode::decode_record(body, &[], errors))
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand_err(input: DeriveInput) -> String {
        match expand(&input) {
            Ok(tokens) => panic!("expected an error, got {}", tokens),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn collects_tagged_fields() {
        let input: DeriveInput = parse_quote! {
            struct Director {
                #[vcl("type,label")]
                kind: String,
                #[vcl(".quorum")]
                quorum: String,
                #[vcl(",flat")]
                backends: Vec<Box<Backend>>,
                plain: u8,
            }
        };

        let fields = tagged_fields(&input).unwrap();
        let tags: Vec<(String, TagKind)> = fields
            .iter()
            .map(|field| (field.ident.to_string(), field.tag.kind))
            .collect();
        assert_eq!(
            tags,
            vec![
                ("kind".to_owned(), TagKind::Label),
                ("quorum".to_owned(), TagKind::Attr),
                ("backends".to_owned(), TagKind::Flat),
            ]
        );
        assert!(expand(&input).is_ok());
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = expand_err(parse_quote! {
            struct Bad {
                #[vcl("x,blob")]
                x: i64,
            }
        });
        assert_eq!(err, "Unknown tag kind \"blob\"");
    }

    #[test]
    fn rejects_nameless_block() {
        let err = expand_err(parse_quote! {
            struct Bad {
                #[vcl(",block")]
                x: Vec<Inner>,
            }
        });
        assert_eq!(err, "A \"block\" tag needs a name");
    }

    #[test]
    fn rejects_duplicate_attribute() {
        let err = expand_err(parse_quote! {
            struct Bad {
                #[vcl("x")]
                #[vcl("y")]
                x: i64,
            }
        });
        assert_eq!(err, "duplicate #[vcl] attribute");
    }

    #[test]
    fn rejects_non_structs() {
        let err = expand_err(parse_quote! {
            enum Bad { A, B }
        });
        assert_eq!(err, "Decode can only be derived for structs");

        let err = expand_err(parse_quote! {
            struct Bad(i64);
        });
        assert_eq!(err, "Decode can only be derived for structs with named fields");
    }
}
