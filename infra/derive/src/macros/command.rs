use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::parse::Parser;
use syn::{ItemStruct, LitStr, Path, Token};

#[derive(Default)]
struct CommandArgs {
    aliases: Vec<LitStr>,
    permission: Option<LitStr>,
    description: Option<LitStr>,
    parent: Option<Path>,
    lite: bool,
}

impl CommandArgs {
    fn parse(&mut self, meta: ParseNestedMeta<'_>) -> syn::Result<()> {
        if meta.path.is_ident("aliases") {
            let content;
            syn::parenthesized!(content in meta.input);
            let aliases = content.parse_terminated(<LitStr as syn::parse::Parse>::parse, Token![,])?;
            self.aliases.extend(aliases);
        } else if meta.path.is_ident("permission") {
            self.permission = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("description") {
            self.description = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("parent") {
            self.parent = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("lite") {
            self.lite = true;
        } else {
            return Err(meta.error(
                "expected `aliases(..)`, `permission`, `description`, `parent` or `lite`",
            ));
        }
        Ok(())
    }

    fn validate(&self) -> syn::Result<()> {
        if self.aliases.is_empty() {
            return Err(syn::Error::new(
                Span::call_site(),
                "command requires at least one alias: `aliases(\"name\")`",
            ));
        }
        for alias in &self.aliases {
            let value = alias.value();
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(syn::Error::new_spanned(alias, "aliases must be non-empty single words"));
            }
        }
        Ok(())
    }
}

pub fn expand_command(args: TokenStream, input: ItemStruct) -> TokenStream {
    let mut parsed = CommandArgs::default();
    if let Err(err) = syn::meta::parser(|meta| parsed.parse(meta)).parse2(args) {
        return err.to_compile_error();
    }
    if let Err(err) = parsed.validate() {
        return err.to_compile_error();
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let domain = quote! { ::xcore_kernel::domain::command };

    let aliases = &parsed.aliases;
    let permission = parsed.permission.as_ref().map_or_else(String::new, LitStr::value);
    let description = parsed.description.as_ref().map_or_else(String::new, LitStr::value);
    let kind = if parsed.lite { quote! { Lite } } else { quote! { Standard } };
    let parent = parsed.parent.as_ref().map_or_else(
        || quote! { #domain::ParentRef::NoParent },
        |path| quote! { #domain::ParentRef::of::<#path>() },
    );

    quote! {
        #input

        #[automatically_derived]
        impl #impl_generics ::xcore_kernel::command::CommandType for #ident #ty_generics #where_clause {
            fn descriptor() -> #domain::CommandDescriptor {
                #domain::CommandDescriptor {
                    key: #domain::CommandKey::of::<Self>(),
                    kind: #domain::CommandKind::#kind,
                    aliases: vec![#(::std::borrow::Cow::Borrowed(#aliases)),*],
                    permission: ::std::borrow::Cow::Borrowed(#permission),
                    description: ::std::borrow::Cow::Borrowed(#description),
                    parent: #parent,
                }
            }
        }
    }
}
