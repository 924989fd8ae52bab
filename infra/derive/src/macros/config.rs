use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::parse::Parser;
use syn::{ItemStruct, LitStr};

#[derive(Default)]
struct ConfigArgs {
    name: Option<LitStr>,
    shared_root: bool,
    no_reload: bool,
}

impl ConfigArgs {
    fn parse(&mut self, meta: ParseNestedMeta<'_>) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            self.name = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("shared_root") {
            self.shared_root = true;
        } else if meta.path.is_ident("no_reload") {
            self.no_reload = true;
        } else {
            return Err(meta.error("expected `name`, `shared_root` or `no_reload`"));
        }
        Ok(())
    }

    fn validated_name(&self) -> syn::Result<&LitStr> {
        let Some(name) = &self.name else {
            return Err(syn::Error::new(Span::call_site(), "config requires `name = \"...\"`"));
        };
        let value = name.value();
        if value.trim().is_empty() {
            return Err(syn::Error::new_spanned(name, "config name cannot be empty"));
        }
        if value.contains(['/', '\\']) || value.starts_with('.') {
            return Err(syn::Error::new_spanned(name, "config name must be a plain file stem"));
        }
        Ok(name)
    }
}

pub fn expand_config(args: TokenStream, input: ItemStruct) -> TokenStream {
    let mut parsed = ConfigArgs::default();
    if let Err(err) = syn::meta::parser(|meta| parsed.parse(meta)).parse2(args) {
        return err.to_compile_error();
    }
    let name = match parsed.validated_name() {
        Ok(name) => name,
        Err(err) => return err.to_compile_error(),
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let shared_root = parsed.shared_root;
    let no_reload = parsed.no_reload;

    quote! {
        #input

        #[automatically_derived]
        impl #impl_generics ::xcore_kernel::config::ConfigType for #ident #ty_generics #where_clause {
            fn descriptor() -> ::xcore_kernel::domain::config::ConfigDescriptor {
                ::xcore_kernel::domain::config::ConfigDescriptor::new(#name)
                    .with_shared_root(#shared_root)
                    .with_reload_exempt(#no_reload)
            }
        }
    }
}
