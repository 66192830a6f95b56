//! Registration macro for runit test entities.
//!
//! `#[test_entity]` turns an inherent `impl` block into a `runit::TestEntity` implementation:
//! - every `pub fn` whose name starts with `test` becomes one registered test, in declaration order
//! - `set_up` / `tear_down`, when the block defines them, are forwarded as lifecycle hooks
//!
//! Methods outside the block (other impls, trait defaults) are never registered.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, FnArg, ImplItem, ImplItemFn, ItemImpl, ReturnType, Type, Visibility};

/// Case-sensitive, start-anchored. Must agree with `runit::naming::TEST_PREFIX`.
const TEST_PREFIX: &str = "test";

/// Registers the test methods of an inherent impl block.
///
/// Test methods take `&mut self` (or `&self`), optionally followed by `&TestContext<'_>`, and
/// return either `()` or a `Result<(), E>` where `E: Into<runit::Failure>`.
///
/// # Example
/// ```ignore
/// #[derive(Default)]
/// struct Arithmetic;
///
/// #[test_entity]
/// impl Arithmetic {
///     pub fn test_addition(&mut self, t: &TestContext<'_>) -> Outcome {
///         t.assert_equal(1 + 1, 2, None)?;
///         Ok(())
///     }
/// }
///
/// // Generates:
/// impl runit::TestEntity for Arithmetic {
///     const NAME: &'static str = "Arithmetic";
///     fn methods() -> Vec<runit::TestMethod<Self>> {
///         vec![runit::TestMethod::new("test_addition", |entity, cx| ...)]
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn test_entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(Span::call_site(), "#[test_entity] takes no arguments")
            .to_compile_error()
            .into();
    }

    let block = parse_macro_input!(item as ItemImpl);
    match expand(&block) {
        Ok(registration) => TokenStream::from(quote! {
            #block
            #registration
        }),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(block: &ItemImpl) -> syn::Result<proc_macro2::TokenStream> {
    if let Some((_, path, _)) = &block.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[test_entity] must be placed on an inherent impl block",
        ));
    }
    if !block.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &block.generics,
            "#[test_entity] does not support generic entities",
        ));
    }

    let self_ty = &block.self_ty;
    let entity_name = entity_name(self_ty);

    let mut registrations = Vec::new();
    let mut hooks = Vec::new();

    for item in &block.items {
        let ImplItem::Fn(method) = item else { continue };
        let name = method.sig.ident.to_string();

        match name.as_str() {
            "set_up" | "tear_down" => hooks.push(hook(self_ty, method)?),
            _ if matches!(method.vis, Visibility::Public(_)) && name.starts_with(TEST_PREFIX) => {
                registrations.push(registration(self_ty, method)?);
            }
            _ => {}
        }
    }

    Ok(quote! {
        impl ::runit::TestEntity for #self_ty {
            const NAME: &'static str = #entity_name;

            fn methods() -> ::std::vec::Vec<::runit::TestMethod<Self>> {
                ::std::vec![#(#registrations),*]
            }

            #(#hooks)*
        }
    })
}

fn entity_name(ty: &Type) -> String {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .unwrap_or_default(),
        other => quote!(#other).to_string(),
    }
}

/// Builds one `TestMethod::new(name, |entity, cx| ...)` entry.
fn registration(self_ty: &Type, method: &ImplItemFn) -> syn::Result<proc_macro2::TokenStream> {
    let name = method.sig.ident.to_string();
    let body = invocation(self_ty, method, quote!(entity))?;

    Ok(quote! {
        ::runit::TestMethod::<Self>::new(#name, |entity, cx| {
            #body
        })
    })
}

/// Forwards a lifecycle hook to the inherent method of the same name.
///
/// Inherent methods win path resolution over the trait method being defined, so `<T>::set_up`
/// reaches the user's hook.
fn hook(self_ty: &Type, method: &ImplItemFn) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &method.sig.ident;
    let body = invocation(self_ty, method, quote!(self))?;

    Ok(quote! {
        fn #ident(&mut self, cx: &::runit::TestContext<'_>) -> ::runit::Outcome {
            #body
        }
    })
}

/// Adapts a method's shape to an `Outcome`-typed call expression.
///
/// Accepts an optional `&TestContext` argument after the receiver, and either a unit return or a
/// `Result<(), E>` whose error converts into `runit::Failure`.
fn invocation(
    self_ty: &Type,
    method: &ImplItemFn,
    receiver: proc_macro2::TokenStream,
) -> syn::Result<proc_macro2::TokenStream> {
    let sig = &method.sig;
    let ident = &sig.ident;

    match sig.inputs.first() {
        Some(FnArg::Receiver(receiver)) if matches!(&*receiver.ty, Type::Reference(_)) => {}
        Some(FnArg::Receiver(receiver)) => {
            return Err(syn::Error::new_spanned(
                receiver,
                "test methods must take `&self` or `&mut self`, not `self` by value",
            ));
        }
        _ => {
            return Err(syn::Error::new_spanned(sig, "test methods must take `self` by reference"));
        }
    }

    let call = match sig.inputs.len() {
        1 => quote! {{
            let _ = cx;
            <#self_ty>::#ident(#receiver)
        }},
        2 => quote! { <#self_ty>::#ident(#receiver, cx) },
        _ => {
            return Err(syn::Error::new_spanned(
                &sig.inputs,
                "test methods take no arguments besides an optional `&TestContext`",
            ));
        }
    };

    Ok(match &sig.output {
        ReturnType::Default => quote! {
            #call;
            ::std::result::Result::Ok(())
        },
        ReturnType::Type(..) => quote! {
            ::std::result::Result::map_err(#call, ::std::convert::Into::into)
        },
    })
}
