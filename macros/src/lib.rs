//! Derive macros for the task list reducer architecture
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Generates helpers for action enums (intents/events)
//!
//! # Example
//!
//! ```ignore
//! use tasklist_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TaskAction {
//!     #[intent]
//!     Create(CreateIntent),
//!
//!     #[event]
//!     ValidationFailed { error: ValidationError },
//! }
//!
//! // Generated methods:
//! assert!(TaskAction::Create(intent).is_intent());
//! assert_eq!(TaskAction::ValidationFailed { error }.event_type(), "ValidationFailed.v1");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Variant, parse_macro_input};

/// Derive macro for Action enums
///
/// Generates helper methods for action enums:
/// - `is_intent()` - Returns true if this variant is a user intent
/// - `is_event()` - Returns true if this variant is an event
/// - `event_type()` - Returns the event type name (`"<Variant>.v1"`)
/// - `variant_name()` - Returns the variant name, for logging
///
/// # Attributes
///
/// - `#[intent]` - Mark a variant as an intent
/// - `#[event]` - Mark a variant as an event
///
/// Unmarked variants are neither.
///
/// # Errors
///
/// Produces a compile error if:
/// - Applied to a non-enum type
/// - A variant has both `#[intent]` and `#[event]` attributes
#[proc_macro_derive(Action, attributes(intent, event))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(&input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut intent_arms = Vec::new();
    let mut event_arms = Vec::new();
    let mut event_type_arms = Vec::new();
    let mut name_arms = Vec::new();

    for variant in &data_enum.variants {
        let is_intent = has_attribute(&variant.attrs, "intent");
        let is_event = has_attribute(&variant.attrs, "event");

        if is_intent && is_event {
            return syn::Error::new_spanned(variant, "Variant cannot be both #[intent] and #[event]")
                .to_compile_error()
                .into();
        }

        let pattern = variant_pattern(variant);
        let variant_name = variant.ident.to_string();

        if is_intent {
            intent_arms.push(quote! { #pattern => true, });
        }

        if is_event {
            let type_name = format!("{variant_name}.v1");
            event_arms.push(quote! { #pattern => true, });
            event_type_arms.push(quote! { #pattern => #type_name, });
        }

        name_arms.push(quote! { #pattern => #variant_name, });
    }

    let expanded = quote! {
        impl #name {
            /// Returns true if this action is a user intent
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_intent(&self) -> bool {
                match self {
                    #(#intent_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action is an event
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_event(&self) -> bool {
                match self {
                    #(#event_arms)*
                    _ => false,
                }
            }

            /// Returns the event type name
            ///
            /// Only events have type names. Everything else returns "unknown".
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn event_type(&self) -> &'static str {
                match self {
                    #(#event_type_arms)*
                    _ => "unknown",
                }
            }

            /// Returns the variant name
            #[must_use]
            pub const fn variant_name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Match pattern ignoring the variant's fields
fn variant_pattern(variant: &Variant) -> TokenStream2 {
    let ident = &variant.ident;
    match &variant.fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
