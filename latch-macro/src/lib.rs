//! # Latch Declaration Macros
//!
//! The `machine!` declaration DSL plus the `State` and `Event` derives.
//! Everything here expands to code against `latch-core`'s traits; consumers
//! normally use the re-exports from that crate rather than depending on
//! this one directly.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    bracketed,
    parse::{Parse, ParseStream},
    parse_macro_input, DeriveInput, Ident, LitStr, Result, Token,
};

mod code_generator;

// Keywords for the machine! header
mod keywords {
    syn::custom_keyword!(name);
    syn::custom_keyword!(states);
    syn::custom_keyword!(events);
}

/// Parsed form of a `machine!` invocation:
///
/// ```text
/// machine! {
///     name: Door,
///     states: [Closed, Open],
///     events: [OpenEvent, CloseEvent],
/// }
/// ```
#[derive(Debug)]
#[allow(dead_code)]
struct MachineInputAst {
    name_keyword_token: keywords::name,
    name: Ident,
    states_keyword_token: keywords::states,
    states_bracket_token: syn::token::Bracket,
    states: Vec<Ident>,
    events_keyword_token: keywords::events,
    events_bracket_token: syn::token::Bracket,
    events: Vec<Ident>,
}

impl Parse for MachineInputAst {
    fn parse(input: ParseStream) -> Result<Self> {
        let name_keyword_token: keywords::name = input.parse()?;
        input.parse::<Token![:]>()?;
        let name: Ident = input.parse()?;
        input.parse::<Token![,]>()?;

        let states_keyword_token: keywords::states = input.parse()?;
        input.parse::<Token![:]>()?;
        let states_content;
        let states_bracket_token = bracketed!(states_content in input);
        let states: Vec<Ident> = states_content
            .parse_terminated(Ident::parse, Token![,])?
            .into_iter()
            .collect();
        input.parse::<Token![,]>()?;

        let events_keyword_token: keywords::events = input.parse()?;
        input.parse::<Token![:]>()?;
        let events_content;
        let events_bracket_token = bracketed!(events_content in input);
        let events: Vec<Ident> = events_content
            .parse_terminated(Ident::parse, Token![,])?
            .into_iter()
            .collect();

        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }

        if !input.is_empty() {
            return Err(input.error(
                "Unexpected tokens after 'events' list. Expected 'name:', 'states: [..]', 'events: [..]' and nothing else.",
            ));
        }

        Ok(MachineInputAst {
            name_keyword_token,
            name,
            states_keyword_token,
            states_bracket_token,
            states,
            events_keyword_token,
            events_bracket_token,
            events,
        })
    }
}

/// Declares a state machine over a closed set of state and event types.
///
/// Expands to the machine struct (one eagerly-constructed field per
/// declared state plus the current-state tag), a `{Name}StateId` tag enum,
/// and impls of `latch_core::{StateMachine, Dispatch, Contains}`. The
/// first state in the list is the initial state. Each declared type must
/// satisfy its contract (`State`/`Event`); the generated bounds reject
/// anything else when the consuming program is compiled.
#[proc_macro]
pub fn machine(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as MachineInputAst);

    match code_generator::generate_machine(&ast) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

/// Implements `latch_core::State` with `name()` equal to the type's own
/// name, overridable via `#[state(name = "...")]`. States that override the
/// enter/exit hooks implement the trait by hand instead.
#[proc_macro_derive(State, attributes(state))]
pub fn derive_state(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_derive_state(&input) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand_derive_state(input: &DeriveInput) -> Result<proc_macro2::TokenStream> {
    let mut name_override: Option<LitStr> = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("state") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name_override = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("Unknown 'state' attribute. Expected 'name = \"...\"'."))
            }
        })?;
    }

    let ident = &input.ident;
    let name = name_override.unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics latch_core::State for #ident #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                #name
            }
        }
    })
}

/// Implements the `latch_core::Event` marker.
#[proc_macro_derive(Event)]
pub fn derive_event(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let tokens = quote! {
        impl #impl_generics latch_core::Event for #ident #ty_generics #where_clause {}
    };
    tokens.into()
}
