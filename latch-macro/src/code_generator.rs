//! Expansion of a validated `machine!` declaration into the machine
//! struct, its tag enum, and the trait impls `latch-core` dispatches
//! through.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Error as SynError, Ident, Result as SynResult};

use crate::MachineInputAst;

// Snake-case names that cannot become struct fields.
const RESERVED_FIELD_NAMES: &[&str] = &["current", "crate", "self", "super"];

pub(crate) fn generate_machine(ast: &MachineInputAst) -> SynResult<TokenStream> {
    validate(ast)?;

    let machine_name = &ast.name;
    let state_id_enum_name = Ident::new(
        &format!("{machine_name}StateId"),
        machine_name.span(),
    );

    let state_variants: Vec<&Ident> = ast.states.iter().collect();
    let state_fields: Vec<Ident> = ast
        .states
        .iter()
        .map(|state| Ident::new_raw(&to_snake_case(&state.to_string()), state.span()))
        .collect();
    let initial_variant = state_variants[0];

    // --- Tag enum ---
    let state_id_enum_ts = quote! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum #state_id_enum_name {
            #(#state_variants),*
        }
    };

    // --- Machine struct ---
    let machine_struct_ts = quote! {
        pub struct #machine_name {
            #(#state_fields: #state_variants,)*
            current: #state_id_enum_name,
        }
    };

    // --- Inherent impl ---
    let name_arms: Vec<TokenStream> = state_variants
        .iter()
        .zip(&state_fields)
        .map(|(variant, field)| {
            quote! {
                #state_id_enum_name::#variant => latch_core::State::name(&self.#field),
            }
        })
        .collect();
    let exit_arms: Vec<TokenStream> = state_variants
        .iter()
        .zip(&state_fields)
        .map(|(variant, field)| {
            quote! {
                #state_id_enum_name::#variant => latch_core::State::on_exit(&mut self.#field),
            }
        })
        .collect();
    let enter_arms: Vec<TokenStream> = state_variants
        .iter()
        .zip(&state_fields)
        .map(|(variant, field)| {
            quote! {
                #state_id_enum_name::#variant => latch_core::State::on_enter(&mut self.#field),
            }
        })
        .collect();

    let inherent_impl_ts = quote! {
        #[allow(dead_code)]
        impl #machine_name {
            /// Builds every declared state and selects the first declared
            /// state as current. No enter/exit hooks fire.
            #[must_use]
            pub fn new() -> Self {
                Self {
                    #(#state_fields: ::core::default::Default::default(),)*
                    current: #state_id_enum_name::#initial_variant,
                }
            }

            /// Routes `event` to the current state's handler resolution and
            /// applies the outcome. Unhandled events are silently ignored.
            pub fn dispatch<E>(&mut self, event: &E)
            where
                E: latch_core::Event,
                Self: latch_core::Dispatch<E>,
            {
                <Self as latch_core::Dispatch<E>>::dispatch(self, event);
            }

            /// Forces a transition to declared state `S`, running exit and
            /// enter hooks exactly as an event-driven transition would.
            pub fn transition<S>(&mut self)
            where
                S: latch_core::State,
                Self: latch_core::Contains<S>,
            {
                <Self as latch_core::Contains<S>>::transition(self);
            }

            /// Shared access to the owned instance of declared state `S`.
            pub fn state_ref<S>(&self) -> &S
            where
                S: latch_core::State,
                Self: latch_core::Contains<S>,
            {
                <Self as latch_core::Contains<S>>::state_ref(self)
            }

            /// Exclusive access to the owned instance of declared state `S`.
            pub fn state_mut<S>(&mut self) -> &mut S
            where
                S: latch_core::State,
                Self: latch_core::Contains<S>,
            {
                <Self as latch_core::Contains<S>>::state_mut(self)
            }

            /// Tag of the current state.
            #[must_use]
            pub fn state(&self) -> #state_id_enum_name {
                self.current
            }

            /// Name of the current state instance.
            #[must_use]
            pub fn current_state_name(&self) -> &'static str {
                match self.current {
                    #(#name_arms)*
                }
            }

            fn exit_current(&mut self) {
                match self.current {
                    #(#exit_arms)*
                }
            }

            fn enter_current(&mut self) {
                match self.current {
                    #(#enter_arms)*
                }
            }
        }

        impl ::core::default::Default for #machine_name {
            fn default() -> Self {
                Self::new()
            }
        }
    };

    // --- StateMachine impl ---
    let state_machine_impl_ts = quote! {
        impl latch_core::StateMachine for #machine_name {
            type StateId = #state_id_enum_name;

            fn state(&self) -> #state_id_enum_name {
                self.current
            }

            fn state_name(&self) -> &'static str {
                self.current_state_name()
            }
        }
    };

    // --- Contains impl per declared state ---
    let mut contains_impls = Vec::new();
    for (variant, field) in state_variants.iter().zip(&state_fields) {
        contains_impls.push(quote! {
            impl latch_core::Contains<#variant> for #machine_name {
                fn state_ref(&self) -> &#variant {
                    &self.#field
                }

                fn state_mut(&mut self) -> &mut #variant {
                    &mut self.#field
                }

                fn transition(&mut self) {
                    latch_core::trace!(
                        "[TRANSITION] {} -> {}",
                        self.current_state_name(),
                        latch_core::State::name(&self.#field)
                    );
                    self.exit_current();
                    self.current = #state_id_enum_name::#variant;
                    self.enter_current();
                }
            }
        });
    }

    // --- Dispatch impl per declared event ---
    let mut dispatch_impls = Vec::new();
    for event in &ast.events {
        let event_name = event.to_string();
        let mut match_arms = Vec::new();
        for (variant, field) in state_variants.iter().zip(&state_fields) {
            match_arms.push(quote! {
                #state_id_enum_name::#variant => {
                    let outcome = latch_core::Resolver::new(&mut self.#field, event).resolve();
                    latch_core::Transition::execute(outcome, self);
                }
            });
        }
        dispatch_impls.push(quote! {
            impl latch_core::Dispatch<#event> for #machine_name {
                fn dispatch(&mut self, event: &#event) {
                    // Which of the two resolutions fires is decided per match
                    // arm; either trait may end up unused in a given machine.
                    #[allow(unused_imports)]
                    use latch_core::{ResolveHandled as _, ResolveIgnored as _};

                    latch_core::trace!(
                        "[EVENT] {} received in state {}",
                        #event_name,
                        self.current_state_name()
                    );
                    match self.current {
                        #(#match_arms)*
                    }
                }
            }
        });
    }

    Ok(quote! {
        #state_id_enum_ts
        #machine_struct_ts
        #inherent_impl_ts
        #state_machine_impl_ts
        #(#contains_impls)*
        #(#dispatch_impls)*
    })
}

fn validate(ast: &MachineInputAst) -> SynResult<()> {
    if ast.states.is_empty() {
        return Err(SynError::new(
            ast.states_bracket_token.span.join(),
            "Machine must declare at least one state. The first state in the list is the initial state.",
        ));
    }

    let mut seen_states = std::collections::HashSet::new();
    for state in &ast.states {
        if !seen_states.insert(state.to_string()) {
            return Err(SynError::new(
                state.span(),
                format!("Duplicate state '{state}' in states list."),
            ));
        }
    }

    let mut seen_events = std::collections::HashSet::new();
    for event in &ast.events {
        if !seen_events.insert(event.to_string()) {
            return Err(SynError::new(
                event.span(),
                format!("Duplicate event '{event}' in events list."),
            ));
        }
    }

    let mut seen_fields: std::collections::HashMap<String, &Ident> = std::collections::HashMap::new();
    for state in &ast.states {
        let field = to_snake_case(&state.to_string());
        if RESERVED_FIELD_NAMES.contains(&field.as_str()) {
            return Err(SynError::new(
                state.span(),
                format!(
                    "State '{state}' would generate the reserved field name '{field}'. Rename the state."
                ),
            ));
        }
        if let Some(previous) = seen_fields.insert(field.clone(), state) {
            return Err(SynError::new(
                state.span(),
                format!(
                    "States '{previous}' and '{state}' would generate the same field name '{field}'. Rename one of them."
                ),
            ));
        }
    }

    Ok(())
}

fn to_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_is_lower =
                i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let next_is_lower = i + 1 < chars.len() && chars[i + 1].is_lowercase();
            if i > 0 && (prev_is_lower || next_is_lower) {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
