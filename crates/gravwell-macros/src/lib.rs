use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, Result, Type, parse_macro_input};

/// Derives `Default` for configuration structs from inline field defaults.
///
/// Fields annotated with `#[default(expr)]` are initialised with `expr`.
/// String fields accept string literals, which are converted with `Into`.
/// Fields without the attribute fall back to `Default::default()`, which is
/// how nested configuration sections pick up their own defaults.
///
/// # Example
/// ```
/// use gravwell_macros::ConfigDefaults;
///
/// #[derive(ConfigDefaults)]
/// pub struct FieldConfig {
///     #[default(50.0)]
///     pub field_scale_constant: f64,
///
///     #[default(15.0)]
///     pub grid_spacing: f64,
///
///     #[default("grey")]
///     pub palette: String,
///
///     // No attribute: uses `Vec::default()`
///     pub extra_colors: Vec<[u8; 3]>,
/// }
///
/// let config = FieldConfig::default();
/// assert_eq!(config.field_scale_constant, 50.0);
/// assert_eq!(config.grid_spacing, 15.0);
/// assert_eq!(config.palette, "grey");
/// assert!(config.extra_colors.is_empty());
/// ```
///
/// # Errors
///
/// Compilation fails if the macro is applied to anything other than a struct
/// with named fields, or if a `#[default()]` attribute is empty or malformed.
#[proc_macro_derive(ConfigDefaults, attributes(default))]
pub fn config_defaults(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(Error::new_spanned(
                    &input,
                    "ConfigDefaults only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input,
                "ConfigDefaults can only be derived for structs",
            ));
        }
    };

    let initialisers = fields
        .iter()
        .map(|field| {
            let Some(field_name) = field.ident.as_ref() else {
                return Err(Error::new_spanned(field, "expected a named field"));
            };

            let init = match default_expression(field)? {
                Some(value) if is_string(&field.ty) => {
                    quote! { #field_name: ::core::convert::Into::into(#value) }
                }
                Some(value) => quote! { #field_name: #value },
                None => quote! { #field_name: ::core::default::Default::default() },
            };

            Ok(init)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::core::default::Default for #name #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#initialisers),*
                }
            }
        }
    })
}

fn is_string(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "String"),
        _ => false,
    }
}

/// Returns the tokens inside `#[default(...)]`, or `None` when the field has
/// no such attribute.
fn default_expression(field: &syn::Field) -> Result<Option<proc_macro2::TokenStream>> {
    let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("default")) else {
        return Ok(None);
    };

    let field_name = field
        .ident
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();

    let tokens: proc_macro2::TokenStream = attr.parse_args().map_err(|e| {
        Error::new_spanned(
            attr,
            format!("failed to parse #[default(...)] on field '{field_name}': {e}"),
        )
    })?;

    if tokens.is_empty() {
        return Err(Error::new_spanned(
            attr,
            format!("field '{field_name}' has an empty #[default()] attribute"),
        ));
    }

    Ok(Some(tokens))
}
