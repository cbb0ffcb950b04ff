mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the `ErrorKind` trait from `canon-error` for the given struct.
///
/// The generated implementation builds an [`ariadne`] report, so the crate using this derive
/// must depend on both `ariadne` and `canon-error`.
///
/// The information of the error is customized using the `error` attribute:
///
/// ```
/// use canon_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("`{}` is reserved", name),
///     labels = ["this name"],
///     help = "pick another name",
/// )]
/// pub struct Reserved {
///     name: String,
/// }
/// ```
///
/// | Tag       | Description                                                                     |
/// | --------- | ------------------------------------------------------------------------------- |
/// | `message` | The message displayed at the top of the error, also used for `Display`.          |
/// | `labels`  | An array of label texts; the `i`-th label points at the `i`-th span of the error. |
/// | `help`    | Optional help text, describing what the user can do to fix the error.           |
///
/// For structs with named fields, each expression is evaluated with the fields of the struct in
/// scope. Tuple structs are not supported.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl canon_error::ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            #target
        }
    }.into()
}
