mod document;

use proc_macro::TokenStream;

/// Derive macro for the `Document` trait.
///
/// Implements `Document` using a struct-level `#[document(collection = "...")]`
/// attribute (defaults to the snake_case struct name plus `s`) and the field
/// marked `#[document(id)]` (defaults to a field named `id`).
///
/// Fields marked `#[document(unique)]` become unique keys of the collection:
/// the store rejects a second document carrying the same value. The field type
/// must implement `UniqueValue` (`String` and `Option<String>` do; `None` and
/// empty strings are not indexed).
///
/// # Example
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Document)]
/// #[document(collection = "branches")]
/// struct Branch {
///     id: String,
///     #[document(unique)]
///     branch_short_id: Option<String>,
///     #[document(unique)]
///     branch_email: String,
/// }
/// ```
#[proc_macro_derive(Document, attributes(document))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    document::derive_document(input)
}
