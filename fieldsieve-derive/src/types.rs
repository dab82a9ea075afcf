//! Type inspection helpers for the derive macro.

/// Recognizes marker fields: a path type whose last segment is `PhantomData`
/// with type arguments, however the path is qualified.
///
/// Such fields are left out of rendering, schemas and field metadata, and
/// impose no `Filterable` bound on their parameters.
pub(crate) fn is_phantom_data(ty: &syn::Type) -> bool {
    let syn::Type::Path(type_path) = ty else {
        return false;
    };
    type_path.qself.is_none()
        && type_path.path.segments.last().is_some_and(|segment| {
            segment.ident == "PhantomData"
                && matches!(segment.arguments, syn::PathArguments::AngleBracketed(_))
        })
}
