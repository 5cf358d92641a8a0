use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, parse_macro_input};

use crate::derives::ensure_derives;

/// #[value_object] 宏实现
/// - 支持结构体（具名或 tuple）与枚举
/// - 补齐标准派生：Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let _ = attr; // 暂无参数
    let mut input = parse_macro_input!(item as Item);

    let defaults: Vec<syn::Path> = vec![
        syn::parse_quote!(Debug),
        syn::parse_quote!(Default),
        syn::parse_quote!(Clone),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(Eq),
    ];

    match &mut input {
        Item::Struct(st) => {
            ensure_derives(&mut st.attrs, &defaults);
            TokenStream::from(quote! { #st })
        }
        Item::Enum(en) => {
            ensure_derives(&mut en.attrs, &defaults);
            TokenStream::from(quote! { #en })
        }
        other => syn::Error::new(other.span(), "#[value_object] only supports struct or enum")
            .to_compile_error()
            .into(),
    }
}
