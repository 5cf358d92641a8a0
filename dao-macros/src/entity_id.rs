use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Fields, Item, parse_macro_input};

use crate::derives::ensure_derives;

/// #[entity_id] 宏实现
/// 面向 `struct TaskId(Uuid);` 这类单字段 tuple struct 的主键包装：
/// 补齐标准派生，生成 `new` 构造、与内部类型的双向转换，
/// 并把 `Display`/`FromStr` 委托给内部类型。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let _ = attr; // 暂无参数
    let mut st = match parse_macro_input!(item as Item) {
        Item::Struct(st) => st,
        other => {
            return syn::Error::new(other.span(), "#[entity_id] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let inner_ty = match &st.fields {
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => fields.unnamed[0].ty.clone(),
        other => {
            return syn::Error::new(
                other.span(),
                "#[entity_id] expects a tuple struct with exactly one field, e.g., struct X(String);",
            )
            .to_compile_error()
            .into();
        }
    };

    ensure_derives(
        &mut st.attrs,
        &[
            syn::parse_quote!(Debug),
            syn::parse_quote!(Default),
            syn::parse_quote!(Clone),
            syn::parse_quote!(PartialEq),
            syn::parse_quote!(Eq),
            syn::parse_quote!(Hash),
            syn::parse_quote!(serde::Serialize),
            syn::parse_quote!(serde::Deserialize),
        ],
    );

    let ident = &st.ident;

    let out = quote! {
        #st

        impl #ident {
            pub fn new(value: #inner_ty) -> Self {
                Self(value)
            }
        }

        impl ::core::convert::From<#inner_ty> for #ident {
            fn from(value: #inner_ty) -> Self {
                Self(value)
            }
        }

        impl ::core::convert::From<#ident> for #inner_ty {
            fn from(id: #ident) -> Self {
                id.0
            }
        }

        impl ::core::convert::AsRef<#inner_ty> for #ident {
            fn as_ref(&self) -> &#inner_ty {
                &self.0
            }
        }

        // 键以 Display 形式落到存储列，与内部类型保持同一字符串表示
        impl ::std::fmt::Display for #ident {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::std::str::FromStr for #ident {
            type Err = <#inner_ty as ::std::str::FromStr>::Err;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                s.parse::<#inner_ty>().map(Self)
            }
        }
    };

    TokenStream::from(out)
}
