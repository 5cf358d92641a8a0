use proc_macro::TokenStream;
use quote::{ToTokens, quote};
use syn::Token;
use syn::punctuated::Punctuated;
use syn::{
    Expr, Item, ItemStruct, Result as SynResult, Type, parse::Parse, parse::ParseStream,
    parse_macro_input, spanned::Spanned,
};

/// #[entity] 宏实现
/// - 注入 `id: Option<IdType>` 与 `version: Option<Version>` 字段（若缺失）并置于最前；
/// - 实现 `::dao_domain::entity::Entity`：`TYPE` 默认为结构体名，可用 `name = "..."` 覆写；
/// - `id` 为空表示瞬时实体，`version` 由存储层在持久化时写回。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EntityAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity] only on struct")
                .to_compile_error()
                .into();
        }
    };

    // 仅支持具名字段
    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    // 确定主键类型与实体类型名
    let id_type = cfg.id_ty.unwrap_or_else(|| syn::parse_quote! { String });
    let type_name = cfg
        .name
        .unwrap_or_else(|| syn::LitStr::new(&st.ident.to_string(), st.ident.span()));

    // 重建字段顺序：id、version 放最前，其余保持原有相对顺序
    let mut new_named: Punctuated<syn::Field, Token![,]> = Punctuated::new();

    let existed_id = fields_named
        .named
        .iter()
        .find(|f| f.ident.as_ref().map(|i| i == "id").unwrap_or(false))
        .cloned();

    let existed_version = fields_named
        .named
        .iter()
        .find(|f| f.ident.as_ref().map(|i| i == "version").unwrap_or(false))
        .cloned();

    if let Some(f) = existed_id {
        new_named.push(f);
    } else {
        new_named.push(syn::parse_quote! { id: ::core::option::Option<#id_type> });
    }

    if let Some(f) = existed_version {
        new_named.push(f);
    } else {
        new_named.push(syn::parse_quote! {
            version: ::core::option::Option<::dao_domain::value_object::Version>
        });
    }

    for f in fields_named.named.clone().into_iter() {
        let is_id_or_version = f
            .ident
            .as_ref()
            .map(|i| i == "id" || i == "version")
            .unwrap_or(false);
        if !is_id_or_version {
            new_named.push(f);
        }
    }

    fields_named.named = new_named;

    let out_struct = ItemStruct { ..st };

    let ident = &out_struct.ident;
    let generics = out_struct.generics.clone();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        #out_struct

        impl #impl_generics ::dao_domain::entity::Entity for #ident #ty_generics #where_clause {
            type Key = #id_type;

            const TYPE: &'static str = #type_name;

            fn id(&self) -> ::core::option::Option<&Self::Key> {
                self.id.as_ref()
            }

            fn version(&self) -> ::core::option::Option<::dao_domain::value_object::Version> {
                self.version
            }

            fn assign_identity(&mut self, id: Self::Key) {
                self.id = ::core::option::Option::Some(id);
            }

            fn set_version(&mut self, version: ::dao_domain::value_object::Version) {
                self.version = ::core::option::Option::Some(version);
            }
        }
    };

    TokenStream::from(expanded)
}

// 解析 entity 宏键值参数：id = <Type>、name = "<str>"
struct EntityAttrConfig {
    id_ty: Option<Type>,
    name: Option<syn::LitStr>,
}

impl Parse for EntityAttrConfig {
    fn parse(input: ParseStream) -> SynResult<Self> {
        let mut id_ty: Option<Type> = None;
        let mut name: Option<syn::LitStr> = None;

        if input.is_empty() {
            return Ok(Self { id_ty, name });
        }

        let pairs: Punctuated<syn::ExprAssign, Token![,]> =
            Punctuated::<syn::ExprAssign, Token![,]>::parse_terminated(input)?;

        for assign in pairs.into_iter() {
            let key_ident = match *assign.left {
                syn::Expr::Path(p) if p.path.segments.len() == 1 => {
                    p.path.segments[0].ident.clone()
                }
                other => {
                    return Err(syn::Error::new(other.span(), "invalid attribute key"));
                }
            };
            match key_ident.to_string().as_str() {
                "id" => {
                    if id_ty.is_some() {
                        return Err(syn::Error::new(
                            key_ident.span(),
                            "duplicate key 'id' in attribute",
                        ));
                    }
                    let ty_parsed: Type = syn::parse2(assign.right.to_token_stream())?;
                    id_ty = Some(ty_parsed);
                }
                "name" => {
                    if name.is_some() {
                        return Err(syn::Error::new(
                            key_ident.span(),
                            "duplicate key 'name' in attribute",
                        ));
                    }
                    let lit = match *assign.right {
                        Expr::Lit(syn::ExprLit {
                            lit: syn::Lit::Str(lit),
                            ..
                        }) => lit,
                        other => {
                            return Err(syn::Error::new(
                                other.span(),
                                "expected string literal for 'name'",
                            ));
                        }
                    };
                    name = Some(lit);
                }
                _ => {
                    return Err(syn::Error::new(
                        key_ident.span(),
                        "unknown key; expected 'id' | 'name'",
                    ));
                }
            }
        }

        Ok(Self { id_ty, name })
    }
}
