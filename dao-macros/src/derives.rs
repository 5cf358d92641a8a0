use syn::punctuated::Punctuated;
use syn::{Attribute, Path, Token, parse_quote};

/// 把缺失的默认派生并入目标的 `#[derive(...)]`。
///
/// 使用方自带的派生原样保留且优先排列，默认派生仅在缺席时追加；
/// 重复与否按路径末段判断，因此 `serde::Serialize` 与 `Serialize`
/// 视为同一派生。合并结果收敛为单个 derive 属性，置于其余属性之前。
pub(crate) fn ensure_derives(attrs: &mut Vec<Attribute>, defaults: &[Path]) {
    let mut rest = Vec::with_capacity(attrs.len());
    let mut merged: Vec<Path> = Vec::new();

    for attr in attrs.drain(..) {
        if !attr.path().is_ident("derive") {
            rest.push(attr);
            continue;
        }
        if let Ok(listed) = attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated) {
            merged.extend(listed);
        }
    }

    for default in defaults {
        if !merged.iter().any(|present| same_derive(present, default)) {
            merged.push(default.clone());
        }
    }

    attrs.push(parse_quote!(#[derive(#(#merged),*)]));
    attrs.append(&mut rest);
}

fn same_derive(a: &Path, b: &Path) -> bool {
    match (a.segments.last(), b.segments.last()) {
        (Some(x), Some(y)) => x.ident == y.ident,
        _ => false,
    }
}
