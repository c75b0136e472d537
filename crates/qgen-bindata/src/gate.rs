use crate::file_stem;
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

/// Special-purpose Linux builds. The generic `linux` engine file is gated
/// off for each of these so it never collides with a more specific file.
pub const LINUX_VARIANTS: &[&str] = &[
    "debian-openssl-1.0.x",
    "debian-openssl-1.1.x",
    "debian-openssl-3.0.x",
    "rhel-openssl-1.0.x",
    "rhel-openssl-1.1.x",
    "rhel-openssl-3.0.x",
    "linux-musl",
];

/// The operating-system family a platform name belongs to.
#[must_use]
pub fn platform_family(name: &str) -> &str {
    if LINUX_VARIANTS.contains(&name) || name.contains("debian") || name.contains("rhel") {
        "linux"
    } else {
        name
    }
}

/// Custom cfg flag that selects the engine for `name`, e.g.
/// `--cfg qgen_debian_openssl_1_1_x`.
#[must_use]
pub fn cfg_ident(name: &str) -> Ident {
    format_ident!("qgen_{}", file_stem(name))
}

/// Full cfg predicate for an engine file.
///
/// Combines the gate for the platform name itself, the family gate, and
/// the opt-out flags `qgen_ignore` and `qgen_codeanalysis`.
#[must_use]
pub fn gate(name: &str, platform: &str) -> TokenStream {
    let mut predicates = vec![name_gate(name)];

    if platform == "linux" {
        if name == "linux" {
            for variant in LINUX_VARIANTS {
                let flag = cfg_ident(variant);
                predicates.push(quote!(not(#flag)));
            }
        } else {
            predicates.push(quote!(target_os = "linux"));
        }
    }

    predicates.push(quote!(not(qgen_ignore)));
    predicates.push(quote!(not(qgen_codeanalysis)));

    quote!(all(#(#predicates),*))
}

fn name_gate(name: &str) -> TokenStream {
    match name {
        "linux" => quote!(target_os = "linux"),
        "windows" => quote!(target_os = "windows"),
        "darwin" => quote!(all(target_os = "macos", not(target_arch = "aarch64"))),
        "darwin-arm64" => quote!(all(target_os = "macos", target_arch = "aarch64")),
        other => {
            let flag = cfg_ident(other);
            quote!(#flag)
        }
    }
}

///
/// TESTS
///
