use crate::{BindataError, Digest, RUNTIME_CRATE, file_stem, gate::gate};
use quote::{format_ident, quote};
use sha2::{Digest as _, Sha256};
use std::{
    fs::File,
    io::{self, BufWriter, ErrorKind, Read, Write},
    path::Path,
};

const CHUNK: usize = 64 * 1024;

/// Write the engine artifact at `from` into a gated source file at `to`.
///
/// The artifact is opened before the destination is touched, so a missing
/// artifact leaves nothing behind. A failure after that point can leave a
/// partially written file.
pub fn write_file(
    name: &str,
    pkg: &str,
    platform: &str,
    from: &Path,
    to: &Path,
) -> Result<Digest, BindataError> {
    let artifact = File::open(from).map_err(|source| BindataError::OpenArtifact {
        path: from.to_path_buf(),
        source,
    })?;

    let header = header(name, pkg, platform).map_err(|source| BindataError::Header {
        name: name.to_string(),
        source,
    })?;

    let file = File::create(to).map_err(|source| BindataError::Create {
        path: to.to_path_buf(),
        source,
    })?;

    let write_err = |source: io::Error| BindataError::Write {
        path: to.to_path_buf(),
        source,
    };

    let mut out = BufWriter::new(file);
    out.write_all(header.as_bytes()).map_err(write_err)?;
    out.write_all(b"\npub static DATA: &[u8] = b\"")
        .map_err(write_err)?;

    let digest = embed(artifact, &mut out, from, to)?;

    write!(
        out,
        "\";\n\n/// SHA-256 of [`DATA`].\npub const DIGEST: &str = \"{digest}\";\n"
    )
    .map_err(write_err)?;
    out.flush().map_err(write_err)?;

    Ok(digest)
}

// stream the artifact into the literal, hashing as it goes
fn embed<W: Write>(
    mut artifact: File,
    out: &mut W,
    from: &Path,
    to: &Path,
) -> Result<Digest, BindataError> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK];

    loop {
        let n = match artifact.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            // the caller's BufWriter flushes what was written when dropped
            Err(source) => {
                return Err(BindataError::ReadArtifact {
                    path: from.to_path_buf(),
                    source,
                });
            }
        };

        let chunk = &buf[..n];
        hasher.update(chunk);
        write_escaped(out, chunk).map_err(|source| BindataError::Write {
            path: to.to_path_buf(),
            source,
        })?;
    }

    let mut digest = [0u8; 32];
    digest.copy_from_slice(&hasher.finalize());

    Ok(Digest(digest))
}

fn write_escaped<W: Write>(out: &mut W, bytes: &[u8]) -> io::Result<()> {
    for byte in bytes {
        write!(out, "{}", byte.escape_ascii())?;
    }

    Ok(())
}

/// Everything above the `DATA` literal: banner, gate and unpack hook.
pub(crate) fn header(name: &str, pkg: &str, platform: &str) -> Result<String, syn::Error> {
    let banner = " Code generated by qgen. DO NOT EDIT.";
    let about = format!(" Query engine `{name}` for the `{pkg}` client module.");
    let gate = gate(name, platform);
    let runtime = format_ident!("{}", RUNTIME_CRATE);
    let hook = format_ident!("__qgen_unpack_{}", file_stem(name));

    let tokens = quote! {
        #![doc = #banner]
        #![doc = ""]
        #![doc = #about]
        #![cfg(#gate)]
        #![allow(unexpected_cfgs, clippy::all)]

        use ::#runtime::engine::unpack;

        #[::#runtime::__reexports::ctor::ctor]
        fn #hook() {
            unpack::unpack(DATA, #name);
        }
    };

    let file: syn::File = syn::parse2(tokens)?;

    Ok(prettyplease::unparse(&file))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Digest as _;
    use std::fs;

    fn embedded_bytes(source: &str) -> Vec<u8> {
        let file = syn::parse_file(source).unwrap();

        file.items
            .iter()
            .find_map(|item| match item {
                syn::Item::Static(item) if item.ident == "DATA" => match &*item.expr {
                    syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::ByteStr(lit),
                        ..
                    }) => Some(lit.value()),
                    _ => None,
                },
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn embedded_literal_reproduces_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("engine");
        let to = dir.path().join("query_engine_linux.rs");
        let bytes = [0x00, 0x01, 0xFF, b'"', b'\\', b'\n', b'a'];
        fs::write(&from, bytes).unwrap();

        let digest = write_file("linux", "db", "linux", &from, &to).unwrap();
        let source = fs::read_to_string(&to).unwrap();

        assert_eq!(embedded_bytes(&source), bytes);
        assert_eq!(digest.to_string(), hex::encode(Sha256::digest(bytes)));
        assert!(source.contains(&format!("pub const DIGEST: &str = \"{digest}\";")));
        assert!(source.starts_with("//! Code generated by qgen. DO NOT EDIT."));
        assert!(source.contains("unpack::unpack(DATA, \"linux\")"));
    }

    #[test]
    fn output_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("engine");
        fs::write(&from, b"engine-bytes").unwrap();

        let a = dir.path().join("a.rs");
        let b = dir.path().join("b.rs");
        write_file("darwin", "db", "darwin", &from, &a).unwrap();
        write_file("darwin", "db", "darwin", &from, &b).unwrap();

        assert_eq!(fs::read(a).unwrap(), fs::read(b).unwrap());
    }

    #[test]
    fn missing_artifact_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let to = dir.path().join("out.rs");

        let err = write_file("linux", "db", "linux", &dir.path().join("nope"), &to).unwrap_err();

        assert!(matches!(err, BindataError::OpenArtifact { .. }));
        assert!(!to.exists());
    }

    #[test]
    fn read_failure_leaves_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("artifact");
        fs::create_dir(&artifact).unwrap();
        let to = dir.path().join("out.rs");

        let err = write_file("linux", "db", "linux", &artifact, &to).unwrap_err();

        assert!(matches!(err, BindataError::ReadArtifact { .. }));
        let partial = fs::read_to_string(&to).unwrap();
        assert!(partial.contains("DO NOT EDIT"));
        assert!(!partial.contains("DIGEST"));
    }
}
