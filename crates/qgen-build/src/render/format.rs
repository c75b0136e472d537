//! Formatting that keeps fragment markers.
//!
//! `prettyplease` prints from the syntax tree and drops plain `//`
//! comments, so each marker-delimited segment is printed on its own and the
//! markers are written back between them.

const MARKER_PREFIX: &str = "// --- fragment ";
const MARKER_SUFFIX: &str = " ---";

/// Marker line that precedes the output of `fragment`.
#[must_use]
pub fn marker(fragment: &str) -> String {
    format!("{MARKER_PREFIX}{fragment}{MARKER_SUFFIX}")
}

fn is_marker(line: &str) -> bool {
    let line = line.trim();

    line.starts_with(MARKER_PREFIX) && line.ends_with(MARKER_SUFFIX)
}

/// Parse the whole buffer, then pretty-print it segment by segment.
pub fn format_source(source: &str) -> Result<String, syn::Error> {
    syn::parse_file(source)?;

    let mut out = String::with_capacity(source.len());
    let mut segment = String::new();

    for line in source.lines() {
        if is_marker(line) {
            print_segment(&segment, &mut out)?;
            segment.clear();

            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(line.trim());
            out.push('\n');
        } else {
            segment.push_str(line);
            segment.push('\n');
        }
    }
    print_segment(&segment, &mut out)?;

    Ok(out)
}

fn print_segment(segment: &str, out: &mut String) -> Result<(), syn::Error> {
    let file = syn::parse_file(segment)?;
    out.push_str(&prettyplease::unparse(&file));

    Ok(())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_survive_formatting() {
        let source = format!(
            "//! generated\nuse std::fmt;\n{}\npub struct   A{{x:u8}}\n{}\nfn b( ) {{}}\n",
            marker("a.rs.tera"),
            marker("b.rs.tera"),
        );

        let formatted = format_source(&source).unwrap();

        let a = formatted.find("// --- fragment a.rs.tera ---").unwrap();
        let b = formatted.find("// --- fragment b.rs.tera ---").unwrap();
        assert!(a < b);
        assert!(formatted.contains("pub struct A {\n    x: u8,\n}"));
        assert!(formatted.contains("fn b() {}"));
        assert!(formatted.starts_with("//! generated\n"));
    }

    #[test]
    fn formatting_is_stable() {
        let source = format!("fn a() {{}}\n{}\nfn b() {{}}\n", marker("b.rs.tera"));
        let once = format_source(&source).unwrap();

        assert_eq!(format_source(&once).unwrap(), once);
    }

    #[test]
    fn invalid_source_is_rejected() {
        assert!(format_source("fn broken(").is_err());
    }
}
