use qgen_build::{
    DEFAULT_TEMPLATE_DIR, EngineModule, RenderError, Root, TemplateSet, marker, render,
};
use qgen_config::{GeneratorConfig, apply_defaults};
use std::{fs, path::Path};

const FIXTURE: &str = include_str!("fixtures/basic.json");

const HEADER: &str = "//! generated\n\nuse std::fmt;\n";

fn root(engines: Vec<EngineModule>) -> Root {
    root_from(FIXTURE, engines)
}

fn root_from(json: &str, engines: Vec<EngineModule>) -> Root {
    let document = qgen_schema::load(json).unwrap();
    let ast = qgen_schema::build(&document).unwrap();
    let config = GeneratorConfig {
        output: "db".into(),
        ..GeneratorConfig::default()
    };

    Root::new(apply_defaults(&config), ast, engines)
}

fn template_dir(fragments: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();

    for (name, content) in fragments {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    dir
}

fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("missing `{needle}` in:\n{haystack}"))
}

#[test]
fn default_templates_render_the_fixture() {
    let source = render(Path::new(DEFAULT_TEMPLATE_DIR), &root(Vec::new())).unwrap();

    syn::parse_file(&source).unwrap();
    assert!(source.starts_with("//! Code generated by qgen. DO NOT EDIT."));

    let client = position(&source, &marker("client.rs.tera"));
    let enums = position(&source, &marker("enums.rs.tera"));
    let models = position(&source, &marker("models.rs.tera"));
    let query = position(&source, &marker("query.rs.tera"));
    let raw = position(&source, &marker("raw.rs.tera"));
    assert!(client < enums && enums < models && models < query && query < raw);
    assert!(!source.contains("_macros"));

    assert!(source.contains("pub struct UserModel"));
    assert!(source.contains("pub enum Role"));
    assert!(source.contains("\"findUniqueUser\""));
    assert!(source.contains("\"findManyPost\""));
    assert!(source.contains("pub fn title_author_id("));
    assert!(source.contains("pub fn query_raw"));
}

#[test]
fn keyword_model_names_become_raw_modules() {
    let json = FIXTURE.replace("Post", "Type");
    let source = render(Path::new(DEFAULT_TEMPLATE_DIR), &root_from(&json, Vec::new())).unwrap();

    syn::parse_file(&source).unwrap();
    assert!(source.contains("pub mod r#type {"));
    assert!(source.contains("r#type::Actions"));
    assert!(!source.contains("pub mod type "));
}

#[test]
fn rendering_is_deterministic() {
    let root = root(Vec::new());
    let dir = Path::new(DEFAULT_TEMPLATE_DIR);

    assert_eq!(render(dir, &root).unwrap(), render(dir, &root).unwrap());
}

#[test]
fn header_declares_engine_modules() {
    let source = render(
        Path::new(DEFAULT_TEMPLATE_DIR),
        &root(vec![EngineModule::new("linux"), EngineModule::new("darwin-arm64")]),
    )
    .unwrap();

    assert!(source.contains("#[path = \"query_engine_linux.rs\"]"));
    assert!(source.contains("mod query_engine_linux;"));
    assert!(source.contains("mod query_engine_darwin_arm64;"));
}

#[test]
fn private_fragments_are_never_emitted() {
    let dir = template_dir(&[
        ("_header.rs.tera", HEADER),
        ("b.rs.tera", "{% include \"_helper.rs.tera\" %}\nfn b() {}\n"),
        ("a.rs.tera", "fn a() {}\n"),
        ("_helper.rs.tera", "fn helper() {}\n"),
    ]);

    let source = render(dir.path(), &root(Vec::new())).unwrap();

    let a = position(&source, &marker("a.rs.tera"));
    let b = position(&source, &marker("b.rs.tera"));
    assert!(a < b);
    assert!(!source.contains(&marker("_helper.rs.tera")));
    assert_eq!(source.matches("fn helper()").count(), 1);
}

#[test]
fn nested_fragments_sort_by_path() {
    let dir = template_dir(&[
        ("_header.rs.tera", HEADER),
        ("z.rs.tera", "fn z() {}\n"),
        ("models/a.rs.tera", "fn nested() {}\n"),
        ("models/_private.rs.tera", "fn private() {}\n"),
    ]);

    let set = TemplateSet::discover(dir.path()).unwrap();
    assert_eq!(
        set.emitting().collect::<Vec<_>>(),
        ["models/a.rs.tera", "z.rs.tera"]
    );

    let source = render(dir.path(), &root(Vec::new())).unwrap();
    let nested = position(&source, &marker("models/a.rs.tera"));
    assert!(nested < position(&source, &marker("z.rs.tera")));
    assert!(!source.contains("fn private()"));
}

#[test]
fn invalid_fragment_is_named() {
    let dir = template_dir(&[
        ("_header.rs.tera", HEADER),
        ("a.rs.tera", "fn a() {}\n"),
        ("b.rs.tera", "fn broken(\n"),
    ]);

    let err = render(dir.path(), &root(Vec::new())).unwrap_err();

    match err {
        RenderError::Syntax {
            fragment, buffer, ..
        } => {
            assert_eq!(fragment, "b.rs.tera");
            assert!(buffer.contains("fn a() {}"));
            assert!(buffer.contains("fn broken("));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_header_is_fatal() {
    let dir = template_dir(&[("a.rs.tera", "fn a() {}\n")]);

    let err = render(dir.path(), &root(Vec::new())).unwrap_err();

    assert!(matches!(err, RenderError::MissingHeader(_)));
}

#[test]
fn unknown_query_field_aborts_rendering() {
    let dir = template_dir(&[
        ("_header.rs.tera", HEADER),
        (
            "a.rs.tera",
            "{% set op = output(name=\"findUniqueUser\") %}\
             const A: &str = \"{{ op.name }}\";\n",
        ),
        (
            "b.rs.tera",
            "{% set op = output(name=\"findUniqueComment\") %}\
             const B: &str = \"{{ op.name }}\";\n",
        ),
    ]);

    let err = render(dir.path(), &root(Vec::new())).unwrap_err();

    match err {
        RenderError::Execute { fragment, message } => {
            assert_eq!(fragment, "b.rs.tera");
            assert!(message.contains("no such key found: findUniqueComment"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn input_lookup_exposes_fields() {
    let dir = template_dir(&[
        ("_header.rs.tera", HEADER),
        (
            "a.rs.tera",
            "{% set unique = input(name=\"UserWhereUniqueInput\") %}\
             {% for field in unique.fields %}fn {{ field.name | ident }}() {}\n{% endfor %}",
        ),
    ]);

    let source = render(dir.path(), &root(Vec::new())).unwrap();

    assert!(source.contains("fn id() {}"));
    assert!(source.contains("fn email() {}"));
}
