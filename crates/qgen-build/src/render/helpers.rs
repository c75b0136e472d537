//! Filters and functions available to every fragment.

use convert_case::{Case, Casing};
use qgen_schema::{ast::Ast, node::Scalar};
use std::{collections::HashMap, sync::Arc};
use tera::{Tera, Value};

pub(crate) fn register(tera: &mut Tera, ast: &Arc<Ast>) {
    tera.register_filter("snake", snake);
    tera.register_filter("pascal", pascal);
    tera.register_filter("camel", camel);
    tera.register_filter("ident", ident);
    tera.register_filter("rust_type", rust_type);

    let query = Arc::clone(ast);
    tera.register_function(
        "output",
        move |args: &HashMap<String, Value>| -> tera::Result<Value> {
            let name = name_arg(args, "output")?;
            let field = query
                .query_field(name)
                .map_err(|err| tera::Error::msg(err.to_string()))?;

            Ok(tera::to_value(field)?)
        },
    );

    let inputs = Arc::clone(ast);
    tera.register_function(
        "input",
        move |args: &HashMap<String, Value>| -> tera::Result<Value> {
            let name = name_arg(args, "input")?;
            let input = inputs
                .input_type(name)
                .map_err(|err| tera::Error::msg(err.to_string()))?;

            Ok(tera::to_value(input)?)
        },
    );
}

fn string_value<'a>(value: &'a Value, filter: &str) -> tera::Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("filter `{filter}` expects a string, got {value}")))
}

fn name_arg<'a>(args: &'a HashMap<String, Value>, function: &str) -> tera::Result<&'a str> {
    args.get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| tera::Error::msg(format!("function `{function}` needs a string `name`")))
}

fn snake(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(string_value(value, "snake")?.to_case(Case::Snake)))
}

fn pascal(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(string_value(value, "pascal")?.to_case(Case::Pascal)))
}

fn camel(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(string_value(value, "camel")?.to_case(Case::Camel)))
}

// snake_case name usable as a Rust identifier; keywords become raw,
// path keywords that cannot be raw get a trailing underscore
fn ident(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let name = string_value(value, "ident")?.to_case(Case::Snake);
    let name = match name.as_str() {
        "self" | "super" | "crate" | "_" => format!("{name}_"),
        _ if syn::parse_str::<syn::Ident>(&name).is_ok() => name,
        _ => format!("r#{name}"),
    };

    Ok(Value::String(name))
}

fn rust_type(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let name = string_value(value, "rust_type")?;
    let scalar = Scalar::from_name(name)
        .ok_or_else(|| tera::Error::msg(format!("unknown scalar '{name}'")))?;

    Ok(Value::String(scalar.rust_type().to_string()))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type Filter = fn(&Value, &HashMap<String, Value>) -> tera::Result<Value>;

    fn apply(filter: Filter, input: &str) -> String {
        filter(&json!(input), &HashMap::new())
            .unwrap()
            .as_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn case_filters() {
        assert_eq!(apply(snake, "authorId"), "author_id");
        assert_eq!(apply(pascal, "created_at"), "CreatedAt");
        assert_eq!(apply(camel, "UserModel"), "userModel");
    }

    #[test]
    fn keywords_become_raw_identifiers() {
        assert_eq!(apply(ident, "type"), "r#type");
        assert_eq!(apply(ident, "match"), "r#match");
        assert_eq!(apply(ident, "createdAt"), "created_at");
    }

    #[test]
    fn path_keywords_get_a_suffix() {
        assert_eq!(apply(ident, "Self"), "self_");
        assert_eq!(apply(ident, "super"), "super_");
        assert_eq!(apply(ident, "Crate"), "crate_");
    }

    #[test]
    fn lookup_functions_return_values() {
        let json = include_str!("../../tests/fixtures/basic.json");
        let document = qgen_schema::load(json).unwrap();
        let ast = Arc::new(qgen_schema::build(&document).unwrap());
        let mut tera = tera::Tera::default();
        register(&mut tera, &ast);
        tera.add_raw_template(
            "t",
            "{{ output(name=\"findUniqueUser\").name }} \
             {{ input(name=\"UserWhereUniqueInput\").name }}",
        )
        .unwrap();

        let out = tera.render("t", &tera::Context::new()).unwrap();

        assert_eq!(out, "findUniqueUser UserWhereUniqueInput");
    }

    #[test]
    fn scalars_map_to_rust_types() {
        assert_eq!(apply(rust_type, "Int"), "i32");
        assert!(rust_type(&json!("Money"), &HashMap::new()).is_err());
    }
}
