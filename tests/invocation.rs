use ferrous_wire::{ContainerBuilder, DiError, DiResult, Lifetime};
use std::cell::Cell;
use std::sync::Arc;

struct Database {
    url: String,
}

fn database_container() -> ferrous_wire::Container {
    let mut builder = ContainerBuilder::new();
    builder
        .register_instance(Arc::new(Database {
            url: "postgres://localhost".to_string(),
        }))
        .unwrap();
    builder.register_instance(3u32).unwrap();
    builder.build()
}

#[test]
fn test_resolve_runs_function_with_resolved_arguments() {
    let container = database_container();
    let seen = Cell::new(None);

    container
        .resolve(|db: Arc<Database>, retries: u32| seen.set(Some((db.url.clone(), retries))))
        .unwrap();

    assert_eq!(seen.take(), Some(("postgres://localhost".to_string(), 3)));
}

#[test]
fn test_resolve_passes_function_error_through() {
    let container = database_container();
    let failure = DiError::custom("migration failed");
    let returned = failure.clone();

    let err = container
        .resolve(move |_: Arc<Database>| -> DiResult<()> { Err(returned.clone()) })
        .unwrap_err();

    assert!(err.is_same_propagated(&failure));
}

#[test]
fn test_resolve_accepts_bare_error_output() {
    let container = database_container();

    let err = container
        .resolve(|| DiError::custom("bare"))
        .unwrap_err();
    assert_eq!(err.to_string(), "bare");
}

#[test]
fn test_resolve_rejects_value_outputs_before_calling() {
    let container = database_container();
    let called = Cell::new(false);

    let err = container
        .resolve(|db: Arc<Database>| {
            called.set(true);
            db.url.len()
        })
        .unwrap_err();

    assert!(matches!(
        err,
        DiError::InvalidInvocationSignature("func must return either nothing or an error")
    ));
    assert!(!called.get());

    let err = container
        .resolve(|| -> DiResult<u32> { Ok(1) })
        .unwrap_err();
    assert!(matches!(err, DiError::InvalidInvocationSignature(_)));
}

#[test]
fn test_resolve_unresolvable_parameter_skips_call() {
    struct Missing;

    let container = database_container();
    let called = Cell::new(false);

    let err = container
        .resolve(|_: Arc<Database>, _: Arc<Missing>| called.set(true))
        .unwrap_err();

    assert!(matches!(err, DiError::Unresolved(name) if name.contains("Missing")));
    assert!(!called.get());
}

#[test]
fn test_resolve_with_result_returns_value() {
    let container = database_container();

    let url = container
        .resolve_with_result(|db: Arc<Database>| db.url.clone())
        .unwrap();
    assert_eq!(url, "postgres://localhost");

    let sum = container
        .resolve_with_result(|a: u32, b: u32| a + b)
        .unwrap();
    assert_eq!(sum, 6);
}

#[test]
fn test_resolve_with_result_rejects_empty_and_error_outputs() {
    let container = database_container();
    let called = Cell::new(false);

    let err = container
        .resolve_with_result(|| called.set(true))
        .unwrap_err();
    assert!(matches!(
        err,
        DiError::InvalidInvocationSignature("func must return something")
    ));

    let err = container
        .resolve_with_result(|| -> DiResult<()> { Ok(()) })
        .unwrap_err();
    assert!(matches!(
        err,
        DiError::InvalidInvocationSignature("the first value returned must not be an error")
    ));
    assert!(!called.get());
}

#[test]
fn test_resolve_with_result_rejects_result_outputs() {
    let container = database_container();
    let called = Cell::new(false);

    let err = container
        .resolve_with_result(|n: u32| -> DiResult<u32> {
            called.set(true);
            Err(DiError::custom(format!("rejected {}", n)))
        })
        .unwrap_err();
    assert!(matches!(
        err,
        DiError::InvalidInvocationSignature(
            "func returns a DiResult, call it with try_resolve_with_result"
        )
    ));
    assert!(!called.get());

    let value = container
        .try_resolve_with_result(|n: u32| -> DiResult<u32> { Ok(n + 1) })
        .unwrap();
    assert_eq!(value, 4);
}

#[test]
fn test_try_resolve_with_result_returns_value_or_error_verbatim() {
    let container = database_container();

    let doubled = container
        .try_resolve_with_result(|n: u32| -> DiResult<u32> { Ok(n * 2) })
        .unwrap();
    assert_eq!(doubled, 6);

    let failure = DiError::custom("no rows");
    let returned = failure.clone();
    let err = container
        .try_resolve_with_result(move |_: Arc<Database>| -> DiResult<String> {
            Err(returned.clone())
        })
        .unwrap_err();
    assert!(err.is_same_propagated(&failure));
}

#[test]
fn test_try_resolve_with_result_rejects_unit_value() {
    let container = database_container();

    let err = container
        .try_resolve_with_result(|| -> DiResult<()> { Ok(()) })
        .unwrap_err();
    assert!(matches!(err, DiError::InvalidInvocationSignature(_)));
}

#[test]
fn test_invocation_resolves_factories_lazily() {
    #[derive(Debug)]
    struct Counter(usize);

    let mut builder = ContainerBuilder::new();
    builder.register_instance(Arc::new(Database { url: "x".into() })).unwrap();
    builder
        .register_factory(|db: Arc<Database>| Arc::new(Counter(db.url.len())), Lifetime::Transient)
        .unwrap();

    let container = builder.build();
    let counted = container
        .resolve_with_result(|counter: Arc<Counter>| counter.0)
        .unwrap();
    assert_eq!(counted, 1);
}

#[test]
fn test_eight_parameters() {
    let mut builder = ContainerBuilder::new();
    builder.register_instance(1u8).unwrap();
    builder.register_instance(2u16).unwrap();
    builder.register_instance(3u32).unwrap();
    builder.register_instance(4u64).unwrap();
    builder.register_instance(5i8).unwrap();
    builder.register_instance(6i16).unwrap();
    builder.register_instance(7i32).unwrap();
    builder.register_instance(8i64).unwrap();

    let container = builder.build();
    let total = container
        .resolve_with_result(
            |a: u8, b: u16, c: u32, d: u64, e: i8, f: i16, g: i32, h: i64| {
                a as i64 + b as i64 + c as i64 + d as i64 + e as i64 + f as i64 + g as i64 + h
            },
        )
        .unwrap();
    assert_eq!(total, 36);
}
