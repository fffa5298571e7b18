use ferrous_wire::{Container, ContainerBuilder, DiResult, Lifetime, Resolver};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct RequestId(usize);

fn request_id_container() -> (Container, Arc<AtomicUsize>) {
    let next = Arc::new(AtomicUsize::new(0));
    let counter = next.clone();

    let mut builder = ContainerBuilder::new();
    builder
        .register_factory(
            move || Arc::new(RequestId(counter.fetch_add(1, Ordering::SeqCst))),
            Lifetime::Scoped,
        )
        .unwrap();
    (builder.build(), next)
}

#[test]
fn test_child_sees_parent_registrations() {
    let mut builder = ContainerBuilder::new();
    builder.register_instance(Arc::new("config".to_string())).unwrap();
    builder
        .register_factory(|| Arc::new(AtomicUsize::new(0)), Lifetime::Singleton)
        .unwrap();

    let root = builder.build();
    let child = root.new_child();

    let from_root = root.get::<Arc<AtomicUsize>>().unwrap();
    let from_child = child.get::<Arc<AtomicUsize>>().unwrap();
    assert!(Arc::ptr_eq(&from_root, &from_child));
    assert_eq!(*child.get::<Arc<String>>().unwrap(), "config");
}

#[test]
fn test_scoped_is_isolated_per_child() {
    let (root, constructed) = request_id_container();

    let child_a = root.new_child();
    let child_b = root.new_child();

    let a1 = child_a.get::<Arc<RequestId>>().unwrap();
    let a2 = child_a.get::<Arc<RequestId>>().unwrap();
    let b1 = child_b.get::<Arc<RequestId>>().unwrap();

    assert!(Arc::ptr_eq(&a1, &a2)); // Same within a child
    assert!(!Arc::ptr_eq(&a1, &b1)); // Different across siblings
    assert_ne!(a1.0, b1.0);
    assert_eq!(constructed.load(Ordering::SeqCst), 2);
}

#[test]
fn test_scoped_is_cached_in_owning_container() {
    let (root, constructed) = request_id_container();

    let r1 = root.get::<Arc<RequestId>>().unwrap();
    let r2 = root.get::<Arc<RequestId>>().unwrap();
    assert!(Arc::ptr_eq(&r1, &r2));

    let child = root.new_child();
    let c = child.get::<Arc<RequestId>>().unwrap();
    assert!(!Arc::ptr_eq(&r1, &c));
    assert_eq!(constructed.load(Ordering::SeqCst), 2);
}

#[test]
fn test_child_copy_ignores_populated_parent_cache() {
    let (root, _) = request_id_container();

    let from_root = root.get::<Arc<RequestId>>().unwrap();
    let child = root.new_child();
    let from_child = child.get::<Arc<RequestId>>().unwrap();

    assert_eq!(from_root.0, 0);
    assert_eq!(from_child.0, 1);
}

#[test]
fn test_grandchild_shares_child_scope() {
    let (root, constructed) = request_id_container();

    let child = root.new_child();
    let grandchild = child.new_child();

    let from_child = child.get::<Arc<RequestId>>().unwrap();
    let from_grandchild = grandchild.get::<Arc<RequestId>>().unwrap();

    // Only Scoped registrations are copied; the child's copy is a singleton
    assert!(Arc::ptr_eq(&from_child, &from_grandchild));
    assert_eq!(constructed.load(Ordering::SeqCst), 1);
}

#[test]
fn test_dependencies_resolve_against_requesting_container() {
    struct Handler {
        request: Arc<RequestId>,
    }

    let next = Arc::new(AtomicUsize::new(0));
    let counter = next.clone();

    let mut builder = ContainerBuilder::new();
    builder
        .register_factory(
            move || Arc::new(RequestId(counter.fetch_add(1, Ordering::SeqCst))),
            Lifetime::Scoped,
        )
        .unwrap();
    builder
        .register_factory(
            |request: Arc<RequestId>| Arc::new(Handler { request }),
            Lifetime::Transient,
        )
        .unwrap();

    let root = builder.build();
    let child_a = root.new_child();
    let child_b = root.new_child();

    // The handler lives in the root, its dependency comes from each child
    let handler_a = child_a.get::<Arc<Handler>>().unwrap();
    let handler_b = child_b.get::<Arc<Handler>>().unwrap();
    let request_a = child_a.get::<Arc<RequestId>>().unwrap();

    assert!(Arc::ptr_eq(&handler_a.request, &request_a));
    assert!(!Arc::ptr_eq(&handler_a.request, &handler_b.request));
}

#[test]
fn test_container_parameter_is_requesting_container() {
    struct Holder(Container);

    let mut builder = ContainerBuilder::new();
    builder
        .register_factory(|container: Container| Arc::new(Holder(container)), Lifetime::Transient)
        .unwrap();

    let root = builder.build();
    let child = root.new_child();

    let from_child = child.get::<Arc<Holder>>().unwrap();
    assert!(Container::ptr_eq(&from_child.0, &child));
    assert!(!Container::ptr_eq(&from_child.0, &root));

    let from_root = root.get::<Arc<Holder>>().unwrap();
    assert!(Container::ptr_eq(&from_root.0, &root));

    child
        .resolve(|current: Container| -> DiResult<()> {
            assert!(Container::ptr_eq(&current, &child));
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_parent_link() {
    let root = ContainerBuilder::new().build();
    let child = root.new_child();

    assert!(root.parent().is_none());
    let parent = child.parent().unwrap();
    assert!(Container::ptr_eq(&parent, &root));
}

#[test]
fn test_child_keeps_ancestors_alive() {
    let mut builder = ContainerBuilder::new();
    builder.register_instance(7u32).unwrap();
    builder
        .register_factory(|| Arc::new(RequestId(99)), Lifetime::Scoped)
        .unwrap();

    // Neither the root nor the intermediate child is held here
    let grandchild = builder.build().new_child().new_child();

    assert!(grandchild.parent().and_then(|child| child.parent()).is_some());
    assert_eq!(grandchild.get::<u32>().unwrap(), 7);
    assert_eq!(grandchild.get::<Arc<RequestId>>().unwrap().0, 99);
}

#[test]
fn test_singleton_resolves_same_instance_from_parent() {
    const NEST_LEVEL: usize = 10;

    let mut builder = ContainerBuilder::new();
    builder
        .register_factory(|| Arc::new(RequestId(42)), Lifetime::Singleton)
        .unwrap();

    let mut container = builder.build().new_child();
    let mut first: Option<Arc<RequestId>> = None;

    for _ in 0..NEST_LEVEL {
        container = container.new_child();

        for _ in 0..10 {
            let resolved = container
                .resolve_with_result(|request: Arc<RequestId>| request)
                .unwrap();
            let expected = first.get_or_insert_with(|| resolved.clone());
            assert!(Arc::ptr_eq(expected, &resolved));
        }
    }
}

#[test]
fn test_transient_resolves_new_instance_from_parent() {
    const NEST_LEVEL: usize = 10;

    let next = Arc::new(AtomicUsize::new(0));
    let counter = next.clone();

    let mut builder = ContainerBuilder::new();
    builder
        .register_factory(
            move || Arc::new(RequestId(counter.fetch_add(1, Ordering::SeqCst))),
            Lifetime::Transient,
        )
        .unwrap();

    let mut container = builder.build().new_child();
    let mut seen = std::collections::HashSet::new();

    for _ in 0..NEST_LEVEL {
        container = container.new_child();

        for _ in 0..10 {
            let id = container
                .resolve_with_result(|request: Arc<RequestId>| request.0)
                .unwrap();
            assert!(seen.insert(id), "transient id {} was handed out twice", id);
        }
    }
    assert_eq!(next.load(Ordering::SeqCst), NEST_LEVEL * 10);
}

#[test]
fn test_child_registered_keys_are_scoped_copies() {
    let mut builder = ContainerBuilder::new();
    builder.register_instance(1u8).unwrap();
    builder.register_factory(|| 2u16, Lifetime::Singleton).unwrap();
    builder.register_factory(|| 3u32, Lifetime::Scoped).unwrap();
    builder.register_factory(|| 4u64, Lifetime::Transient).unwrap();

    let root = builder.build();
    let child = root.new_child();

    assert_eq!(root.registered_keys().len(), 4);
    assert_eq!(child.registered_keys(), vec![ferrous_wire::key_of_type::<u32>()]);
    assert!(child.new_child().registered_keys().is_empty());
}
