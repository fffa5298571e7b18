#![no_main]

use ferrous_wire::{Container, ContainerBuilder, DiError, Lifetime, Resolver};
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;

const LIFETIMES: [Lifetime; 3] = [Lifetime::Transient, Lifetime::Singleton, Lifetime::Scoped];

fn register(
    builder: &mut ContainerBuilder,
    slot: u8,
    lifetime: Lifetime,
    value: u8,
) -> Result<(), DiError> {
    match slot % 4 {
        0 => builder.register_instance(value).map(|_| ()),
        1 => builder
            .register_factory(move || u16::from(value), lifetime)
            .map(|_| ()),
        2 => builder
            .register_factory(|n: u16| u32::from(n) + 1, lifetime)
            .map(|_| ()),
        _ => builder
            .register_factory(|n: u32, m: u8| u64::from(n) * u64::from(m), lifetime)
            .map(|_| ()),
    }
}

fn resolvable(container: &Container, slot: u8) -> bool {
    match slot % 4 {
        0 => container.get::<u8>().is_ok(),
        1 => container.get::<u16>().is_ok(),
        2 => container.get::<u32>().is_ok(),
        _ => container.get::<u64>().is_ok(),
    }
}

fuzz_target!(|data: &[u8]| {
    let mut builder = ContainerBuilder::new();
    let mut registered = HashSet::new();

    // Registration phase: (slot, lifetime, value) triples
    let split = data.len() / 2;
    for chunk in data[..split].chunks_exact(3) {
        let slot = chunk[0] % 4;
        let result = register(&mut builder, slot, LIFETIMES[chunk[1] as usize % 3], chunk[2]);
        let fresh = registered.insert(slot);
        match result {
            Ok(()) => assert!(fresh),
            Err(DiError::RegistrationConflict(_)) => assert!(!fresh),
            Err(other) => panic!("unexpected registration error: {}", other),
        }
    }

    // Resolution phase: every byte either descends into a child or resolves
    let mut current = builder.build();
    for &op in &data[split..] {
        if op & 0x80 != 0 {
            current = current.new_child();
            continue;
        }
        let slot = op % 4;
        let needs: &[u8] = match slot {
            0 => &[0],
            1 => &[1],
            2 => &[1, 2],
            _ => &[0, 1, 2, 3],
        };
        let expected = needs.iter().all(|needed| registered.contains(needed));
        assert_eq!(resolvable(&current, slot), expected);
    }
});
