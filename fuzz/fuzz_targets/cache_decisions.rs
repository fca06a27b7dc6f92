#![no_main]

use libfuzzer_sys::fuzz_target;
use rivet_di::{
    CacheDecision, ConstructionSource, ContainerDescriptor, GenerationCache, Generator, Lifetime,
    Registration,
};
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let member_count = (data[0] % 6) as usize + 1;
    let mut descriptor = ContainerDescriptor::new(None, "FuzzContainerBase");
    for i in 0..member_count {
        let selector = data[(1 + i) % data.len()];
        descriptor.register(Registration::new(
            format!("Service{}", i),
            format!("Member{}", i),
            match selector % 3 {
                0 => Lifetime::Transient,
                1 => Lifetime::Scoped,
                _ => Lifetime::Singleton,
            },
            ConstructionSource::expression(format!("Service{}::default()", i)),
        ));
    }

    // Empty cache never reports Unchanged.
    let cache = GenerationCache::new();
    assert!(matches!(cache.check("fuzz", &descriptor), CacheDecision::Changed));

    // Idempotence through the pipeline: same descriptor, same output object.
    let generator = Generator::new();
    let first = generator.generate("fuzz", &descriptor).unwrap();
    let second = generator.generate("fuzz", &descriptor).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(generator.cached_declarations(), 1);

    // Any structural mutation is a change.
    let mut mutated = descriptor.clone();
    let target = data[2] as usize % member_count;
    mutated.registrations[target].lifetime =
        match mutated.registrations[target].lifetime {
            Lifetime::Transient => Lifetime::Scoped,
            Lifetime::Scoped => Lifetime::Singleton,
            Lifetime::Singleton => Lifetime::Transient,
        };
    let third = generator.generate("fuzz", &mutated).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));

    // A failing regeneration evicts; the declaration is forgotten.
    let mut broken = descriptor.clone();
    broken.register(Registration::new(
        "Broken",
        "Broken",
        Lifetime::Scoped,
        ConstructionSource::constructor("Broken", ["NoSuchType"]),
    ));
    assert!(generator.generate("fuzz", &broken).is_err());
    assert_eq!(generator.cached_declarations(), 0);
});
