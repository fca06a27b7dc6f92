#![no_main]

use libfuzzer_sys::fuzz_target;
use rivet_di::{codegen, ConstructionSource, ContainerDescriptor, Lifetime, Registration};

fn chunk_string(data: &[u8], offset: usize, len: usize) -> String {
    data.iter()
        .cycle()
        .skip(offset)
        .take(len)
        .map(|&b| (b'A' + (b % 26)) as char)
        .collect()
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let member_count = (data[0] % 8) as usize;
    let mut descriptor = ContainerDescriptor::new(
        if data[1] % 2 == 0 { Some("fuzzed") } else { None },
        format!("{}ContainerBase", chunk_string(data, 2, 6)),
    );

    let mut type_names = Vec::with_capacity(member_count);
    for i in 0..member_count {
        type_names.push(format!("{}T{}", chunk_string(data, 3 + i, 5), i));
    }

    for i in 0..member_count {
        let selector = data[(4 + i) % data.len()];
        let lifetime = match selector % 3 {
            0 => Lifetime::Transient,
            1 => Lifetime::Scoped,
            _ => Lifetime::Singleton,
        };
        let source = if selector % 2 == 0 {
            ConstructionSource::expression(format!("{}::default()", type_names[i]))
        } else {
            // Parameters may or may not resolve; generation must never panic
            // either way.
            let param_count = (selector / 3 % 3) as usize;
            let params: Vec<String> = (0..param_count)
                .map(|p| {
                    let pick = data[(5 + i + p) % data.len()] as usize;
                    type_names
                        .get(pick % (member_count + 1))
                        .cloned()
                        .unwrap_or_else(|| format!("Unregistered{}", pick))
                })
                .collect();
            ConstructionSource::constructor(type_names[i].clone(), params)
        };
        descriptor.register(Registration::new(
            type_names[i].clone(),
            format!("M{}", i),
            lifetime,
            source,
        ));
    }

    // Generation must be total: either output or a descriptive error.
    let first = codegen::generate(&descriptor);
    let second = codegen::generate(&descriptor);
    assert_eq!(first, second);

    if let Ok(output) = first {
        assert!(output.file_name.ends_with(".Generated.rs"));
        assert!(output.source_text.starts_with("// Code generated by rivet-di."));
    }
});
