use criterion::{black_box, criterion_group, criterion_main, Criterion};

use datapack::{validate_document, DocumentType, Project};

pub fn validate_defaults(c: &mut Criterion) {
    c.bench_function("validate defaults", |b| {
        let documents: Vec<_> = DocumentType::LISTED
            .iter()
            .map(|&ty| (ty, ty.default_data()))
            .collect();

        b.iter(|| {
            for (ty, data) in &documents {
                black_box(validate_document(*ty, data));
            }
        });
    });
}

pub fn archive_round_trip(c: &mut Criterion) {
    c.bench_function("archive round trip", |b| {
        let mut project = Project::new("bench");
        for ty in DocumentType::LISTED {
            for _ in 0..20 {
                project.add_entry(ty).unwrap();
            }
        }

        b.iter(|| {
            let outcome = project.export_archive().unwrap();
            let mut other = Project::new("minecraft");
            black_box(other.import_archive(&outcome.bytes).unwrap());
        });
    });
}

criterion_group!(benches, validate_defaults, archive_round_trip);
criterion_main!(benches);
