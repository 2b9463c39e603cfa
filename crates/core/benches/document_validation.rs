use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use orderlink_core::{is_valid_cnpj, is_valid_cpf};

fn bench_cpf(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpf");
    for input in ["111.444.777-35", "11144477735", "111.111.111-11", "1114447773"] {
        group.bench_with_input(BenchmarkId::from_parameter(input), &input, |b, input| {
            b.iter(|| is_valid_cpf(black_box(input)))
        });
    }
    group.finish();
}

fn bench_cnpj(c: &mut Criterion) {
    let mut group = c.benchmark_group("cnpj");
    for input in ["11.222.333/0001-81", "11222333000181", "11.111.111/1111-11"] {
        group.bench_with_input(BenchmarkId::from_parameter(input), &input, |b, input| {
            b.iter(|| is_valid_cnpj(black_box(input)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cpf, bench_cnpj);
criterion_main!(benches);
