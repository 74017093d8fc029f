use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use uthread::sched::{LogicalThread, ReadyRegistry};
use uthread::Tid;

fn record(id: u64, priority: i32) -> Box<LogicalThread> {
    let mut t = LogicalThread::entry_record();
    t.tid = Tid::new(id);
    t.priority = priority;
    Box::new(t)
}

/// Registro com prioridades espalhadas (várias repetidas, para exercitar o
/// desempate pelo mais antigo)
fn populated(len: usize) -> ReadyRegistry {
    let mut reg = ReadyRegistry::new();
    for id in 0..len {
        reg.insert(record(id as u64, (id * 7 % 13) as i32));
    }
    reg
}

/// Ciclo de um yield: seleciona o melhor e reinsere com prioridade nova
fn bench_select_and_reinsert(c: &mut Criterion) {
    let mut group = c.benchmark_group("ready_registry_yield_cycle");
    for len in [4usize, 64, 1024] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let mut reg = populated(len);
            let mut round = 0i32;
            b.iter(|| {
                let mut best = reg.select_and_remove_highest_priority().unwrap();
                round = round.wrapping_add(1);
                best.priority = round % 13;
                reg.insert(black_box(best));
            });
        });
    }
    group.finish();
}

fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("ready_registry_drain");
    for len in [64usize, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter_batched(
                || populated(len),
                |mut reg| {
                    while let Some(t) = reg.select_and_remove_highest_priority() {
                        black_box(t);
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_select_and_reinsert, bench_drain);
criterion_main!(benches);
