use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::io;
use std::time::Duration;
use teller::{run, run_async};
use tokio::runtime::Runtime;

struct NoopWriter;

impl io::Write for NoopWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Just return the length of input without actually writing
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn process_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");

    group.throughput(Throughput::Elements(5)); // operations in the sample file
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("sync_process_sample_day", |b| {
        b.iter(|| {
            run(
                "data/accounts.csv",
                "data/rates.csv",
                "data/operations.csv",
                NoopWriter,
            )
            .unwrap();
        });
    });

    group.bench_function("async_process_sample_day", |b| {
        let rt = Runtime::new().unwrap();
        b.to_async(rt).iter(|| async {
            run_async(
                "data/accounts.csv",
                "data/rates.csv",
                "data/operations.csv",
                NoopWriter,
            )
            .await
            .unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, process_operations);
criterion_main!(benches);
