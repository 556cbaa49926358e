use criterion::{criterion_group, criterion_main, Criterion};

use mailcarve::decompose::Decomposer;
use mailcarve::store::MemoryStore;

const NESTED: &[u8] = b"From: bench@example.com\r\n\
    To: one@example.com, two@example.com\r\n\
    Subject: bench\r\n\
    Date: Thu, 04 Jan 2024 10:00:00 +0000\r\n\
    Content-Type: multipart/mixed; boundary=\"mix\"\r\n\
    \r\n\
    --mix\r\n\
    Content-Type: multipart/alternative; boundary=\"alt\"\r\n\
    \r\n\
    --alt\r\n\
    Content-Type: text/plain\r\n\
    \r\n\
    plain body\r\n\
    --alt\r\n\
    Content-Type: text/html\r\n\
    \r\n\
    <p>html body</p>\r\n\
    --alt--\r\n\
    --mix\r\n\
    Content-Type: application/octet-stream; name=\"blob.bin\"\r\n\
    Content-Disposition: attachment; filename=\"blob.bin\"\r\n\
    Content-Transfer-Encoding: base64\r\n\
    \r\n\
    aGVsbG8gYnl0ZXM=\r\n\
    --mix--\r\n";

fn bench_decompose_nested(c: &mut Criterion) {
    let decomposer = Decomposer::new();

    c.bench_function("decompose_nested_multipart", |b| {
        b.iter(|| {
            let mut store = MemoryStore::new();
            decomposer
                .decompose(NESTED, "42-bench.eml", &mut store)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_decompose_nested);
criterion_main!(benches);
