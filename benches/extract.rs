use bufr_bits::{
    bits::{Bitwise, Extractor, Windowed},
    cursor::BitCursor,
};
use criterion::{Criterion, criterion_group, criterion_main};

fn gen_section(total_bytes: usize) -> Vec<u8> {
    // Deterministic but non-trivial pattern
    (0..total_bytes).map(|i| (i * 31 % 256) as u8).collect()
}

fn walk<E: Extractor>(data: &[u8], bit_length: usize) -> u64 {
    let mut cursor = BitCursor::<E>::with_extractor_at(data, 3);
    let mut sum = 0u64;
    while cursor.remaining_bits() >= bit_length {
        if let Ok(field) = cursor.read_u32(bit_length) {
            sum += u64::from(field.present().unwrap_or(0));
        }
    }

    sum
}

fn bench_extract(c: &mut Criterion) {
    let section = gen_section(4096);

    for &bit_length in &[5usize, 12, 17, 32] {
        c.bench_function(&format!("bitwise_u32_{}_bits", bit_length), |b| {
            b.iter(|| walk::<Bitwise>(&section, bit_length))
        });
        c.bench_function(&format!("windowed_u32_{}_bits", bit_length), |b| {
            b.iter(|| walk::<Windowed>(&section, bit_length))
        });
    }

    c.bench_function("bitwise_chars_32", |b| {
        b.iter(|| BitCursor::bitwise(&section).read_chars(32 * 8).unwrap())
    });
    c.bench_function("windowed_chars_32", |b| {
        b.iter(|| BitCursor::windowed(&section).read_chars(32 * 8).unwrap())
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
