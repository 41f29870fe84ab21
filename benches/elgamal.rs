use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use distributed_elgamal::{
    decryption::{partial_decrypt_all, recover},
    encryption::encrypt,
    keygen::key_gen,
    params::KeyGenParams,
    schnorr::generate_schnorr_group,
    utils::pad_message,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_group_generation(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let mut group = c.benchmark_group("schnorr_group");
    group.sample_size(10);

    for (p_bits, q_bits) in [(512, 160), (1024, 256)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}/{}", p_bits, q_bits)),
            &(p_bits, q_bits),
            |b, &(p_bits, q_bits)| {
                b.iter(|| generate_schnorr_group(p_bits, q_bits, &mut rng).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_encrypt_decrypt(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let msg = pad_message(b"Hello world").unwrap();

    for n in [4usize, 8, 16] {
        let t = n / 2;
        let params = KeyGenParams::new(1024, 256, t, n).unwrap();
        let (pk, _sk, shares) = key_gen(&params, &mut rng).unwrap();
        let ct = encrypt(&pk, &msg, &mut rng).unwrap();
        let partials = partial_decrypt_all(&pk, &shares[..t + 1], &ct).unwrap();

        c.bench_with_input(BenchmarkId::new("encrypt", n), &pk, |b, pk| {
            b.iter(|| encrypt(pk, &msg, &mut rng).unwrap());
        });
        c.bench_with_input(
            BenchmarkId::new("partial_decrypt_all", n),
            &(pk.clone(), shares, ct.clone()),
            |b, inp| {
                b.iter(|| partial_decrypt_all(&inp.0, &inp.1, &inp.2).unwrap());
            },
        );
        c.bench_with_input(
            BenchmarkId::new("recover", n),
            &(pk, partials, ct),
            |b, inp| {
                b.iter(|| recover(&inp.0, &inp.1, &inp.2).unwrap());
            },
        );
    }
}

criterion_group!(benches, bench_group_generation, bench_encrypt_decrypt);
criterion_main!(benches);
