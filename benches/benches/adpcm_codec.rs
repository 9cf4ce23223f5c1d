//! Benchmark suite for the ADPCM codec
//!
//! This benchmark measures each encoder mode and the decoder on synthetic PCM.
//! The optimizing encoders are much slower than the plain one, so they use
//! shorter inputs.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use xadpcm_benches::{generate_test_pcm, sizes};
use xadpcm_codec::prelude::*;

/// Benchmark a single encode pass
fn bench_encode_normal(c: &mut Criterion) {
	let mut group = c.benchmark_group("adpcm_encode_normal");

	for channels in [1u16, 2] {
		let pcm = generate_test_pcm(sizes::LONG, usize::from(channels));
		let format = AdpcmFormat::new(channels, 44100, XBOX_SAMPLES_PER_BLOCK);

		group.throughput(Throughput::Elements(sizes::LONG as u64));
		group.bench_with_input(BenchmarkId::new("channels", channels), &pcm, |b, pcm| {
			b.iter(|| {
				let mut codec = Codec::new(format, CodecMode::EncodeNormal).unwrap();
				black_box(codec.encode_samples(black_box(pcm)))
			});
		});
	}

	group.finish();
}

/// Benchmark the two search modes
fn bench_encode_search(c: &mut Criterion) {
	let mut group = c.benchmark_group("adpcm_encode_search");
	group.sample_size(10);

	let pcm = generate_test_pcm(sizes::SHORT, 1);
	let format = AdpcmFormat::new(1, 22050, XBOX_SAMPLES_PER_BLOCK);
	group.throughput(Throughput::Elements(sizes::SHORT as u64));

	for mode in [CodecMode::EncodeOptimizeWholeFile, CodecMode::EncodeOptimizePerBlock] {
		group.bench_with_input(BenchmarkId::new("mode", mode), &pcm, |b, pcm| {
			b.iter(|| {
				let mut codec = Codec::new(format, mode).unwrap();
				black_box(codec.encode_samples(black_box(pcm)))
			});
		});
	}

	// Window width drives the per-block cost
	for window_half_width in [4u8, 24, 88] {
		let config = SearchConfig {
			window_half_width,
			..SearchConfig::default()
		};
		group.bench_with_input(BenchmarkId::new("window", window_half_width), &pcm, |b, pcm| {
			b.iter(|| {
				let mut codec =
					Codec::with_config(format, CodecMode::EncodeOptimizePerBlock, config).unwrap();
				black_box(codec.encode_samples(black_box(pcm)))
			});
		});
	}

	group.finish();
}

/// Benchmark decoding
fn bench_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("adpcm_decode");

	for channels in [1u16, 2] {
		let pcm = generate_test_pcm(sizes::LONG, usize::from(channels));
		let format = AdpcmFormat::new(channels, 44100, XBOX_SAMPLES_PER_BLOCK);
		let mut encoder = Codec::new(format, CodecMode::EncodeNormal).unwrap();
		let encoded = encoder.encode_samples(&pcm).unwrap();

		group.throughput(Throughput::Elements(sizes::LONG as u64));
		group.bench_with_input(BenchmarkId::new("channels", channels), &encoded, |b, data| {
			b.iter(|| {
				let mut codec = Codec::new(format, CodecMode::Decode).unwrap();
				black_box(codec.decode_samples(black_box(data)))
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_encode_normal, bench_encode_search, bench_decode);

criterion_main!(benches);
