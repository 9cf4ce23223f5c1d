//! ADPCM CLI Utility
//!
//! A command-line tool for converting 16-bit WAV files to and from 4-bit IMA ADPCM blocks.
//!
//! # Features
//!
//! - **encode**: Encode a WAV file into raw ADPCM blocks with a JSON metadata sidecar
//! - **decode**: Decode raw ADPCM blocks back into a WAV file
//! - **verify**: Encode a WAV file with every encoder mode and compare the results
//!
//! # Metadata Format
//!
//! The encoded stream is headerless; its description lives next to it in a JSON file:
//! ```json
//! {
//!   "format": {
//!     "format_tag": 105,
//!     "channels": 1,
//!     "sample_rate": 22050,
//!     "avg_bytes_per_sec": 12403,
//!     "block_align": 36,
//!     "bits_per_sample": 4,
//!     "extra_size": 2,
//!     "samples_per_block": 64
//!   },
//!   "mode": "encode_optimize_per_block",
//!   "sample_frames": 8820,
//!   "block_count": 138,
//!   "distortion": 1234567
//! }
//! ```
//!
//! # Search Configuration
//!
//! `--config` reads a TOML file with the optimizing encoder tunables; any of them may
//! also be set through `XADPCM_` prefixed environment variables:
//! ```toml
//! window_half_width = 16
//! ```
//!
//! # Usage
//!
//! ```bash
//! # Encode with the per-block optimizing encoder (auto output: input.xadpcm)
//! cargo run --example adpcm_utils encode voice.wav
//!
//! # Encode with a specific mode and block size
//! cargo run --example adpcm_utils encode voice.wav out.xadpcm --mode whole-file --block-size 128
//!
//! # Decode (auto output: input.wav)
//! cargo run --example adpcm_utils decode voice.xadpcm
//!
//! # Compare the encoder modes
//! cargo run --example adpcm_utils verify voice.wav
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use xadpcm_rs::prelude::*;

#[derive(Parser)]
#[command(name = "adpcm_utils")]
#[command(author = "xadpcm-rs project")]
#[command(version)]
#[command(about = "IMA ADPCM utility - encode, decode, and verify 16-bit WAV files", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Encode a 16-bit WAV file into ADPCM blocks
	Encode {
		/// Input WAV file path
		#[arg(value_name = "INPUT_WAV")]
		input: PathBuf,

		/// Output ADPCM file path (optional, defaults to `input.xadpcm`)
		#[arg(value_name = "OUTPUT")]
		output: Option<PathBuf>,

		/// Encoder to use
		#[arg(short, long, value_enum, default_value_t = EncodeMode::PerBlock)]
		mode: EncodeMode,

		/// Sample frames per block
		#[arg(short, long, default_value_t = XBOX_SAMPLES_PER_BLOCK)]
		block_size: u16,

		/// TOML file with search settings
		#[arg(short, long, value_name = "CONFIG")]
		config: Option<PathBuf>,

		/// Show verbose output
		#[arg(short, long)]
		verbose: bool,
	},

	/// Decode ADPCM blocks into a 16-bit WAV file
	Decode {
		/// Input ADPCM file path; its metadata is read from `input.json`
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Output WAV file path (optional, defaults to `input.wav`)
		#[arg(value_name = "OUTPUT_WAV")]
		output: Option<PathBuf>,

		/// Show verbose output
		#[arg(short, long)]
		verbose: bool,
	},

	/// Encode a WAV file with every encoder and compare the decoded results
	Verify {
		/// Input WAV file path
		#[arg(value_name = "INPUT_WAV")]
		input: PathBuf,

		/// Sample frames per block
		#[arg(short, long, default_value_t = XBOX_SAMPLES_PER_BLOCK)]
		block_size: u16,

		/// TOML file with search settings
		#[arg(short, long, value_name = "CONFIG")]
		config: Option<PathBuf>,
	},
}

/// Encoder selection on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EncodeMode {
	/// Single pass from step index 0
	Normal,
	/// Best starting step index for the whole file
	WholeFile,
	/// Best starting step index for every block
	PerBlock,
}

impl From<EncodeMode> for CodecMode {
	fn from(mode: EncodeMode) -> Self {
		match mode {
			EncodeMode::Normal => CodecMode::EncodeNormal,
			EncodeMode::WholeFile => CodecMode::EncodeOptimizeWholeFile,
			EncodeMode::PerBlock => CodecMode::EncodeOptimizePerBlock,
		}
	}
}

/// Sidecar metadata of an encoded stream
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StreamMetadata {
	/// Format of the encoded blocks
	format: AdpcmFormat,
	/// Encoder that produced the stream
	mode: CodecMode,
	/// Sample frames of the source before padding to whole blocks
	sample_frames: usize,
	/// Number of encoded blocks
	block_count: usize,
	/// Distortion reported by the encoder
	distortion: u64,
}

/// PCM read from a WAV file
struct WavAudio {
	channels: u16,
	sample_rate: u32,
	samples: Vec<i16>,
}

impl WavAudio {
	fn frames(&self) -> usize {
		self.samples.len() / usize::from(self.channels)
	}
}

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

	let cli = Cli::parse();
	match cli.command {
		Commands::Encode {
			input,
			output,
			mode,
			block_size,
			config,
			verbose,
		} => handle_encode(&input, output, mode, block_size, config.as_deref(), verbose),
		Commands::Decode {
			input,
			output,
			verbose,
		} => handle_decode(&input, output, verbose),
		Commands::Verify {
			input,
			block_size,
			config,
		} => handle_verify(&input, block_size, config.as_deref()),
	}
}

/// Loads search settings from an optional TOML file and the environment
fn load_search_config(path: Option<&Path>) -> Result<SearchConfig> {
	let mut builder = config::Config::builder();
	if let Some(path) = path {
		builder = builder.add_source(config::File::from(path));
	}
	let settings = builder
		.add_source(config::Environment::with_prefix("XADPCM"))
		.build()
		.context("failed to load search settings")?;

	let search: SearchConfig = settings.try_deserialize().context("invalid search settings")?;
	log::debug!("Search settings: {search:?}");
	Ok(search)
}

fn metadata_path(stream: &Path) -> PathBuf {
	stream.with_extension("json")
}

fn load_wav(path: &Path) -> Result<WavAudio> {
	let mut reader =
		hound::WavReader::open(path).with_context(|| format!("failed to open {}", path.display()))?;
	let spec = reader.spec();

	if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
		bail!(
			"{} is not 16-bit integer PCM ({} bits, {:?})",
			path.display(),
			spec.bits_per_sample,
			spec.sample_format
		);
	}

	let samples = reader.samples::<i16>().collect::<Result<Vec<_>, _>>()?;
	log::info!(
		"Loaded {}: {} Hz, {} ch, {} samples",
		path.display(),
		spec.sample_rate,
		spec.channels,
		samples.len()
	);
	Ok(WavAudio {
		channels: spec.channels,
		sample_rate: spec.sample_rate,
		samples,
	})
}

fn save_wav(path: &Path, channels: u16, sample_rate: u32, samples: &[i16]) -> Result<()> {
	let spec = hound::WavSpec {
		channels,
		sample_rate,
		bits_per_sample: 16,
		sample_format: hound::SampleFormat::Int,
	};

	let mut writer = hound::WavWriter::create(path, spec)
		.with_context(|| format!("failed to create {}", path.display()))?;
	for &sample in samples {
		writer.write_sample(sample)?;
	}
	writer.finalize()?;
	Ok(())
}

/// Pads `samples` with silence up to whole blocks
fn pad_to_blocks(samples: &[i16], format: &AdpcmFormat) -> Vec<i16> {
	let block_len = usize::from(format.samples_per_block) * usize::from(format.channels);
	let mut padded = samples.to_vec();
	padded.resize(samples.len().div_ceil(block_len) * block_len, 0);
	padded
}

/// Encodes `audio` and returns the stream with its metadata
fn encode_audio(
	audio: &WavAudio,
	mode: CodecMode,
	block_size: u16,
	search: SearchConfig,
) -> Result<(Vec<u8>, StreamMetadata)> {
	let format = AdpcmFormat::new(audio.channels, audio.sample_rate, block_size);
	let mut codec = Codec::with_config(format, mode, search)?;
	let encoded = codec.encode_samples(&pad_to_blocks(&audio.samples, &format))?;

	let (block_count, distortion) = codec
		.last_report()
		.map(|report| (report.block_count, report.distortion))
		.unwrap_or_default();

	Ok((
		encoded,
		StreamMetadata {
			format,
			mode,
			sample_frames: audio.frames(),
			block_count,
			distortion,
		},
	))
}

/// Handle encode command
fn handle_encode(
	input: &Path,
	output: Option<PathBuf>,
	mode: EncodeMode,
	block_size: u16,
	config: Option<&Path>,
	verbose: bool,
) -> Result<()> {
	let output = output.unwrap_or_else(|| input.with_extension("xadpcm"));
	let search = load_search_config(config)?;

	if verbose {
		println!("🔧 Encoding WAV file");
		println!("   Input:  {}", input.display());
		println!("   Output: {}", output.display());
		println!("   Mode:   {}", CodecMode::from(mode));
		println!("   Window: ±{}", search.window_half_width);
	}

	let audio = load_wav(input)?;
	if verbose {
		println!(
			"\n📖 Loaded {} Hz, {} ch, {} frames",
			audio.sample_rate,
			audio.channels,
			audio.frames()
		);
	}

	let (encoded, metadata) = encode_audio(&audio, mode.into(), block_size, search)?;

	fs::write(&output, &encoded).with_context(|| format!("failed to write {}", output.display()))?;
	let json = serde_json::to_string_pretty(&metadata)?;
	fs::write(metadata_path(&output), json)?;

	if verbose {
		println!("\n💾 Saved {} blocks ({} bytes)", metadata.block_count, encoded.len());
		println!("   ✓ Distortion: 0x{:x}", metadata.distortion);
		println!("   ✓ Metadata:   {}", metadata_path(&output).display());
		println!("\n✅ Encoding completed successfully!");
	} else {
		println!(
			"✓ Encoded {} -> {} ({} blocks, {} bytes)",
			input.display(),
			output.display(),
			metadata.block_count,
			encoded.len()
		);
	}

	Ok(())
}

/// Handle decode command
fn handle_decode(input: &Path, output: Option<PathBuf>, verbose: bool) -> Result<()> {
	let output = output.unwrap_or_else(|| input.with_extension("wav"));

	let json = fs::read_to_string(metadata_path(input))
		.with_context(|| format!("missing metadata for {}", input.display()))?;
	let metadata: StreamMetadata = serde_json::from_str(&json)?;
	let data = fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;

	if verbose {
		println!("🔓 Decoding ADPCM stream");
		println!("   Input:  {}", input.display());
		println!("   Output: {}", output.display());
		println!("   Format: {}", metadata.format);
	}

	let block_align = usize::from(metadata.format.block_align);
	if block_align == 0 || data.len() % block_align != 0 {
		bail!("{} bytes is not a whole number of {block_align} byte blocks", data.len());
	}

	log::info!("Stream metadata: {} blocks from {}", metadata.block_count, metadata.mode);

	let mut codec = Codec::new(metadata.format, CodecMode::Decode)?;
	let mut samples = codec.decode_samples(&data)?;
	samples.truncate(metadata.sample_frames * usize::from(metadata.format.channels));

	save_wav(&output, metadata.format.channels, metadata.format.sample_rate, &samples)?;

	if verbose {
		println!("\n💾 Saved {} frames", metadata.sample_frames);
		println!("\n✅ Decoding completed successfully!");
	} else {
		println!(
			"✓ Decoded {} -> {} ({} blocks)",
			input.display(),
			output.display(),
			data.len() / block_align
		);
	}

	Ok(())
}

/// Handle verify command
fn handle_verify(input: &Path, block_size: u16, config: Option<&Path>) -> Result<()> {
	let search = load_search_config(config)?;
	let audio = load_wav(input)?;

	println!("🔍 Comparing encoders");
	println!(
		"   Input: {} ({} Hz, {} ch, {} frames)",
		input.display(),
		audio.sample_rate,
		audio.channels,
		audio.frames()
	);
	println!();

	let mut failures = 0;
	for mode in CodecMode::ALL.into_iter().filter(|mode| mode.is_encoder()) {
		let (encoded, metadata) = encode_audio(&audio, mode, block_size, search)?;

		let mut decoder = Codec::new(metadata.format, CodecMode::Decode)?;
		let decoded = decoder.decode_samples(&encoded)?;

		let max_error = audio
			.samples
			.iter()
			.zip(&decoded)
			.map(|(&a, &b)| (i32::from(a) - i32::from(b)).unsigned_abs())
			.max()
			.unwrap_or(0);

		log::debug!("{mode}: {} encoded bytes", encoded.len());

		if decoded.len() < audio.samples.len() {
			failures += 1;
			println!("   ✗ {mode}: decoded {} of {} samples", decoded.len(), audio.samples.len());
		} else {
			println!(
				"   ✓ {:<20} distortion 0x{:016x}, max error {max_error}",
				mode.to_string(),
				metadata.distortion
			);
		}
	}

	if failures > 0 {
		bail!("{failures} encoder(s) failed verification");
	}

	println!("\n✅ All encoders verified");
	Ok(())
}
