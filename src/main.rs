use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, LevelFilter};
use rand::{thread_rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use toy_rsa::rsa::{Codec, Decrypter, Encrypter, KeyGenerator, KeySearch, KeyTriple, PrivateKey, PublicKey};
use toy_rsa::util::{load_charmap, EncodedStore, StoreConfig};

#[derive(Parser)]
#[command(name = "toy-rsa", version, about = "Small-prime RSA for teaching")]
struct Cli {
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the key table for two primes and print one key triple
    Keys {
        #[arg(long)]
        p: u64,
        #[arg(long)]
        q: u64,
        /// Table position, negative counts from the end
        #[arg(long, allow_negative_numbers = true)]
        index: Option<isize>,
        /// Print the first N exponent pairs instead
        #[arg(long, conflicts_with_all = ["index", "seed"])]
        list: Option<usize>,
        /// Seed for reproducible random selection
        #[arg(long)]
        seed: Option<u64>,
        /// Find private exponents by modular inverse
        #[arg(long)]
        fast: bool,
    },
    /// Encode and encrypt a message, printing the ciphertext as JSON
    Encrypt {
        #[arg(long)]
        public: u64,
        #[arg(long)]
        modulus: u64,
        /// JSON symbol table; code points are used when absent
        #[arg(long)]
        charmap: Option<PathBuf>,
        #[arg(long)]
        message: String,
        /// Also store the ciphertext in this file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Decrypt a JSON ciphertext array and decode it
    Decrypt {
        #[arg(long)]
        private: u64,
        #[arg(long)]
        modulus: u64,
        #[arg(long)]
        charmap: Option<PathBuf>,
        /// File written by `encrypt --out`
        #[arg(long, conflicts_with = "values")]
        input: Option<PathBuf>,
        /// Inline JSON array, e.g. "[1,2,3]"
        #[arg(long)]
        values: Option<String>,
    },
    /// Derive keys, encrypt and decrypt one message
    Demo {
        #[arg(long, default_value_t = 17)]
        p: u64,
        #[arg(long, default_value_t = 31)]
        q: u64,
        #[arg(long, default_value = "Testing message...")]
        message: String,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command {
        Commands::Keys {
            p,
            q,
            index,
            list,
            seed,
            fast,
        } => cmd_keys(p, q, index, list, seed, fast),
        Commands::Encrypt {
            public,
            modulus,
            charmap,
            message,
            out,
        } => cmd_encrypt(public, modulus, charmap.as_deref(), &message, out),
        Commands::Decrypt {
            private,
            modulus,
            charmap,
            input,
            values,
        } => cmd_decrypt(private, modulus, charmap.as_deref(), input, values),
        Commands::Demo { p, q, message, seed } => cmd_demo(p, q, &message, seed),
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default));
    builder.format_timestamp(None);
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

fn build_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(thread_rng()),
    }
}

fn build_codec(charmap: Option<&Path>) -> Result<Codec> {
    match charmap {
        Some(path) => {
            let symbols = load_charmap(path)
                .with_context(|| format!("failed to load charmap {}", path.display()))?;
            Ok(Codec::with_table(symbols))
        }
        None => Ok(Codec::native()),
    }
}

fn generate(p: u64, q: u64, fast: bool) -> Result<KeyGenerator> {
    let search = if fast {
        KeySearch::Inverse
    } else {
        KeySearch::Exhaustive
    };
    KeyGenerator::with_search(p, q, search).with_context(|| format!("cannot derive keys from p={} q={}", p, q))
}

fn select_keys(generator: &KeyGenerator, index: Option<isize>, seed: Option<u64>) -> Result<KeyTriple> {
    let mut rng = build_rng(seed);
    Ok(generator.get_keys(index, &mut rng)?)
}

fn cmd_keys(
    p: u64,
    q: u64,
    index: Option<isize>,
    list: Option<usize>,
    seed: Option<u64>,
    fast: bool,
) -> Result<()> {
    let generator = generate(p, q, fast)?;
    info!("{} usable exponent pairs for n={}", generator.len(), generator.modulus());

    if let Some(len) = list {
        let table = generator.table().truncated(len);
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    let keys = select_keys(&generator, index, seed)?;
    println!("{}", serde_json::to_string_pretty(&keys)?);
    Ok(())
}

fn cmd_encrypt(public: u64, modulus: u64, charmap: Option<&Path>, message: &str, out: Option<PathBuf>) -> Result<()> {
    let key = PublicKey::new(public, modulus)?;
    let ciphertext = Encrypter::new(key, build_codec(charmap)?).encrypt(message)?;

    if let Some(path) = out {
        let store = EncodedStore::new(StoreConfig::default().with_path(path));
        store
            .write(&ciphertext)
            .with_context(|| format!("failed to write {}", store.path().display()))?;
    }
    println!("{}", serde_json::to_string(&ciphertext)?);
    Ok(())
}

fn cmd_decrypt(
    private: u64,
    modulus: u64,
    charmap: Option<&Path>,
    input: Option<PathBuf>,
    values: Option<String>,
) -> Result<()> {
    let ciphertext: Vec<u64> = match (input, values) {
        (Some(path), _) => {
            let store = EncodedStore::new(StoreConfig::default().with_path(path));
            store
                .load()
                .with_context(|| format!("failed to read {}", store.path().display()))?
        }
        (None, Some(values)) => serde_json::from_str(&values).context("--values must be a JSON array of integers")?,
        (None, None) => bail!("either --input or --values is required"),
    };

    let key = PrivateKey::new(private, modulus)?;
    let plaintext = Decrypter::new(key, build_codec(charmap)?).decrypt(&ciphertext)?;
    println!("{}", plaintext);
    Ok(())
}

fn cmd_demo(p: u64, q: u64, message: &str, seed: Option<u64>) -> Result<()> {
    let generator = generate(p, q, false)?;
    let keys = select_keys(&generator, None, seed)?;
    info!("using e={} d={} n={}", keys.public, keys.private, keys.modulus);

    let encrypted = Encrypter::new(keys.public_key(), Codec::native()).encrypt(message)?;
    let decrypted = Decrypter::new(keys.private_key(), Codec::native()).decrypt(&encrypted)?;

    println!("{}", message);
    println!("{}", serde_json::to_string(&encrypted)?);
    println!("{}", decrypted);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_excludes_index_and_seed() {
        assert!(Cli::try_parse_from(["toy-rsa", "keys", "--p", "17", "--q", "31", "--list", "3"]).is_ok());
        assert!(Cli::try_parse_from(["toy-rsa", "keys", "--p", "17", "--q", "31", "--list", "3", "--index", "0"]).is_err());
        assert!(Cli::try_parse_from(["toy-rsa", "keys", "--p", "17", "--q", "31", "--list", "3", "--seed", "7"]).is_err());
    }

    #[test]
    fn test_negative_index() {
        let cli = Cli::try_parse_from(["toy-rsa", "keys", "--p", "17", "--q", "31", "--index", "-1"]).unwrap();
        assert!(matches!(cli.command, Commands::Keys { index: Some(-1), .. }));
    }
}
