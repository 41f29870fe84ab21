use clap::Parser;
use distributed_elgamal::{
    decryption::{partial_decrypt_all, recover},
    encryption::encrypt,
    keygen::key_gen,
    params::KeyGenParams,
    utils::pad_message,
};
use rand::rngs::OsRng;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    about = "Run key generation, encryption and threshold decryption end to end",
    author,
    version
)]
struct Cli {
    /// Polynomial degree: any t+1 custodians can decrypt
    #[arg(long = "threshold", default_value_t = 2)]
    threshold: usize,

    /// Number of custodians receiving a key share
    #[arg(long = "custodians", default_value_t = 5)]
    custodians: usize,

    /// Bit length of the modulus p
    #[arg(long = "p-bits", default_value_t = 1024)]
    p_bits: usize,

    /// Bit length of the subgroup order q
    #[arg(long = "q-bits", default_value_t = 128)]
    q_bits: usize,

    /// Message to encrypt (at most 64 bytes, zero-padded)
    #[arg(long = "message", default_value = "Hello world")]
    message: String,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Demo failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = OsRng;
    let msg = pad_message(cli.message.as_bytes())?;
    println!("Message = 0x{}", hex::encode(msg));

    let params = KeyGenParams::new(cli.p_bits, cli.q_bits, cli.threshold, cli.custodians)?;
    let (pk, sk, shares) = key_gen(&params, &mut rng)?;
    // shares are all the dealer hands out
    sk.destroy();

    println!("Public key:");
    println!("\tP = {}", pk.group.p);
    println!("\tQ = {}", pk.group.q);
    println!("\tG = {}", pk.group.g);
    println!("\tY = {}", pk.y);
    println!("Issued {} private key shares", shares.len());

    let ct = encrypt(&pk, &msg, &mut rng)?;
    println!("Ciphertext:");
    println!("\tR = {}", ct.r.value());
    println!("\tC = 0x{}", hex::encode(&ct.c));

    let quorum = params.threshold.quorum();
    let partials = partial_decrypt_all(&pk, &shares[..quorum], &ct)?;
    println!("Decryption shares:");
    for share in &partials {
        println!("\tShare {} = {}", share.id, share.value.value());
    }

    let recovered = recover(&pk, &partials, &ct)?;
    println!("Recovered message: 0x{}", hex::encode(&recovered));

    if recovered == msg {
        info!("recovered message matches the original");
        println!("Recovered == Message");
    } else {
        println!("Recovered != Message");
    }
    Ok(())
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .try_init();
    });
}
